//! The dealer: a participant with a hole card and a fixed drawing rule.

use crate::card::Card;
use crate::participant::Participant;
use crate::strategy::DealerStrategy;

/// Default total at which the dealer stops drawing.
pub const DEFAULT_STAND_ON: u8 = 17;

/// Progress of the dealer's hand through a round.
///
/// States only move forward: `Hidden` → `Peeked` → `Revealed` → `Done`.
/// `Peeked` is internal and changes nothing the table can see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DealerState {
    /// Hole card face down; only the up card is visible.
    Hidden,
    /// Hole card checked for a natural, still face down.
    Peeked,
    /// Hole card face up; the dealer draws under its stand-on rule.
    Revealed,
    /// Finished drawing for this round.
    Done,
}

/// The house participant.
#[derive(Debug, Clone)]
pub struct Dealer {
    participant: Participant,
    state: DealerState,
    rule: DealerStrategy,
}

impl Dealer {
    /// Creates a dealer with the given bankroll and stand-on total.
    #[must_use]
    pub fn new(bankroll: usize, stand_on: u8) -> Self {
        Self {
            participant: Participant::new("Dealer", bankroll),
            state: DealerState::Hidden,
            rule: DealerStrategy::new(stand_on),
        }
    }

    /// Returns the role-agnostic participant state.
    #[must_use]
    pub const fn participant(&self) -> &Participant {
        &self.participant
    }

    pub(crate) const fn participant_mut(&mut self) -> &mut Participant {
        &mut self.participant
    }

    /// Returns the current state of the dealer's hand.
    #[must_use]
    pub const fn state(&self) -> DealerState {
        self.state
    }

    /// Returns the total at which the dealer stops drawing.
    #[must_use]
    pub const fn stand_on(&self) -> u8 {
        self.rule.stand_on()
    }

    /// Returns whether the hole card is face up.
    #[must_use]
    pub fn is_revealed(&self) -> bool {
        self.state >= DealerState::Revealed
    }

    /// Returns the visible score.
    #[must_use]
    pub fn score(&self) -> u8 {
        self.participant.score()
    }

    /// Returns the first card dealt to the dealer, which is always face up.
    #[must_use]
    pub fn up_card(&self) -> Option<&Card> {
        self.participant.hand().cards().first()
    }

    /// Returns the second card dealt to the dealer.
    #[must_use]
    pub fn hole_card(&self) -> Option<&Card> {
        self.participant.hand().cards().get(1)
    }

    /// Returns whether the next card the dealer receives is the hole card,
    /// to be dealt face down.
    #[must_use]
    pub fn receives_hole_card(&self) -> bool {
        self.participant.hand().len() == 1 && !self.is_revealed()
    }

    /// Adds a card to the dealer's hand.
    ///
    /// The hole card is turned face down regardless of how it was drawn.
    pub fn hit(&mut self, mut card: Card) {
        if self.receives_hole_card() {
            card.hide();
        }
        self.participant.hit(card);
    }

    /// Checks the hole card for a natural without showing it.
    ///
    /// Only happens while the hole card is hidden and the up card is an ace or
    /// a face card. If the dealer holds 21 the hole card is revealed and
    /// `true` is returned; otherwise nothing visible changes.
    pub fn peek(&mut self) -> bool {
        if self.is_revealed() || !self.up_card().is_some_and(Card::is_facecard) {
            return false;
        }

        if self.participant.true_score() == 21 {
            log::debug!("dealer peeks: blackjack");
            self.reveal();
            return true;
        }

        self.state = DealerState::Peeked;
        false
    }

    /// Turns the hole card face up.
    ///
    /// Returns the revealed card the first time; later calls do nothing and
    /// return `None`.
    pub fn reveal(&mut self) -> Option<Card> {
        if self.is_revealed() {
            return None;
        }
        self.state = DealerState::Revealed;

        let card = self.participant.hand_mut().reveal_at(1);
        if self.participant.is_bust() {
            self.participant.mark_lost();
        }
        if let Some(card) = card {
            log::debug!("dealer reveals {card}, showing {}", self.score());
        }
        card
    }

    /// Returns whether the dealer must draw another card.
    ///
    /// A busted dealer never draws, whatever the stand-on total.
    #[must_use]
    pub fn should_hit(&self) -> bool {
        self.state == DealerState::Revealed
            && !self.participant.is_lost()
            && self.rule.hits(self.score())
    }

    /// Stops drawing for the rest of the round.
    pub const fn finish(&mut self) {
        self.state = DealerState::Done;
    }

    /// Clears the hand for a new round; the bankroll is kept.
    pub fn reset(&mut self) {
        self.participant.reset();
        self.state = DealerState::Hidden;
    }
}
