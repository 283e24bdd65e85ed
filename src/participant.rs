//! Table participants: chip balance, bet, hand and per-round status.

extern crate alloc;

use alloc::string::String;
use core::fmt;

use crate::card::Card;
use crate::hand::Hand;
use crate::result::Outcome;

/// Identifies a participant in the result log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ParticipantId {
    /// The house.
    Dealer,
    /// A seated player, by the ID returned from joining.
    Player(u8),
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dealer => f.write_str("dealer"),
            Self::Player(id) => write!(f, "player {id}"),
        }
    }
}

/// Where a participant stands within the current round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticipantStatus {
    /// Out of chips; excluded from every later round.
    Ineligible,
    /// Bet placed and still drawing.
    Playing,
    /// Stood (or reached 21) and waiting for the dealer.
    Waiting,
    /// Outcome applied, or no bet on the table.
    Settled,
}

/// A seat at the table.
///
/// Generic over role: the dealer wraps a participant with its own extra
/// state (see [`crate::dealer::Dealer`]).
#[derive(Debug, Clone)]
pub struct Participant {
    name: String,
    chips: usize,
    current_bet: usize,
    hand: Hand,
    /// Outcome decided (or nothing at stake). `current_bet` is 0 while set.
    settled: bool,
    /// No longer drawing this round.
    waiting: bool,
    /// Ran out of chips; never reset.
    ineligible: bool,
    /// Busted this round.
    lost: bool,
    outcome: Option<Outcome>,
}

impl Participant {
    /// Creates a participant with the given chip balance.
    #[must_use]
    pub fn new(name: impl Into<String>, chips: usize) -> Self {
        Self {
            name: name.into(),
            chips,
            current_bet: 0,
            hand: Hand::new(),
            settled: true,
            waiting: false,
            ineligible: chips == 0,
            lost: false,
            outcome: None,
        }
    }

    /// Returns the participant's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the chip balance (excluding the bet on the table).
    #[must_use]
    pub const fn chips(&self) -> usize {
        self.chips
    }

    /// Returns the bet on the table this round.
    #[must_use]
    pub const fn current_bet(&self) -> usize {
        self.current_bet
    }

    /// Returns the participant's hand.
    #[must_use]
    pub const fn hand(&self) -> &Hand {
        &self.hand
    }

    pub(crate) const fn hand_mut(&mut self) -> &mut Hand {
        &mut self.hand
    }

    /// Returns the visible score.
    #[must_use]
    pub fn score(&self) -> u8 {
        self.hand.score()
    }

    /// Returns the score including face-down cards.
    #[must_use]
    pub fn true_score(&self) -> u8 {
        self.hand.true_score()
    }

    /// Returns whether the hand is a natural.
    #[must_use]
    pub fn is_blackjack(&self) -> bool {
        self.hand.is_blackjack()
    }

    /// Returns whether the hand is over 21.
    #[must_use]
    pub fn is_bust(&self) -> bool {
        self.hand.is_bust()
    }

    /// Returns whether the visible score is exactly 21.
    #[must_use]
    pub fn is_21(&self) -> bool {
        self.hand.is_21()
    }

    /// Returns whether the participant busted this round.
    #[must_use]
    pub const fn is_lost(&self) -> bool {
        self.lost
    }

    /// Returns whether the round's outcome has been applied.
    #[must_use]
    pub const fn is_settled(&self) -> bool {
        self.settled
    }

    /// Returns whether the participant stood and awaits the dealer.
    #[must_use]
    pub const fn is_waiting(&self) -> bool {
        !self.settled && self.waiting
    }

    /// Returns whether the participant can still take part in rounds.
    #[must_use]
    pub const fn is_eligible(&self) -> bool {
        !self.ineligible
    }

    /// Returns the outcome applied this round, if any.
    #[must_use]
    pub const fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Returns the participant's status in the current round.
    #[must_use]
    pub const fn status(&self) -> ParticipantStatus {
        if self.ineligible {
            ParticipantStatus::Ineligible
        } else if self.settled {
            ParticipantStatus::Settled
        } else if self.waiting {
            ParticipantStatus::Waiting
        } else {
            ParticipantStatus::Playing
        }
    }

    /// Returns whether the participant takes no further action this round:
    /// busted, settled, stood, or at 21.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.lost || self.settled || self.waiting || self.hand.is_21()
    }

    /// Puts `amount` on the table.
    ///
    /// The amount must be positive and covered by the balance; the
    /// bet-collection layer validates it before calling.
    pub fn bet(&mut self, amount: usize) -> usize {
        debug_assert!(!self.ineligible, "ineligible participant cannot bet");
        debug_assert!(
            amount > 0 && amount <= self.chips,
            "bet of {amount} outside 1..={}",
            self.chips
        );

        self.chips -= amount;
        self.current_bet = amount;
        self.settled = false;
        self.waiting = false;
        amount
    }

    /// Adds a card to the hand.
    ///
    /// Busting settles the participant as a loss on the spot.
    pub fn hit(&mut self, card: Card) {
        self.hand.add(card);

        if self.hand.is_bust() {
            self.mark_lost();
        }
    }

    /// Marks the participant as lost and settles the bet as a loss.
    pub(crate) fn mark_lost(&mut self) {
        self.lost = true;
        self.settle(Outcome::Lose);
    }

    /// Stops drawing for this round.
    pub const fn stand(&mut self) {
        self.waiting = true;
    }

    /// Applies the round's outcome: pays `outcome.payout(bet)` back into the
    /// balance and clears the bet.
    ///
    /// Returns the amount paid, or `None` if the participant was already
    /// settled.
    pub fn settle(&mut self, outcome: Outcome) -> Option<usize> {
        if self.settled {
            return None;
        }

        let payout = outcome.payout(self.current_bet);
        self.chips += payout;
        self.current_bet = 0;
        self.settled = true;
        self.waiting = true;
        self.outcome = Some(outcome);
        Some(payout)
    }

    pub(crate) const fn credit(&mut self, amount: usize) {
        self.chips += amount;
    }

    pub(crate) fn debit(&mut self, amount: usize) {
        debug_assert!(amount <= self.chips, "debit of {amount} exceeds balance");
        self.chips = self.chips.saturating_sub(amount);
    }

    /// Clears the hand, bet and round flags; the balance is kept.
    ///
    /// A participant left without chips becomes permanently ineligible.
    pub fn reset(&mut self) {
        self.hand.clear();
        self.current_bet = 0;
        self.settled = true;
        self.waiting = false;
        self.lost = false;
        self.outcome = None;

        if self.chips == 0 {
            self.ineligible = true;
        }
    }
}
