//! Hand representation and scoring.

extern crate alloc;

use alloc::collections::BTreeSet;
use alloc::vec::Vec;
use core::marker::PhantomData;

use crate::card::{BlackjackComparer, Card, CardComparer};

/// Best legal total of a set of totals: the highest one not above 21, or the
/// lowest one when every total busts.
pub(crate) fn best_total(totals: &BTreeSet<u8>) -> u8 {
    totals
        .range(..=21u8)
        .next_back()
        .or_else(|| totals.first())
        .copied()
        .unwrap_or(0)
}

/// An ordered sequence of cards owned by a single participant.
///
/// The score is derived from the cards on every call. `C` selects the
/// valuation policy; blackjack hands use the default [`BlackjackComparer`].
#[derive(Debug, Clone)]
pub struct Hand<C: CardComparer = BlackjackComparer> {
    cards: Vec<Card>,
    comparer: PhantomData<C>,
}

impl<C: CardComparer> Hand<C> {
    /// Creates a new empty hand.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cards: Vec::new(),
            comparer: PhantomData,
        }
    }

    /// Creates a hand holding the given cards.
    #[must_use]
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self {
            cards,
            comparer: PhantomData,
        }
    }

    /// Adds a card to the hand.
    pub fn add(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Returns all cards in the hand, including face-down ones.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Returns the face-up cards in the hand.
    pub fn visible_cards(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter().filter(|card| card.is_faceup())
    }

    /// Returns the number of cards in the hand.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns whether the hand is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Removes every card from the hand.
    pub fn clear(&mut self) {
        self.cards.clear();
    }

    /// Turns every card face up.
    pub fn reveal_all(&mut self) {
        self.cards.iter_mut().for_each(Card::reveal);
    }

    /// Turns every card face down.
    pub fn hide_all(&mut self) {
        self.cards.iter_mut().for_each(Card::hide);
    }

    /// Turns the card at `index` face up.
    ///
    /// Returns the card if it was face down, `None` if it was already face up
    /// or the index is out of range.
    pub fn reveal_at(&mut self, index: usize) -> Option<Card> {
        let card = self.cards.get_mut(index)?;
        if card.is_faceup() {
            return None;
        }
        card.reveal();
        Some(*card)
    }

    /// Returns every achievable total.
    ///
    /// Face-down cards are skipped unless `include_hidden` is set.
    #[must_use]
    pub fn totals(&self, include_hidden: bool) -> BTreeSet<u8> {
        let mut totals = BTreeSet::from([0u8]);
        for card in &self.cards {
            if !include_hidden && !card.is_faceup() {
                continue;
            }
            totals = totals
                .iter()
                .flat_map(|total| {
                    C::values(card)
                        .iter()
                        .map(move |value| total.saturating_add(*value))
                })
                .collect();
        }
        totals
    }

    /// Returns the publicly visible score.
    #[must_use]
    pub fn score(&self) -> u8 {
        best_total(&self.totals(false))
    }

    /// Returns the score counting face-down cards.
    ///
    /// Only used for internal checks such as blackjack detection and the
    /// dealer peek.
    #[must_use]
    pub fn true_score(&self) -> u8 {
        best_total(&self.totals(true))
    }

    /// Returns whether the hand is a natural (two cards totalling 21).
    #[must_use]
    pub fn is_blackjack(&self) -> bool {
        self.cards.len() == 2 && self.true_score() == 21
    }

    /// Returns whether the hand is over 21.
    #[must_use]
    pub fn is_bust(&self) -> bool {
        self.true_score() > 21
    }

    /// Returns whether the visible score is exactly 21.
    #[must_use]
    pub fn is_21(&self) -> bool {
        self.score() == 21
    }
}

impl<C: CardComparer> Default for Hand<C> {
    fn default() -> Self {
        Self::new()
    }
}
