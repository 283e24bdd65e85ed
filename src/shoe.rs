//! The multi-deck shoe and its card-counting statistics.

extern crate alloc;

use alloc::collections::BTreeSet;
use alloc::vec::Vec;
#[cfg(all(not(feature = "std"), feature = "alloc"))]
use hashbrown::HashMap;
use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
#[cfg(feature = "std")]
use std::collections::HashMap;

use crate::card::{BlackjackComparer, Card, CardComparer, DECK_SIZE, Rank, Suit};
use crate::error::StackError;
use crate::hand::{Hand, best_total};

/// Per-rank card counts.
pub type RankCounts = HashMap<Rank, usize>;

/// How a drawn card lands on the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    /// Visible to everyone; counted as dealt immediately.
    Up,
    /// Hidden (the dealer's hole card); counted as dealt once exposed.
    Down,
}

/// Chances of the next card busting, reaching 21 or staying below it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitOdds {
    /// Probability that one more card busts the hand.
    pub bust: f64,
    /// Probability that one more card leaves the hand below 21.
    pub safe: f64,
    /// Probability that one more card brings the hand to exactly 21.
    pub twenty_one: f64,
}

/// Computes [`HitOdds`] for drawing one card onto `hand`, given the counts of
/// cards not yet seen.
///
/// Only the visible part of the hand is used. Returns `None` when no unseen
/// card is left.
#[must_use]
#[expect(
    clippy::cast_precision_loss,
    reason = "card counts are far below f64 precision"
)]
pub fn hit_odds(unseen: &RankCounts, hand: &Hand) -> Option<HitOdds> {
    let totals = hand.totals(false);
    let (mut bust, mut safe, mut twenty_one) = (0usize, 0usize, 0usize);

    for rank in Rank::ALL {
        let count = unseen.get(&rank).copied().unwrap_or(0);
        if count == 0 {
            continue;
        }
        let next: BTreeSet<u8> = totals
            .iter()
            .flat_map(|total| {
                rank.values()
                    .iter()
                    .map(move |value| total.saturating_add(*value))
            })
            .collect();
        let score = best_total(&next);
        if score > 21 {
            bust += count;
        } else if score == 21 {
            twenty_one += count;
        } else {
            safe += count;
        }
    }

    let total = bust + safe + twenty_one;
    if total == 0 {
        return None;
    }
    let total = total as f64;
    Some(HitOdds {
        bust: bust as f64 / total,
        safe: safe as f64 / total,
        twenty_one: twenty_one as f64 / total,
    })
}

/// A pool of cards built from several standard decks.
///
/// Alongside the undealt cards the shoe keeps two running counts per rank:
/// `remaining` (cards the table has not seen, including face-down cards
/// already dealt) and `dealt` (cards seen face up). Their sum always equals
/// `num_decks * 52`.
pub struct Shoe {
    /// Undealt cards; the top of the shoe is the end of the vector.
    cards: Vec<Card>,
    num_decks: u8,
    remaining: RankCounts,
    dealt: RankCounts,
    /// Face-down cards dealt from this fill, waiting to be exposed.
    hidden: Vec<Card>,
    rng: ChaCha8Rng,
}

impl Shoe {
    /// Creates and shuffles a shoe of `num_decks` decks.
    ///
    /// A shoe always holds at least one deck.
    #[must_use]
    pub fn new(num_decks: u8, seed: u64) -> Self {
        let num_decks = num_decks.max(1);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let cards = Self::create_shoe(num_decks, &mut rng);

        Self {
            cards,
            num_decks,
            remaining: Self::full_counts(num_decks),
            dealt: RankCounts::new(),
            hidden: Vec::new(),
            rng,
        }
    }

    /// Creates and shuffles the cards of `num_decks` decks.
    fn create_shoe(num_decks: u8, rng: &mut ChaCha8Rng) -> Vec<Card> {
        let mut cards = Vec::with_capacity(num_decks as usize * DECK_SIZE);

        for _ in 0..num_decks {
            for suit in Suit::ALL {
                for rank in Rank::ALL {
                    cards.push(Card::face_down(rank, suit));
                }
            }
        }

        cards.shuffle(rng);
        cards
    }

    fn full_counts(num_decks: u8) -> RankCounts {
        let per_rank = num_decks as usize * Suit::ALL.len();
        Rank::ALL.into_iter().map(|rank| (rank, per_rank)).collect()
    }

    /// Refills the pool with fresh decks, shuffles it and resets the counts.
    ///
    /// Cards still on the table are forgotten: they belong to the previous
    /// fill and are no longer counted.
    pub fn reshuffle(&mut self) {
        self.cards = Self::create_shoe(self.num_decks, &mut self.rng);
        self.remaining = Self::full_counts(self.num_decks);
        self.dealt.clear();
        self.hidden.clear();
        log::debug!("shoe reshuffled ({} decks)", self.num_decks);
    }

    /// Returns whether the used fraction of the shoe has reached `penetration`.
    ///
    /// A penetration of 0 disables the check: the shoe is then only refilled
    /// when a draw finds it empty.
    #[must_use]
    pub fn needs_reshuffle(&self, penetration: f64) -> bool {
        if penetration <= 0.0 {
            return false;
        }

        #[expect(
            clippy::cast_precision_loss,
            reason = "f64 has sufficient precision for card counts"
        )]
        let used_ratio = 1.0 - (self.cards.len() as f64 / self.capacity() as f64);

        used_ratio >= penetration
    }

    /// Draws the top card.
    ///
    /// An empty pool is refilled and reshuffled first, so drawing never fails.
    #[expect(
        clippy::missing_panics_doc,
        reason = "a refilled shoe always holds at least one deck"
    )]
    pub fn draw(&mut self, facing: Facing) -> Card {
        if self.cards.is_empty() {
            log::debug!("shoe empty, refilling");
            self.reshuffle();
        }

        let mut card = self
            .cards
            .pop()
            .expect("a refilled shoe always holds at least one deck");

        match facing {
            Facing::Up => {
                card.reveal();
                self.mark_seen(&card);
            }
            Facing::Down => {
                card.hide();
                self.hidden.push(card);
            }
        }

        log::trace!("drew {card}, {} left in pool", self.cards.len());
        card
    }

    /// Records a face-down card as seen once it is turned over.
    ///
    /// Returns `false` if the card was not dealt face down from the current
    /// fill (for example because the shoe was refilled in between).
    pub fn expose(&mut self, card: &Card) -> bool {
        let Some(index) = self.hidden.iter().position(|hidden| hidden == card) else {
            return false;
        };
        self.hidden.swap_remove(index);
        self.mark_seen(card);
        true
    }

    fn mark_seen(&mut self, card: &Card) {
        let rank = BlackjackComparer::key(card);
        if let Some(count) = self.remaining.get_mut(&rank) {
            *count = count.saturating_sub(1);
        }
        *self.dealt.entry(rank).or_insert(0) += 1;
    }

    /// Moves the given cards to the top of the pool so they are drawn next,
    /// in order.
    ///
    /// Cards are matched by exact identity, so the composition of the shoe
    /// and its counts are unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if a card is not in the pool. The pool keeps its
    /// composition; the cards matched before the failure are still moved to
    /// the top and drawn next, in the requested order.
    pub fn stack(&mut self, draws: &[Card]) -> Result<(), StackError> {
        let mut top = Vec::with_capacity(draws.len());
        let mut missing = None;

        for card in draws {
            let Some(index) = self.cards.iter().position(|pooled| pooled == card) else {
                missing = Some(*card);
                break;
            };
            top.push(self.cards.remove(index));
        }

        top.reverse();
        self.cards.extend(top);
        missing.map_or(Ok(()), |card| Err(StackError::CardUnavailable(card)))
    }

    /// Returns the number of decks the shoe is built from.
    #[must_use]
    pub const fn num_decks(&self) -> u8 {
        self.num_decks
    }

    /// Returns the number of cards in a full shoe.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.num_decks as usize * DECK_SIZE
    }

    /// Returns the number of undealt cards physically left in the pool.
    #[must_use]
    pub fn cards_in_pool(&self) -> usize {
        self.cards.len()
    }

    /// Returns how many cards of `rank` the table has not seen yet.
    #[must_use]
    pub fn remaining(&self, rank: Rank) -> usize {
        self.remaining.get(&rank).copied().unwrap_or(0)
    }

    /// Returns how many cards of `rank` have been seen face up.
    #[must_use]
    pub fn dealt(&self, rank: Rank) -> usize {
        self.dealt.get(&rank).copied().unwrap_or(0)
    }

    /// Returns the unseen count of every rank.
    #[must_use]
    pub const fn remaining_counts(&self) -> &RankCounts {
        &self.remaining
    }

    /// Returns the seen count of every rank.
    #[must_use]
    pub const fn dealt_counts(&self) -> &RankCounts {
        &self.dealt
    }

    /// Returns the total number of unseen cards.
    #[must_use]
    pub fn total_remaining(&self) -> usize {
        self.remaining.values().sum()
    }

    /// Returns the total number of cards seen face up.
    #[must_use]
    pub fn total_dealt(&self) -> usize {
        self.dealt.values().sum()
    }

    /// Returns, for every rank still unseen, the probability that the next
    /// card drawn has that rank.
    #[must_use]
    #[expect(
        clippy::cast_precision_loss,
        reason = "card counts are far below f64 precision"
    )]
    pub fn probabilities(&self) -> HashMap<Rank, f64> {
        let total = self.total_remaining();
        if total == 0 {
            return HashMap::new();
        }
        self.remaining
            .iter()
            .filter(|(_, count)| **count > 0)
            .map(|(rank, count)| (*rank, *count as f64 / total as f64))
            .collect()
    }

    /// Returns the odds of one more card onto `hand`.
    #[must_use]
    pub fn hit_odds(&self, hand: &Hand) -> Option<HitOdds> {
        hit_odds(&self.remaining, hand)
    }
}
