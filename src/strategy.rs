//! Decision policies for players.
//!
//! A [`Strategy`] only ever sees an [`ObservableState`]: its own hand, the
//! dealer's up card, the shoe's seen/unseen counts and the round number.
//! Hidden cards never reach it.

use crate::card::{Card, Rank};
use crate::dealer::DEFAULT_STAND_ON;
use crate::hand::Hand;
use crate::shoe::{HitOdds, RankCounts, hit_odds};

/// Stake used by [`Strategy::autobet`] unless a strategy overrides it.
pub const DEFAULT_BET: usize = 100;

/// A hit-or-stand decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Decision {
    /// Draw another card.
    Hit,
    /// Keep the current hand.
    Stand,
}

impl Decision {
    /// Reads a decision typed by a person.
    ///
    /// `y`, `yes`, `h` and `hit` (any case, surrounding whitespace ignored)
    /// mean hit. Anything else, including unrecognised input, means stand.
    #[must_use]
    pub fn from_input(input: &str) -> Self {
        let input = input.trim();
        if ["y", "yes", "h", "hit"]
            .iter()
            .any(|accepted| input.eq_ignore_ascii_case(accepted))
        {
            Self::Hit
        } else {
            Self::Stand
        }
    }
}

/// Everything a player may legitimately know when deciding.
#[derive(Debug, Clone, Copy)]
pub struct ObservableState<'a> {
    /// The player's own hand (all face up).
    pub hand: &'a Hand,
    /// The player's visible score.
    pub score: u8,
    /// The player's chip balance, excluding the bet on the table.
    pub chips: usize,
    /// The bet on the table (0 while betting).
    pub bet: usize,
    /// The dealer's up card, once dealt.
    pub dealer_up_card: Option<Card>,
    /// Cards of each rank the table has not seen yet.
    pub remaining: &'a RankCounts,
    /// Cards of each rank already seen face up.
    pub dealt: &'a RankCounts,
    /// The session round number.
    pub round: u32,
}

impl ObservableState<'_> {
    /// Returns the odds of one more card, from the unseen counts.
    #[must_use]
    pub fn hit_odds(&self) -> Option<HitOdds> {
        hit_odds(self.remaining, self.hand)
    }

    /// Returns the Hi-Lo running count over the cards seen so far.
    #[must_use]
    pub fn running_count(&self) -> isize {
        running_count(self.dealt)
    }
}

/// A player's decision policy.
pub trait Strategy {
    /// Decides whether to hit or stand.
    fn decide(&mut self, state: &ObservableState<'_>) -> Decision;

    /// Chooses the stake for the coming round.
    ///
    /// Returning 0 sits the round out.
    fn autobet(&mut self, _state: &ObservableState<'_>) -> usize {
        DEFAULT_BET
    }
}

/// The house rule as a strategy: hit below a threshold, never bet.
///
/// The table's [`Dealer`](crate::dealer::Dealer) draws by this rule; it can
/// also be seated as a player that mimics the house.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DealerStrategy {
    stand_on: u8,
}

impl DealerStrategy {
    /// Creates the rule with a custom stand-on total.
    #[must_use]
    pub const fn new(stand_on: u8) -> Self {
        Self { stand_on }
    }

    /// Returns the total at which the rule stops drawing.
    #[must_use]
    pub const fn stand_on(&self) -> u8 {
        self.stand_on
    }

    /// Returns whether a hand showing `score` must draw.
    #[must_use]
    pub const fn hits(&self, score: u8) -> bool {
        score < self.stand_on
    }
}

impl Default for DealerStrategy {
    fn default() -> Self {
        Self::new(DEFAULT_STAND_ON)
    }
}

impl Strategy for DealerStrategy {
    fn decide(&mut self, state: &ObservableState<'_>) -> Decision {
        if self.hits(state.score) {
            Decision::Hit
        } else {
            Decision::Stand
        }
    }

    fn autobet(&mut self, _state: &ObservableState<'_>) -> usize {
        0
    }
}

/// Hi-Lo weight of a rank: low cards +1, middle cards 0, tens and aces −1.
#[must_use]
pub const fn hi_lo_weight(rank: Rank) -> isize {
    match rank {
        Rank::Two | Rank::Three | Rank::Four | Rank::Five | Rank::Six => 1,
        Rank::Seven | Rank::Eight | Rank::Nine => 0,
        Rank::Ten | Rank::Jack | Rank::Queen | Rank::King | Rank::Ace => -1,
    }
}

/// Hi-Lo running count over per-rank counts of seen cards.
#[must_use]
#[expect(clippy::cast_possible_wrap, reason = "card counts fit in isize")]
pub fn running_count(dealt: &RankCounts) -> isize {
    dealt
        .iter()
        .map(|(rank, count)| hi_lo_weight(*rank) * *count as isize)
        .sum()
}

/// Card-counting player using the Hi-Lo running count.
///
/// A high count means many low cards are gone, so the player draws more
/// aggressively and raises the stake.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HiLoStrategy;

impl HiLoStrategy {
    /// Creates the strategy.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Score below which the player hits at a given count.
    #[must_use]
    pub const fn hit_below(count: isize) -> u8 {
        if count > 5 {
            18
        } else if count < -5 {
            12
        } else {
            16
        }
    }

    /// Stake for a given count.
    #[must_use]
    pub const fn stake(count: isize) -> usize {
        if count > 10 {
            500
        } else if count > 5 {
            300
        } else if count > 0 {
            200
        } else if count > -5 {
            100
        } else {
            25
        }
    }
}

impl Strategy for HiLoStrategy {
    fn decide(&mut self, state: &ObservableState<'_>) -> Decision {
        if state.score < Self::hit_below(state.running_count()) {
            Decision::Hit
        } else {
            Decision::Stand
        }
    }

    fn autobet(&mut self, state: &ObservableState<'_>) -> usize {
        Self::stake(state.running_count())
    }
}
