//! Round outcomes, payouts and the append-only result log.

extern crate alloc;

use alloc::vec::Vec;

use crate::hand::Hand;
use crate::participant::ParticipantId;

/// Result of a single hand after showdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// Player wins (dealer busts or player has higher value).
    Win,
    /// Player loses (player busts or dealer has higher value).
    Lose,
    /// Push (tie).
    Push,
    /// Player wins with a natural.
    Blackjack,
}

impl Outcome {
    /// Returns how many times the original bet is paid back.
    #[must_use]
    pub const fn multiplier(self) -> usize {
        match self {
            Self::Blackjack => 3,
            Self::Win => 2,
            Self::Push => 1,
            Self::Lose => 0,
        }
    }

    /// Returns the amount paid back to the player for a bet of `bet`.
    #[must_use]
    pub const fn payout(self, bet: usize) -> usize {
        bet * self.multiplier()
    }

    /// Returns the player's net chip change for a bet of `bet`.
    #[must_use]
    #[expect(clippy::cast_possible_wrap, reason = "chip amounts fit in isize")]
    pub const fn net(self, bet: usize) -> isize {
        self.payout(bet) as isize - bet as isize
    }

    /// Returns whether the outcome counts as a win.
    #[must_use]
    pub const fn is_win(self) -> bool {
        matches!(self, Self::Win | Self::Blackjack)
    }

    /// Classifies a net chip change: positive wins, negative loses, zero
    /// pushes. Used for the dealer, whose stake is the pot.
    #[must_use]
    pub const fn from_net(net: isize) -> Self {
        if net > 0 {
            Self::Win
        } else if net < 0 {
            Self::Lose
        } else {
            Self::Push
        }
    }

    /// Settles a standing player hand against the dealer's final hand.
    ///
    /// A natural pays as blackjack unless the dealer also has one. Otherwise a
    /// dealer bust wins for the player, a dealer 21 pushes only against a
    /// player 21, and any other totals are compared directly.
    #[must_use]
    pub fn resolve(player: &Hand, dealer: &Hand) -> Self {
        if player.is_bust() {
            return Self::Lose;
        }
        if player.is_blackjack() {
            return if dealer.is_blackjack() {
                Self::Push
            } else {
                Self::Blackjack
            };
        }
        if dealer.is_bust() {
            return Self::Win;
        }

        let player_score = player.true_score();
        let dealer_score = dealer.true_score();
        if dealer_score == 21 {
            return if player_score == 21 {
                Self::Push
            } else {
                Self::Lose
            };
        }

        match player_score.cmp(&dealer_score) {
            core::cmp::Ordering::Greater => Self::Win,
            core::cmp::Ordering::Less => Self::Lose,
            core::cmp::Ordering::Equal => Self::Push,
        }
    }
}

/// One logged outcome for one participant in one round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundResult {
    /// The session round number (starting at 1).
    pub round: u32,
    /// Who the result belongs to.
    pub participant: ParticipantId,
    /// The outcome of the round for this participant.
    pub outcome: Outcome,
    /// Net chip change for this participant.
    pub net: isize,
}

/// Append-only log of round results, in play order.
#[derive(Debug, Clone, Default)]
pub struct ResultLog {
    records: Vec<RoundResult>,
}

impl ResultLog {
    /// Creates an empty log.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    pub(crate) fn append(&mut self, record: RoundResult) {
        self.records.push(record);
    }

    /// Returns every record in play order.
    #[must_use]
    pub fn records(&self) -> &[RoundResult] {
        &self.records
    }

    /// Iterates over every record in play order.
    pub fn iter(&self) -> impl Iterator<Item = &RoundResult> {
        self.records.iter()
    }

    /// Returns the number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns whether the log is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates over the records of one participant.
    pub fn for_participant(
        &self,
        participant: ParticipantId,
    ) -> impl Iterator<Item = &RoundResult> {
        self.records
            .iter()
            .filter(move |record| record.participant == participant)
    }

    /// Returns the fraction of logged rounds the participant won.
    ///
    /// Returns `None` if the participant has no records.
    #[must_use]
    #[expect(
        clippy::cast_precision_loss,
        reason = "round counts are far below f64 precision"
    )]
    pub fn win_rate(&self, participant: ParticipantId) -> Option<f64> {
        let (played, won) = self
            .for_participant(participant)
            .fold((0usize, 0usize), |(played, won), record| {
                (played + 1, won + usize::from(record.outcome.is_win()))
            });
        (played > 0).then(|| won as f64 / played as f64)
    }

    /// Returns the cumulative win rate after each of the participant's
    /// rounds, as `(round, rate)` pairs.
    #[must_use]
    #[expect(
        clippy::cast_precision_loss,
        reason = "round counts are far below f64 precision"
    )]
    pub fn win_rate_series(&self, participant: ParticipantId) -> Vec<(u32, f64)> {
        let mut won = 0usize;
        self.for_participant(participant)
            .enumerate()
            .map(|(index, record)| {
                won += usize::from(record.outcome.is_win());
                (record.round, won as f64 / (index + 1) as f64)
            })
            .collect()
    }
}

/// Result for a single player after showdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerResult {
    /// The player ID.
    pub player_id: u8,
    /// The outcome of the hand.
    pub outcome: Outcome,
    /// The bet amount.
    pub bet: usize,
    /// The payout amount (chips returned to the player).
    pub payout: usize,
    /// Net result (positive = profit, negative = loss).
    pub net: isize,
    /// The player's final hand value.
    pub score: u8,
}

/// Summary of a finished round.
#[derive(Debug, Clone)]
pub struct RoundSummary {
    /// The session round number.
    pub round: u32,
    /// Results for each player who bet, in seating order.
    pub players: Vec<PlayerResult>,
    /// The dealer's final hand value.
    pub dealer_value: u8,
    /// Whether the dealer busted.
    pub dealer_bust: bool,
    /// Whether the dealer had blackjack.
    pub dealer_blackjack: bool,
    /// The dealer's net chip change (what was left in the pot).
    pub dealer_net: isize,
}
