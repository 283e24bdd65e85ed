//! Error types for engine operations.

use thiserror::Error;

use crate::card::Card;

/// Errors that can occur during betting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BetError {
    /// Player not found.
    #[error("player not found")]
    PlayerNotFound,
    /// Player has no chips left and sits out for good.
    #[error("player is no longer eligible")]
    Ineligible,
    /// Insufficient funds.
    #[error("insufficient funds")]
    InsufficientFunds,
    /// The dealer cannot cover the worst-case payout of this bet.
    #[error("bet exceeds the dealer's coverage")]
    ExceedsCoverage,
    /// Player already has a bet on the table this round.
    #[error("bet already placed this round")]
    AlreadyPlaced,
    /// Invalid round phase for betting.
    #[error("invalid round phase for betting")]
    InvalidState,
    /// Bet amount is zero.
    #[error("bet amount is zero")]
    ZeroBet,
}

/// Errors that can occur during dealing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DealError {
    /// Invalid round phase for dealing.
    #[error("invalid round phase for dealing")]
    InvalidState,
    /// No players have placed bets.
    #[error("no players have placed bets")]
    NoBets,
}

/// Errors that can occur during the player turn loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ActionError {
    /// Invalid round phase for player actions.
    #[error("invalid round phase for player actions")]
    InvalidState,
}

/// Errors that can occur during dealer play and showdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ShowdownError {
    /// Invalid round phase for showdown.
    #[error("invalid round phase for showdown")]
    InvalidState,
}

/// Errors that can occur when starting a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RoundStartError {
    /// A round is already in progress.
    #[error("a round is already in progress")]
    InvalidState,
    /// The dealer has no chips left to cover bets.
    #[error("the dealer is out of chips")]
    DealerBankrupt,
}

/// Errors that can occur during reshuffling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ReshuffleError {
    /// Cards are on the table.
    #[error("cannot reshuffle while a round is in progress")]
    InvalidState,
}

/// Errors that can occur when arranging the shoe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StackError {
    /// The requested card is not left in the pool.
    #[error("card {0} is not in the shoe")]
    CardUnavailable(Card),
}

/// Any error raised while playing a full round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RoundError {
    /// The round could not start.
    #[error(transparent)]
    Start(#[from] RoundStartError),
    /// Bet collection failed.
    #[error(transparent)]
    Bet(#[from] BetError),
    /// Dealing failed.
    #[error(transparent)]
    Deal(#[from] DealError),
    /// The player turn loop failed.
    #[error(transparent)]
    Action(#[from] ActionError),
    /// Dealer play or showdown failed.
    #[error(transparent)]
    Showdown(#[from] ShowdownError),
}
