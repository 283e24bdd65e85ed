//! A multiplayer blackjack round engine with optional `no_std` support.
//!
//! The crate provides a [`RoundEngine`] that seats players behind pluggable
//! [`Strategy`] policies and runs rounds against a dealer: betting, dealing
//! from a counted [`Shoe`], player turns, dealer play and a zero-sum
//! showdown. Every settled round is appended to a [`ResultLog`] for later
//! analysis.
//!
//! # Example
//!
//! ```
//! use shoebox::{GameOptions, HiLoStrategy, ParticipantId, RoundEngine};
//!
//! let mut engine = RoundEngine::new(GameOptions::default(), 42);
//! let anna = engine.join("Anna", 1_000, HiLoStrategy::new()).unwrap();
//!
//! let played = engine.run(10).unwrap();
//! assert!(played <= 10);
//! assert!(engine.log().win_rate(ParticipantId::Player(anna)).is_some());
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(all(not(feature = "std"), not(feature = "alloc")))]
compile_error!(
    "`std` is disabled but `alloc` feature is not enabled. Enable `alloc` or keep `std` enabled."
);

extern crate alloc;

pub mod card;
pub mod dealer;
pub mod error;
pub mod game;
pub mod hand;
pub mod options;
pub mod participant;
pub mod result;
pub mod shoe;
pub mod strategy;

// Re-export main types
pub use card::{BlackjackComparer, Card, CardComparer, DECK_SIZE, DefaultComparer, Rank, Suit};
pub use dealer::{DEFAULT_STAND_ON, Dealer, DealerState};
pub use error::{
    ActionError, BetError, DealError, ReshuffleError, RoundError, RoundStartError, ShowdownError,
    StackError,
};
pub use game::{RoundEngine, RoundPhase};
pub use hand::Hand;
pub use options::GameOptions;
pub use participant::{Participant, ParticipantId, ParticipantStatus};
pub use result::{Outcome, PlayerResult, ResultLog, RoundResult, RoundSummary};
pub use shoe::{Facing, HitOdds, RankCounts, Shoe};
pub use strategy::{
    DEFAULT_BET, Decision, DealerStrategy, HiLoStrategy, ObservableState, Strategy,
};
