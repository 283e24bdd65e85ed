//! Round engine and table state management.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

use crate::dealer::Dealer;
use crate::error::{DealError, ReshuffleError, RoundError, RoundStartError};
use crate::options::GameOptions;
use crate::participant::Participant;
use crate::result::{ResultLog, RoundSummary};
use crate::shoe::Shoe;
use crate::strategy::{ObservableState, Strategy};

mod actions;
mod bet;
mod dealer;
pub mod state;

pub use state::RoundPhase;

/// A player seat: the participant and the policy that plays it.
struct Seat {
    participant: Participant,
    strategy: Box<dyn Strategy>,
    /// Stake placed this round, kept after settlement for reporting.
    stake: usize,
}

/// Builds what a player may see. Takes disjoint borrows so the caller can
/// hold the seat's strategy mutably at the same time.
fn observe<'a>(
    participant: &'a Participant,
    dealer: &Dealer,
    shoe: &'a Shoe,
    round: u32,
) -> ObservableState<'a> {
    ObservableState {
        hand: participant.hand(),
        score: participant.score(),
        chips: participant.chips(),
        bet: participant.current_bet(),
        dealer_up_card: dealer.up_card().copied(),
        remaining: shoe.remaining_counts(),
        dealt: shoe.dealt_counts(),
        round,
    }
}

/// A blackjack table that runs rounds between seated players and the dealer.
///
/// The engine owns the shoe, the seats, the dealer and the result log. Each
/// round runs through [`RoundPhase`]s in order; [`RoundEngine::play_round`]
/// drives all of them, or they can be stepped one by one.
pub struct RoundEngine {
    options: GameOptions,
    shoe: Shoe,
    dealer: Dealer,
    seats: Vec<Seat>,
    /// Seat IDs that bet this round, in seating order.
    betting_order: Vec<u8>,
    round: u32,
    phase: RoundPhase,
    /// Chips put on the table this round.
    staked: usize,
    /// Chips paid back to players this round.
    paid: usize,
    log: ResultLog,
}

impl RoundEngine {
    /// Creates a table with the given seed for the shoe.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use shoebox::{GameOptions, HiLoStrategy, RoundEngine};
    ///
    /// let mut engine = RoundEngine::new(GameOptions::default(), 42);
    /// engine.join("Anna", 1_000, HiLoStrategy::new());
    /// let summary = engine.play_round().unwrap();
    /// let _ = summary;
    /// ```
    #[must_use]
    pub fn new(options: GameOptions, seed: u64) -> Self {
        let shoe = Shoe::new(options.decks, seed);
        let dealer = Dealer::new(options.dealer_bankroll, options.stand_on);

        Self {
            options,
            shoe,
            dealer,
            seats: Vec::new(),
            betting_order: Vec::new(),
            round: 0,
            phase: RoundPhase::Idle,
            staked: 0,
            paid: 0,
            log: ResultLog::new(),
        }
    }

    /// Seats a player with the given chips and strategy.
    ///
    /// Returns the assigned player ID, or `None` when all 256 seats are taken.
    pub fn join(
        &mut self,
        name: impl Into<String>,
        chips: usize,
        strategy: impl Strategy + 'static,
    ) -> Option<u8> {
        let id = u8::try_from(self.seats.len()).ok()?;
        let participant = Participant::new(name, chips);
        log::debug!("{} joins with {chips} chips", participant.name());
        self.seats.push(Seat {
            participant,
            strategy: Box::new(strategy),
            stake: 0,
        });
        Some(id)
    }

    /// Returns the table options.
    #[must_use]
    pub const fn options(&self) -> &GameOptions {
        &self.options
    }

    /// Returns the shoe.
    #[must_use]
    pub const fn shoe(&self) -> &Shoe {
        &self.shoe
    }

    /// Returns the shoe mutably, e.g. to stack cards.
    pub const fn shoe_mut(&mut self) -> &mut Shoe {
        &mut self.shoe
    }

    /// Returns the dealer.
    #[must_use]
    pub const fn dealer(&self) -> &Dealer {
        &self.dealer
    }

    /// Returns the participant seated under `player_id`.
    #[must_use]
    pub fn participant(&self, player_id: u8) -> Option<&Participant> {
        self.seats
            .get(player_id as usize)
            .map(|seat| &seat.participant)
    }

    /// Iterates over every seated player, eligible or not, with their IDs.
    pub fn players(&self) -> impl Iterator<Item = (u8, &Participant)> {
        (0..=u8::MAX)
            .zip(&self.seats)
            .map(|(id, seat)| (id, &seat.participant))
    }

    /// Returns the IDs of players who can still take part in rounds.
    #[must_use]
    pub fn active_players(&self) -> Vec<u8> {
        self.players()
            .filter(|(_, participant)| participant.is_eligible())
            .map(|(id, _)| id)
            .collect()
    }

    /// Returns the IDs of players who bet this round, in seating order.
    #[must_use]
    pub fn bettors(&self) -> &[u8] {
        &self.betting_order
    }

    /// Returns the number of the current (or last) round, starting at 1.
    #[must_use]
    pub const fn round(&self) -> u32 {
        self.round
    }

    /// Returns the current round phase.
    #[must_use]
    pub const fn phase(&self) -> RoundPhase {
        self.phase
    }

    /// Returns the pot: chips staked this round minus chips paid back.
    ///
    /// Whatever is left at showdown goes to (or, if negative, comes from) the
    /// dealer.
    #[must_use]
    #[expect(clippy::cast_possible_wrap, reason = "chip amounts fit in isize")]
    pub const fn pot(&self) -> isize {
        self.staked as isize - self.paid as isize
    }

    /// Returns the log of every settled round.
    #[must_use]
    pub const fn log(&self) -> &ResultLog {
        &self.log
    }

    /// Reshuffles the shoe between rounds.
    ///
    /// # Errors
    ///
    /// Returns an error if cards are on the table.
    pub fn reshuffle(&mut self) -> Result<(), ReshuffleError> {
        if !matches!(self.phase, RoundPhase::Idle | RoundPhase::Betting) {
            return Err(ReshuffleError::InvalidState);
        }
        self.shoe.reshuffle();
        Ok(())
    }

    /// Plays one full round: bets, deal, player turns, dealer turn, showdown.
    ///
    /// # Errors
    ///
    /// Returns an error if a round is already in progress, the dealer is out
    /// of chips, or nobody bets. A round nobody bets in is cancelled.
    pub fn play_round(&mut self) -> Result<RoundSummary, RoundError> {
        self.start_betting()?;
        self.collect_bets()?;

        let ended_early = match self.deal() {
            Ok(ended_early) => ended_early,
            Err(err) => {
                self.cancel_round()?;
                return Err(err.into());
            }
        };

        if !ended_early {
            self.play_turns()?;
            self.dealer_play()?;
        }

        Ok(self.showdown()?)
    }

    /// Plays up to `max_rounds` rounds.
    ///
    /// Stops early once no eligible player is left, the dealer is out of
    /// chips, or nobody bets. Returns the number of rounds played.
    ///
    /// # Errors
    ///
    /// Returns an error if a round is already in progress.
    pub fn run(&mut self, max_rounds: usize) -> Result<usize, RoundError> {
        let mut played = 0;

        while played < max_rounds {
            if self.active_players().is_empty() {
                log::info!("no eligible players left after {played} rounds");
                break;
            }

            match self.play_round() {
                Ok(_) => played += 1,
                Err(
                    RoundError::Start(RoundStartError::DealerBankrupt)
                    | RoundError::Deal(DealError::NoBets),
                ) => {
                    log::info!("table closed after {played} rounds");
                    break;
                }
                Err(err) => return Err(err),
            }
        }

        Ok(played)
    }

    /// Clears every hand and flag after showdown and returns to `Idle`.
    fn clear_round(&mut self) {
        for seat in &mut self.seats {
            seat.participant.reset();
            seat.stake = 0;
        }
        self.dealer.reset();
        self.betting_order.clear();
        self.staked = 0;
        self.paid = 0;
        self.phase = RoundPhase::Idle;
    }
}
