//! Betting and dealing.

use super::{RoundEngine, RoundPhase, Seat, observe};
use crate::error::{BetError, DealError, RoundStartError};
use crate::result::Outcome;
use crate::shoe::{Facing, Shoe};

/// Largest bet the dealer can still cover: every chip staked may have to be
/// paid back 3× (a 2× net loss for the house).
const fn coverage(dealer_chips: usize, staked: usize) -> usize {
    dealer_chips.saturating_sub(2 * staked) / 2
}

/// Deals one face-up card to each bettor, in order.
fn deal_to_players(seats: &mut [Seat], order: &[u8], shoe: &mut Shoe) {
    for &id in order {
        let card = shoe.draw(Facing::Up);
        log::trace!("{} receives {card}", seats[id as usize].participant.name());
        seats[id as usize].participant.hit(card);
    }
}

impl RoundEngine {
    /// Opens betting for the next round.
    ///
    /// The shoe is reshuffled first if the configured penetration is reached.
    ///
    /// # Errors
    ///
    /// Returns an error if a round is already in progress or the dealer
    /// cannot cover even the smallest bet.
    pub fn start_betting(&mut self) -> Result<(), RoundStartError> {
        if self.phase != RoundPhase::Idle {
            return Err(RoundStartError::InvalidState);
        }
        if coverage(self.dealer.participant().chips(), 0) == 0 {
            log::warn!("dealer is out of chips");
            return Err(RoundStartError::DealerBankrupt);
        }

        if self.shoe.needs_reshuffle(self.options.penetration) {
            self.shoe.reshuffle();
        }

        self.round += 1;
        self.phase = RoundPhase::Betting;
        log::info!("round {} begins", self.round);
        Ok(())
    }

    /// Places a bet for a player.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The amount is zero
    /// - Not in the betting phase
    /// - The player is not seated or has run out of chips
    /// - The player already bet this round
    /// - The player cannot afford the amount
    /// - The dealer cannot cover the amount
    pub fn place_bet(&mut self, player_id: u8, amount: usize) -> Result<(), BetError> {
        if amount == 0 {
            return Err(BetError::ZeroBet);
        }
        if self.phase != RoundPhase::Betting {
            return Err(BetError::InvalidState);
        }

        let available = coverage(self.dealer.participant().chips(), self.staked);
        let seat = self
            .seats
            .get_mut(player_id as usize)
            .ok_or(BetError::PlayerNotFound)?;
        let participant = &mut seat.participant;

        if !participant.is_eligible() {
            return Err(BetError::Ineligible);
        }
        if seat.stake > 0 {
            return Err(BetError::AlreadyPlaced);
        }
        if participant.chips() < amount {
            return Err(BetError::InsufficientFunds);
        }
        if amount > available {
            return Err(BetError::ExceedsCoverage);
        }

        seat.stake = participant.bet(amount);
        self.staked += amount;
        log::debug!("{} bets {amount}", participant.name());
        Ok(())
    }

    /// Asks every eligible player without a bet for their stake.
    ///
    /// Stakes are capped to the player's chips and to the dealer's remaining
    /// coverage; a stake of 0 sits the round out. Returns the total staked
    /// this round.
    ///
    /// # Errors
    ///
    /// Returns an error if not in the betting phase.
    pub fn collect_bets(&mut self) -> Result<usize, BetError> {
        if self.phase != RoundPhase::Betting {
            return Err(BetError::InvalidState);
        }

        for seat in &mut self.seats {
            if !seat.participant.is_eligible() || seat.stake > 0 {
                continue;
            }

            let wanted = {
                let state = observe(&seat.participant, &self.dealer, &self.shoe, self.round);
                seat.strategy.autobet(&state)
            };
            let available = coverage(self.dealer.participant().chips(), self.staked);
            let amount = wanted.min(seat.participant.chips()).min(available);

            if amount < wanted {
                log::warn!(
                    "{} wanted to bet {wanted}, capped to {amount}",
                    seat.participant.name()
                );
            }
            if amount == 0 {
                log::debug!("{} sits out", seat.participant.name());
                continue;
            }

            seat.stake = seat.participant.bet(amount);
            self.staked += amount;
            log::debug!("{} bets {amount}", seat.participant.name());
        }

        Ok(self.staked)
    }

    /// Cancels a round that has not been dealt yet, returning every stake.
    ///
    /// The round number is rolled back so the log stays contiguous.
    ///
    /// # Errors
    ///
    /// Returns an error if not in the betting phase.
    pub fn cancel_round(&mut self) -> Result<(), BetError> {
        if self.phase != RoundPhase::Betting {
            return Err(BetError::InvalidState);
        }

        for seat in &mut self.seats {
            if seat.stake > 0 {
                seat.participant.settle(Outcome::Push);
            }
        }
        log::info!("round {} cancelled", self.round);
        self.round -= 1;
        self.clear_round();
        Ok(())
    }

    /// Deals two cards to every bettor and to the dealer.
    ///
    /// Cards go round the table twice, each bettor first and the dealer last;
    /// the dealer's second card is dealt face down. Naturals stand at once.
    /// If the dealer's up card allows a peek and the dealer holds a natural,
    /// every bettor is settled immediately and the round is over.
    ///
    /// Returns `true` if the round ended on the dealer's natural.
    ///
    /// # Errors
    ///
    /// Returns an error if not in the betting phase or nobody has bet.
    pub fn deal(&mut self) -> Result<bool, DealError> {
        if self.phase != RoundPhase::Betting {
            return Err(DealError::InvalidState);
        }

        self.betting_order = (0..=u8::MAX)
            .zip(&self.seats)
            .filter(|(_, seat)| seat.stake > 0)
            .map(|(id, _)| id)
            .collect();

        if self.betting_order.is_empty() {
            return Err(DealError::NoBets);
        }

        for _ in 0..2 {
            deal_to_players(&mut self.seats, &self.betting_order, &mut self.shoe);

            let facing = if self.dealer.receives_hole_card() {
                Facing::Down
            } else {
                Facing::Up
            };
            let card = self.shoe.draw(facing);
            self.dealer.hit(card);
        }

        if let Some(card) = self.dealer.up_card() {
            log::debug!("dealer shows {card}");
        }

        for &id in &self.betting_order {
            let participant = &mut self.seats[id as usize].participant;
            if participant.is_blackjack() {
                log::debug!("{} has blackjack", participant.name());
                participant.stand();
            }
        }

        if self.dealer.peek() {
            if let Some(card) = self.dealer.hole_card().copied() {
                self.shoe.expose(&card);
            }

            for &id in &self.betting_order {
                let participant = &mut self.seats[id as usize].participant;
                let outcome = if participant.is_blackjack() {
                    Outcome::Push
                } else {
                    Outcome::Lose
                };
                self.paid += participant.settle(outcome).unwrap_or(0);
            }

            self.dealer.finish();
            self.phase = RoundPhase::RoundOver;
            log::info!("dealer blackjack, round {} over", self.round);
            return Ok(true);
        }

        self.phase = RoundPhase::PlayerTurns;
        Ok(false)
    }
}
