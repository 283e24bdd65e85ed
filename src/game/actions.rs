//! The player turn loop.

use super::{RoundEngine, RoundPhase, observe};
use crate::error::ActionError;
use crate::shoe::Facing;
use crate::strategy::Decision;

impl RoundEngine {
    /// Lets every bettor play out their hand, in seating order.
    ///
    /// Each player's strategy is asked to hit or stand until it stands, the
    /// hand busts, or it reaches 21. A bust is settled as a loss immediately.
    ///
    /// # Errors
    ///
    /// Returns an error if not in the player turn phase.
    pub fn play_turns(&mut self) -> Result<(), ActionError> {
        if self.phase != RoundPhase::PlayerTurns {
            return Err(ActionError::InvalidState);
        }

        for &id in &self.betting_order {
            let seat = &mut self.seats[id as usize];

            while !seat.participant.is_done() {
                let decision = {
                    let state = observe(&seat.participant, &self.dealer, &self.shoe, self.round);
                    seat.strategy.decide(&state)
                };

                match decision {
                    Decision::Hit => {
                        let card = self.shoe.draw(Facing::Up);
                        seat.participant.hit(card);
                        log::debug!(
                            "{} hits: {card}, now {}",
                            seat.participant.name(),
                            seat.participant.score()
                        );

                        if seat.participant.is_lost() {
                            log::debug!("{} busts", seat.participant.name());
                        }
                    }
                    Decision::Stand => {
                        log::debug!(
                            "{} stands on {}",
                            seat.participant.name(),
                            seat.participant.score()
                        );
                        seat.participant.stand();
                    }
                }
            }

            if seat.participant.is_21() {
                seat.participant.stand();
            }
        }

        self.phase = RoundPhase::DealerTurn;
        Ok(())
    }
}
