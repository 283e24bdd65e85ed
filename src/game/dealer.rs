//! Dealer play and showdown.

use alloc::vec::Vec;

use super::{RoundEngine, RoundPhase};
use crate::card::Card;
use crate::error::ShowdownError;
use crate::participant::ParticipantId;
use crate::result::{Outcome, PlayerResult, RoundResult, RoundSummary};
use crate::shoe::Facing;

impl RoundEngine {
    /// Reveals the hole card and plays out the dealer's hand.
    ///
    /// The dealer draws until reaching the stand-on total, unless every
    /// bettor has already busted. Returns the cards drawn after the reveal.
    ///
    /// # Errors
    ///
    /// Returns an error if not in the dealer turn phase.
    pub fn dealer_play(&mut self) -> Result<Vec<Card>, ShowdownError> {
        if self.phase != RoundPhase::DealerTurn {
            return Err(ShowdownError::InvalidState);
        }

        if let Some(card) = self.dealer.reveal() {
            self.shoe.expose(&card);
        }

        let pending = self
            .betting_order
            .iter()
            .any(|&id| !self.seats[id as usize].participant.is_settled());

        let mut drawn = Vec::new();
        if pending {
            while self.dealer.should_hit() {
                let card = self.shoe.draw(Facing::Up);
                self.dealer.hit(card);
                log::debug!("dealer hits: {card}, now {}", self.dealer.score());
                drawn.push(card);
            }
        }

        self.dealer.finish();
        self.phase = RoundPhase::RoundOver;
        Ok(drawn)
    }

    /// Settles every bettor against the dealer and closes the round.
    ///
    /// What is left in the pot goes to the dealer (a negative pot is paid out
    /// of the dealer's chips), so the round is zero-sum. Every bettor and the
    /// dealer get one record in the result log, then hands and flags are
    /// cleared and participants without chips become ineligible.
    ///
    /// # Errors
    ///
    /// Returns an error if the round is not over.
    pub fn showdown(&mut self) -> Result<RoundSummary, ShowdownError> {
        if self.phase != RoundPhase::RoundOver {
            return Err(ShowdownError::InvalidState);
        }

        let dealer_hand = self.dealer.participant().hand();
        let mut players = Vec::with_capacity(self.betting_order.len());

        for &id in &self.betting_order {
            let seat = &mut self.seats[id as usize];
            let participant = &mut seat.participant;

            if !participant.is_settled() {
                let outcome = Outcome::resolve(participant.hand(), dealer_hand);
                self.paid += participant.settle(outcome).unwrap_or(0);
            }

            let outcome = participant.outcome().unwrap_or(Outcome::Lose);
            let result = PlayerResult {
                player_id: id,
                outcome,
                bet: seat.stake,
                payout: outcome.payout(seat.stake),
                net: outcome.net(seat.stake),
                score: participant.true_score(),
            };
            log::debug!(
                "{}: {outcome:?} with {}, net {}",
                participant.name(),
                result.score,
                result.net
            );

            self.log.append(RoundResult {
                round: self.round,
                participant: ParticipantId::Player(id),
                outcome,
                net: result.net,
            });
            players.push(result);
        }

        let dealer_net = self.pot();
        let dealer = self.dealer.participant_mut();
        if dealer_net >= 0 {
            dealer.credit(dealer_net.unsigned_abs());
        } else {
            dealer.debit(dealer_net.unsigned_abs());
        }
        debug_assert_eq!(
            players.iter().map(|result| result.net).sum::<isize>() + dealer_net,
            0,
            "round {} is not zero-sum",
            self.round
        );

        self.log.append(RoundResult {
            round: self.round,
            participant: ParticipantId::Dealer,
            outcome: Outcome::from_net(dealer_net),
            net: dealer_net,
        });

        let summary = RoundSummary {
            round: self.round,
            players,
            dealer_value: self.dealer.participant().true_score(),
            dealer_bust: self.dealer.participant().is_bust(),
            dealer_blackjack: self.dealer.participant().is_blackjack(),
            dealer_net,
        };
        log::info!(
            "round {} settled: dealer {} with {}, net {dealer_net}",
            self.round,
            if summary.dealer_bust { "busts" } else { "stands" },
            summary.dealer_value
        );

        self.clear_round();
        Ok(summary)
    }
}
