//! Round phase type.

/// Phase of the current round.
///
/// Phases run in a fixed order; each engine operation checks it is called in
/// the right one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    /// No round in progress.
    Idle,
    /// Accepting bets for the next round.
    Betting,
    /// Players draw in seating order.
    PlayerTurns,
    /// Dealer reveals and plays out their hand.
    DealerTurn,
    /// Round has ended and results can be settled.
    RoundOver,
}
