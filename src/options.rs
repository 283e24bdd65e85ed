//! Table configuration options.

use crate::dealer::DEFAULT_STAND_ON;

/// Configuration options for a blackjack table.
///
/// Use the builder pattern to customize options:
///
/// ```
/// use shoebox::GameOptions;
///
/// let options = GameOptions::default()
///     .with_decks(6)
///     .with_stand_on(17)
///     .with_dealer_bankroll(50_000);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GameOptions {
    /// Number of decks in the shoe.
    pub decks: u8,
    /// Total at which the dealer stops drawing.
    pub stand_on: u8,
    /// Deck penetration (fraction of the shoe played before a reshuffle at
    /// the start of a round). 0 to refill only when the shoe runs dry.
    pub penetration: f64,
    /// The dealer's starting chips.
    pub dealer_bankroll: usize,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            decks: 4,
            stand_on: DEFAULT_STAND_ON,
            penetration: 0.0,
            dealer_bankroll: 10_000,
        }
    }
}

impl GameOptions {
    /// Sets the number of decks.
    ///
    /// # Example
    ///
    /// ```
    /// use shoebox::GameOptions;
    ///
    /// let options = GameOptions::default().with_decks(6);
    /// assert_eq!(options.decks, 6);
    /// ```
    #[must_use]
    pub const fn with_decks(mut self, decks: u8) -> Self {
        self.decks = decks;
        self
    }

    /// Sets the total at which the dealer stops drawing.
    ///
    /// # Example
    ///
    /// ```
    /// use shoebox::GameOptions;
    ///
    /// let options = GameOptions::default().with_stand_on(16);
    /// assert_eq!(options.stand_on, 16);
    /// ```
    #[must_use]
    pub const fn with_stand_on(mut self, stand_on: u8) -> Self {
        self.stand_on = stand_on;
        self
    }

    /// Sets the deck penetration.
    ///
    /// # Example
    ///
    /// ```
    /// use shoebox::GameOptions;
    ///
    /// let options = GameOptions::default().with_penetration(0.75);
    /// assert!((options.penetration - 0.75).abs() < f64::EPSILON);
    /// ```
    #[must_use]
    pub const fn with_penetration(mut self, penetration: f64) -> Self {
        self.penetration = penetration;
        self
    }

    /// Sets the dealer's starting chips.
    ///
    /// # Example
    ///
    /// ```
    /// use shoebox::GameOptions;
    ///
    /// let options = GameOptions::default().with_dealer_bankroll(500);
    /// assert_eq!(options.dealer_bankroll, 500);
    /// ```
    #[must_use]
    pub const fn with_dealer_bankroll(mut self, bankroll: usize) -> Self {
        self.dealer_bankroll = bankroll;
        self
    }
}
