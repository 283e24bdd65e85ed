//! Card types, valuation policies and deck utilities.

use core::fmt;
use core::hash::{Hash, Hasher};

/// Card suit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Suit {
    /// Hearts.
    Hearts,
    /// Diamonds.
    Diamonds,
    /// Clubs.
    Clubs,
    /// Spades.
    Spades,
}

impl Suit {
    /// All four suits, in deck-building order.
    pub const ALL: [Self; 4] = [Self::Hearts, Self::Diamonds, Self::Clubs, Self::Spades];

    /// Returns the suit symbol.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Hearts => '♥',
            Self::Diamonds => '♦',
            Self::Clubs => '♣',
            Self::Spades => '♠',
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Card rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Rank {
    /// 2.
    Two,
    /// 3.
    Three,
    /// 4.
    Four,
    /// 5.
    Five,
    /// 6.
    Six,
    /// 7.
    Seven,
    /// 8.
    Eight,
    /// 9.
    Nine,
    /// 10.
    Ten,
    /// Jack.
    Jack,
    /// Queen.
    Queen,
    /// King.
    King,
    /// Ace.
    Ace,
}

impl Rank {
    /// All thirteen ranks, in ascending order.
    pub const ALL: [Self; 13] = [
        Self::Two,
        Self::Three,
        Self::Four,
        Self::Five,
        Self::Six,
        Self::Seven,
        Self::Eight,
        Self::Nine,
        Self::Ten,
        Self::Jack,
        Self::Queen,
        Self::King,
        Self::Ace,
    ];

    /// Returns the single scoring value of the rank (face cards 10, ace 11).
    #[must_use]
    pub const fn face_value(self) -> u8 {
        match self {
            Self::Two => 2,
            Self::Three => 3,
            Self::Four => 4,
            Self::Five => 5,
            Self::Six => 6,
            Self::Seven => 7,
            Self::Eight => 8,
            Self::Nine => 9,
            Self::Ten | Self::Jack | Self::Queen | Self::King => 10,
            Self::Ace => 11,
        }
    }

    /// Returns the blackjack value set of the rank: `{1, 11}` for aces, the
    /// single face value otherwise.
    #[must_use]
    pub const fn values(self) -> &'static [u8] {
        match self {
            Self::Two => &[2],
            Self::Three => &[3],
            Self::Four => &[4],
            Self::Five => &[5],
            Self::Six => &[6],
            Self::Seven => &[7],
            Self::Eight => &[8],
            Self::Nine => &[9],
            Self::Ten | Self::Jack | Self::Queen | Self::King => &[10],
            Self::Ace => &[1, 11],
        }
    }

    /// Returns whether the rank is a jack, queen, king or ace.
    #[must_use]
    pub const fn is_facecard(self) -> bool {
        matches!(self, Self::Jack | Self::Queen | Self::King | Self::Ace)
    }

    /// Returns the short rank label (`"2"`..`"10"`, `"J"`, `"Q"`, `"K"`, `"A"`).
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Two => "2",
            Self::Three => "3",
            Self::Four => "4",
            Self::Five => "5",
            Self::Six => "6",
            Self::Seven => "7",
            Self::Eight => "8",
            Self::Nine => "9",
            Self::Ten => "10",
            Self::Jack => "J",
            Self::Queen => "Q",
            Self::King => "K",
            Self::Ace => "A",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A playing card.
///
/// Equality and hashing use the exact identity of the card (rank and suit).
/// Facing is state, not identity: a face-down ace of spades equals a face-up
/// one. Use [`BlackjackComparer`] for rank equivalence.
#[derive(Debug, Clone, Copy)]
pub struct Card {
    rank: Rank,
    suit: Suit,
    faceup: bool,
}

impl Card {
    /// Creates a new face-up card.
    #[must_use]
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self {
            rank,
            suit,
            faceup: true,
        }
    }

    /// Creates a new face-down card.
    #[must_use]
    pub const fn face_down(rank: Rank, suit: Suit) -> Self {
        Self {
            rank,
            suit,
            faceup: false,
        }
    }

    /// Returns the rank of the card.
    #[must_use]
    pub const fn rank(&self) -> Rank {
        self.rank
    }

    /// Returns the suit of the card.
    #[must_use]
    pub const fn suit(&self) -> Suit {
        self.suit
    }

    /// Returns whether the card is face up.
    #[must_use]
    pub const fn is_faceup(&self) -> bool {
        self.faceup
    }

    /// Turns the card face up.
    pub const fn reveal(&mut self) {
        self.faceup = true;
    }

    /// Turns the card face down.
    pub const fn hide(&mut self) {
        self.faceup = false;
    }

    /// Returns whether the card is a jack, queen, king or ace.
    #[must_use]
    pub const fn is_facecard(&self) -> bool {
        self.rank.is_facecard()
    }

    /// Returns the blackjack value set of the card.
    #[must_use]
    pub fn values(&self) -> &'static [u8] {
        get_values(self)
    }
}

impl PartialEq for Card {
    fn eq(&self, other: &Self) -> bool {
        self.rank == other.rank && self.suit == other.suit
    }
}

impl Eq for Card {}

impl Hash for Card {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rank.hash(state);
        self.suit.hash(state);
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.faceup {
            write!(f, "{}{}", self.rank, self.suit)
        } else {
            f.write_str("??")
        }
    }
}

/// Returns the blackjack value set of a card: `{1, 11}` for aces, the single
/// face value otherwise.
#[must_use]
pub fn get_values(card: &Card) -> &'static [u8] {
    BlackjackComparer::values(card)
}

/// A card comparison and valuation policy.
///
/// Hands and counters are parameterised over a comparer so the same card can
/// be identified and scored differently per game variant.
pub trait CardComparer {
    /// The identity under which two cards are considered equal.
    type Key: Copy + Eq + Hash + fmt::Debug;

    /// Returns the comparison key of a card.
    fn key(card: &Card) -> Self::Key;

    /// Returns every value the card may count as.
    fn values(card: &Card) -> &'static [u8];

    /// Returns whether two cards are equal under this policy.
    fn equals(a: &Card, b: &Card) -> bool {
        Self::key(a) == Self::key(b)
    }

    /// Returns the single highest value of the card.
    fn score(card: &Card) -> u8 {
        Self::values(card).iter().copied().max().unwrap_or(0)
    }
}

/// Exact-identity comparison with plain face-value scoring.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DefaultComparer;

impl CardComparer for DefaultComparer {
    type Key = (Rank, Suit);

    fn key(card: &Card) -> Self::Key {
        (card.rank, card.suit)
    }

    fn values(card: &Card) -> &'static [u8] {
        match card.rank {
            Rank::Ace => &[11],
            rank => rank.values(),
        }
    }
}

/// Rank-based comparison with dual-valued aces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BlackjackComparer;

impl CardComparer for BlackjackComparer {
    type Key = Rank;

    fn key(card: &Card) -> Self::Key {
        card.rank
    }

    fn values(card: &Card) -> &'static [u8] {
        card.rank.values()
    }
}

/// Number of cards per deck.
pub const DECK_SIZE: usize = 52;
