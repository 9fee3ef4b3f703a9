use std::fmt::{self, Write as _};
use std::str::FromStr;

/// Card ranks from Ace (low) to King, plus an optional Wild rank.
///
/// The discriminant is the face number; point values live in [`Rank::points`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Rank {
    Ace = 1,
    Two = 2,
    Three = 3,
    Four = 4,
    Five = 5,
    Six = 6,
    Seven = 7,
    Eight = 8,
    Nine = 9,
    Ten = 10,
    Jack = 11,
    Queen = 12,
    King = 13,
    Wild = 14,
}

impl Rank {
    /// The thirteen ranks of a standard deck. `Wild` is not part of it.
    pub const STANDARD: [Rank; 13] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ];

    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Scoring value: Ace 1, pips at face value, court cards 10, Wild 25.
    pub const fn points(self) -> u32 {
        match self {
            Rank::Ace => 1,
            Rank::Jack | Rank::Queen | Rank::King => 10,
            Rank::Wild => 25,
            pip => pip as u32,
        }
    }

    /// Inverse of [`Rank::value`].
    pub const fn from_value(v: u8) -> Option<Rank> {
        match v {
            1..=13 => Some(Self::STANDARD[v as usize - 1]),
            14 => Some(Rank::Wild),
            _ => None,
        }
    }

    pub const fn to_char(self) -> char {
        RANK_SYMBOLS[self as usize]
    }

    fn from_symbol(c: char) -> Option<Rank> {
        let c = c.to_ascii_uppercase();
        if c == '1' {
            return Some(Rank::Ace);
        }
        let v = RANK_SYMBOLS.iter().skip(1).position(|&sym| sym == c)?;
        Self::from_value(v as u8 + 1)
    }
}

// Indexed by discriminant; slot 0 has no rank.
const RANK_SYMBOLS: [char; 15] =
    ['?', 'A', '2', '3', '4', '5', '6', '7', '8', '9', 'T', 'J', 'Q', 'K', 'W'];

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char(self.to_char())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RankParseError {
    #[error("unknown rank {0:?}")]
    Unknown(String),
}

impl FromStr for Rank {
    type Err = RankParseError;

    /// One symbol (`A`, `2`..`9`, `T`, `J`, `Q`, `K`, `W`, `1` for Ace) or `10`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || RankParseError::Unknown(s.to_string());
        let t = s.trim();
        if t == "10" {
            return Ok(Rank::Ten);
        }
        let mut chars = t.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Rank::from_symbol(c).ok_or_else(unknown),
            _ => Err(unknown()),
        }
    }
}

impl TryFrom<char> for Rank {
    type Error = RankParseError;
    fn try_from(c: char) -> Result<Self, Self::Error> {
        Rank::from_symbol(c).ok_or_else(|| RankParseError::Unknown(c.to_string()))
    }
}

/// Four suits in deck-construction order: Hearts, Diamonds, Clubs, Spades.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Suit {
    Hearts,
    Diamonds,
    Clubs,
    Spades,
}

const SUIT_SYMBOLS: [char; 4] = ['H', 'D', 'C', 'S'];
const SUIT_NAMES: [&str; 4] = ["hearts", "diamonds", "clubs", "spades"];

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];

    pub const fn to_char(self) -> char {
        SUIT_SYMBOLS[self as usize]
    }

    pub const fn name(self) -> &'static str {
        SUIT_NAMES[self as usize]
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char(self.to_char())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SuitParseError {
    #[error("unknown suit {0:?}")]
    Unknown(String),
}

impl FromStr for Suit {
    type Err = SuitParseError;

    /// A symbol (`H`, `D`, `C`, `S`) or the full name, any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        let mut chars = t.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Suit::try_from(c);
        }
        Suit::ALL
            .into_iter()
            .find(|suit| suit.name().eq_ignore_ascii_case(t))
            .ok_or_else(|| SuitParseError::Unknown(s.to_string()))
    }
}

impl TryFrom<char> for Suit {
    type Error = SuitParseError;
    fn try_from(c: char) -> Result<Self, Self::Error> {
        let c = c.to_ascii_uppercase();
        Suit::ALL
            .into_iter()
            .find(|suit| suit.to_char() == c)
            .ok_or_else(|| SuitParseError::Unknown(c.to_string()))
    }
}

/// A playing card: suit + rank. Two cards are equal iff both match.
///
/// Displayed suit first, the way the table prints it:
///
/// ```
/// use rummy_rs::cards::{Card, Rank, Suit};
///
/// let card = Card::new(Rank::Ace, Suit::Hearts);
/// assert_eq!(card.to_string(), "HA");
/// assert_eq!(card.points(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Card {
    suit: Suit,
    rank: Rank,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { suit, rank }
    }

    pub const fn rank(self) -> Rank {
        self.rank
    }

    pub const fn suit(self) -> Suit {
        self.suit
    }

    pub const fn points(self) -> u32 {
        self.rank.points()
    }

    /// Two-character code, suit then rank (`"S7"`, `"HT"`).
    pub fn code(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char(self.suit.to_char())?;
        f.write_char(self.rank.to_char())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CardParseError {
    #[error("expected a suit followed by a rank, got {0:?}")]
    Malformed(String),
    #[error(transparent)]
    Rank(#[from] RankParseError),
    #[error(transparent)]
    Suit(#[from] SuitParseError),
}

impl FromStr for Card {
    type Err = CardParseError;

    /// Suit symbol then rank, the same shape [`Card::code`] produces (`"D10"`
    /// is accepted too).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        let split = t.char_indices().nth(1).map(|(i, _)| i);
        match split {
            Some(i) => {
                let (suit, rank) = t.split_at(i);
                Ok(Card::new(rank.parse()?, suit.parse()?))
            }
            None => Err(CardParseError::Malformed(s.to_string())),
        }
    }
}

/// Parse multiple cards separated by whitespace or commas.
///
/// ```
/// use rummy_rs::cards::{parse_cards, Card, Rank, Suit};
///
/// let cards = parse_cards("HA, DK S10").unwrap();
/// assert_eq!(cards[0], Card::new(Rank::Ace, Suit::Hearts));
/// assert_eq!(cards[1], Card::new(Rank::King, Suit::Diamonds));
/// assert_eq!(cards[2], Card::new(Rank::Ten, Suit::Spades));
/// ```
pub fn parse_cards(input: &str) -> Result<Vec<Card>, CardParseError> {
    input
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(Card::from_str)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rank_display_and_from_str() {
        assert_eq!(Rank::Ace.to_string(), "A");
        assert_eq!(Rank::from_str("T").unwrap(), Rank::Ten);
        assert_eq!(Rank::from_str("10").unwrap(), Rank::Ten);
        assert_eq!(Rank::from_str("w").unwrap(), Rank::Wild);
        assert!(Rank::from_str("11").is_err());
        assert!(Rank::from_str("X").is_err());
    }

    #[test]
    fn suit_display_and_from_str() {
        assert_eq!(Suit::Spades.to_string(), "S");
        assert_eq!(Suit::from_str("h").unwrap(), Suit::Hearts);
        assert_eq!(Suit::from_str("Clubs").unwrap(), Suit::Clubs);
        assert!(Suit::from_str("x").is_err());
    }

    #[test]
    fn card_display_and_from_str() {
        let c = Card::new(Rank::Seven, Suit::Spades);
        assert_eq!(c.to_string(), "S7");
        assert_eq!(c.code(), "S7");
        assert_eq!(Card::from_str("S7").unwrap(), c);
        assert_eq!(Card::from_str("d10").unwrap(), Card::new(Rank::Ten, Suit::Diamonds));
        assert!(Card::from_str("S").is_err());
        assert!(Card::from_str("Z7").is_err());
    }

    #[test]
    fn equality_needs_suit_and_rank() {
        let a = Card::new(Rank::Queen, Suit::Hearts);
        assert_eq!(a, Card::new(Rank::Queen, Suit::Hearts));
        assert_ne!(a, Card::new(Rank::Queen, Suit::Clubs));
        assert_ne!(a, Card::new(Rank::King, Suit::Hearts));
    }

    #[test]
    fn value_round_trips() {
        for v in 1..=14 {
            assert_eq!(Rank::from_value(v).map(Rank::value), Some(v));
        }
        assert_eq!(Rank::from_value(0), None);
        assert_eq!(Rank::from_value(15), None);
    }

    #[test]
    fn point_table() {
        let expected = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 10, 10, 10];
        for (rank, pts) in Rank::STANDARD.iter().zip(expected) {
            assert_eq!(rank.points(), pts, "{rank:?}");
        }
        assert_eq!(Rank::Wild.points(), 25);
    }
}
