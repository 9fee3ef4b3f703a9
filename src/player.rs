use crate::cards::Card;
use crate::deck::{Deck, DeckError};
use crate::scoring;

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum DiscardError {
    #[error("invalid index {index}: choose 1 to {len}")]
    InvalidIndex { index: usize, len: usize },
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum MeldError {
    #[error("a meld needs at least one card")]
    Empty,
    #[error("invalid index {index}: choose 1 to {len}")]
    InvalidIndex { index: usize, len: usize },
    #[error("card {0} selected more than once")]
    DuplicateIndex(usize),
}

/// One seat's cards: the hand, the melds set aside and the discard pile.
///
/// A card sits in exactly one of the three; every move between them happens
/// in a single call.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct Player {
    pub(crate) name: String,
    pub(crate) hand: Vec<Card>,
    pub(crate) melds: Vec<Vec<Card>>,
    pub(crate) discard_pile: Vec<Card>,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), hand: Vec::new(), melds: Vec::new(), discard_pile: Vec::new() }
    }

    /// Returns the player's name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Cards currently held, in draw order
    pub fn hand(&self) -> &[Card] {
        &self.hand
    }

    pub fn melds(&self) -> &[Vec<Card>] {
        &self.melds
    }

    /// Discarded cards, oldest first
    pub fn discard_pile(&self) -> &[Card] {
        &self.discard_pile
    }

    /// Take the top card of `deck` into the hand.
    pub fn draw(&mut self, deck: &mut Deck) -> Result<Card, DeckError> {
        let card = deck.draw()?;
        self.hand.push(card);
        Ok(card)
    }

    /// Move the card at 1-based `index` from the hand to the discard pile.
    ///
    /// ```
    /// use rummy_rs::deck::Deck;
    /// use rummy_rs::player::Player;
    ///
    /// let mut deck = Deck::standard();
    /// let mut p = Player::new("P1");
    /// let card = p.draw(&mut deck).unwrap();
    /// assert_eq!(p.discard(1).unwrap(), card);
    /// assert!(p.discard(1).is_err());
    /// ```
    pub fn discard(&mut self, index: usize) -> Result<Card, DiscardError> {
        let len = self.hand.len();
        if index == 0 || index > len {
            return Err(DiscardError::InvalidIndex { index, len });
        }
        let card = self.hand.remove(index - 1);
        self.discard_pile.push(card);
        Ok(card)
    }

    /// Append a group of cards as a meld. Legality is not checked.
    pub fn add_meld(&mut self, meld: Vec<Card>) {
        self.melds.push(meld);
    }

    /// Move the cards at the given 1-based hand positions into a new meld.
    /// Nothing changes unless every index is valid and distinct.
    pub fn meld_from_hand(&mut self, indices: &[usize]) -> Result<&[Card], MeldError> {
        if indices.is_empty() {
            return Err(MeldError::Empty);
        }
        let len = self.hand.len();
        let mut sorted = indices.to_vec();
        sorted.sort_unstable();
        for w in sorted.windows(2) {
            if w[0] == w[1] {
                return Err(MeldError::DuplicateIndex(w[0]));
            }
        }
        if let Some(&index) = sorted.iter().find(|&&i| i == 0 || i > len) {
            return Err(MeldError::InvalidIndex { index, len });
        }
        let meld: Vec<Card> = indices.iter().map(|&i| self.hand[i - 1]).collect();
        // Remove from the back so earlier positions stay valid.
        for &i in sorted.iter().rev() {
            self.hand.remove(i - 1);
        }
        self.melds.push(meld);
        Ok(self.melds.last().map(Vec::as_slice).unwrap_or_default())
    }

    /// True iff at least one non-empty meld has been laid down.
    pub fn has_meld(&self) -> bool {
        self.melds.iter().any(|m| !m.is_empty())
    }

    /// Points for cards in hand and melds; the discard pile does not count.
    pub fn score(&self) -> u32 {
        scoring::score_player(self)
    }
}
