use crate::cards::{Card, Rank, Suit};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Drawing from an exhausted deck. The turn loop checks emptiness before every
/// draw, so seeing this means the caller broke that contract.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum DeckError {
    #[error("the deck is empty")]
    Empty,
}

/// A standard 52-card deck. Cards leave from the end of the sequence (the top)
/// and never come back.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// One card per suit and rank, suit-major, unshuffled.
    ///
    /// ```
    /// use rummy_rs::deck::Deck;
    ///
    /// let deck = Deck::standard();
    /// assert_eq!(deck.len(), 52);
    /// ```
    pub fn standard() -> Self {
        let mut cards = Vec::with_capacity(52);
        for &s in &Suit::ALL {
            for &r in &Rank::STANDARD {
                cards.push(Card::new(r, s));
            }
        }
        Self { cards }
    }

    /// A standard deck shuffled from fresh entropy. Orders differ between runs.
    pub fn new() -> Self {
        let seed: u64 = rand::rng().random();
        Self::seeded(seed)
    }

    /// A standard deck shuffled with a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        let mut deck = Self::standard();
        deck.shuffle_seeded(seed);
        deck
    }

    /// A standard deck shuffled by the caller's RNG.
    pub fn shuffled_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Self::standard();
        deck.shuffle_with(rng);
        deck
    }

    /// Build a deck from explicit cards; the last element is the top.
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Remaining cards, bottom first.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Shuffle using a seeded RNG for reproducibility.
    pub fn shuffle_seeded(&mut self, seed: u64) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        self.cards.shuffle(&mut rng);
    }

    /// Shuffle using the provided RNG implementing Rng.
    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    /// Draw one card from the top of the deck.
    pub fn draw(&mut self) -> Result<Card, DeckError> {
        self.cards.pop().ok_or(DeckError::Empty)
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn standard_deck_has_52_unique_cards() {
        let d = Deck::standard();
        assert_eq!(d.len(), 52);
        let unique: HashSet<Card> = d.cards().iter().copied().collect();
        assert_eq!(unique.len(), 52);
        assert!(d.cards().iter().all(|c| c.rank() != Rank::Wild));
    }

    #[test]
    fn seeded_shuffle_is_reproducible() {
        let d1 = Deck::seeded(42);
        let d2 = Deck::seeded(42);
        assert_eq!(d1.cards, d2.cards);
        assert_ne!(d1.cards, Deck::standard().cards);
    }

    #[test]
    fn injected_rng_matches_seeded() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        assert_eq!(Deck::shuffled_with(&mut rng).cards, Deck::seeded(9).cards);
    }

    #[test]
    fn draw_takes_from_the_top() {
        let mut d = Deck::standard();
        let top = *d.cards().last().unwrap();
        assert_eq!(d.draw().unwrap(), top);
        assert_eq!(d.len(), 51);
    }

    #[test]
    fn drawing_past_the_end_is_an_error() {
        let mut d = Deck::from_cards(vec![Card::new(Rank::Two, Suit::Clubs)]);
        assert!(d.draw().is_ok());
        assert!(d.is_empty());
        assert_eq!(d.draw(), Err(DeckError::Empty));
        assert!(d.is_empty());
    }
}
