//! End-of-game scoring.
//!
//! Every card left in a hand or laid down in a meld counts against its owner;
//! discarded cards are gone. The lowest total wins, and ties go to the earlier
//! seat.

use crate::cards::Card;
use crate::player::Player;
use std::fmt;

/// Point value of a single card.
pub const fn card_value(card: Card) -> u32 {
    card.points()
}

/// Sum of card values; independent of order.
pub fn score_cards<'a>(cards: impl IntoIterator<Item = &'a Card>) -> u32 {
    cards.into_iter().map(|&c| card_value(c)).sum()
}

/// Hand plus every meld.
pub fn score_player(player: &Player) -> u32 {
    score_cards(player.hand()) + player.melds().iter().map(|m| score_cards(m)).sum::<u32>()
}

/// Seat and score of the strictly lowest score, scanning left to right so the
/// first seat holding the minimum keeps it.
///
/// ```
/// use rummy_rs::scoring::winner;
///
/// assert_eq!(winner(&[47, 52]), Some((0, 47)));
/// assert_eq!(winner(&[52, 40, 40]), Some((1, 40)));
/// assert_eq!(winner(&[]), None);
/// ```
pub fn winner(scores: &[u32]) -> Option<(usize, u32)> {
    let mut best: Option<(usize, u32)> = None;
    for (seat, &score) in scores.iter().enumerate() {
        match best {
            Some((_, low)) if score >= low => {}
            _ => best = Some((seat, score)),
        }
    }
    best
}

/// Final standings, one score per seat.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[non_exhaustive]
pub struct ScoreReport {
    pub scores: Vec<u32>,
    pub winner: usize,
    pub winning_score: u32,
}

impl ScoreReport {
    /// `None` when there are no seats to rank.
    pub fn from_scores(scores: Vec<u32>) -> Option<Self> {
        let (winner, winning_score) = winner(&scores)?;
        Some(Self { scores, winner, winning_score })
    }

    /// Scores every hand and meld, then ranks them.
    pub fn from_players(players: &[Player]) -> Option<Self> {
        Self::from_scores(players.iter().map(score_player).collect())
    }
}

impl fmt::Display for ScoreReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Scores:")?;
        for (seat, score) in self.scores.iter().enumerate() {
            writeln!(f, "Player {}: {} points", seat + 1, score)?;
        }
        writeln!(f)?;
        write!(f, "Player {} wins with {} points!", self.winner + 1, self.winning_score)
    }
}
