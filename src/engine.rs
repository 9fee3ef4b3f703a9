// Game engine API boundary. Agents and UIs (console, TUI) see the game only
// through this trait: read-only queries to decide on a move, plus the two
// turn operations. It is implemented for the core `Game` type.

use crate::cards::Card;
use crate::game::{Game, GameError, Phase, Step, TurnAction};

pub trait GameEngine {
    // Turn operations
    fn apply_action(&mut self, action: TurnAction) -> Result<Step, GameError>;
    fn apply_discard(&mut self, index: usize) -> Result<Step, GameError>;

    // Queries
    fn num_players(&self) -> usize;
    fn current(&self) -> usize;
    fn phase(&self) -> Phase;
    fn hand(&self, seat: usize) -> &[Card];
    fn melds(&self, seat: usize) -> &[Vec<Card>];
    fn discard_pile(&self, seat: usize) -> &[Card];
    fn deck_len(&self) -> usize;
    fn hand_limit(&self) -> Option<usize>;
    fn is_game_over(&self) -> bool;
    fn calculate_score(&self, seat: usize) -> u32;
}

impl GameEngine for Game {
    fn apply_action(&mut self, action: TurnAction) -> Result<Step, GameError> {
        self.apply_action(action)
    }
    fn apply_discard(&mut self, index: usize) -> Result<Step, GameError> {
        self.apply_discard(index)
    }

    fn num_players(&self) -> usize {
        self.players.len()
    }
    fn current(&self) -> usize {
        self.current
    }
    fn phase(&self) -> Phase {
        self.phase
    }
    fn hand(&self, seat: usize) -> &[Card] {
        self.players.get(seat).map(|p| p.hand()).unwrap_or(&[])
    }
    fn melds(&self, seat: usize) -> &[Vec<Card>] {
        self.players.get(seat).map(|p| p.melds()).unwrap_or(&[])
    }
    fn discard_pile(&self, seat: usize) -> &[Card] {
        self.players.get(seat).map(|p| p.discard_pile()).unwrap_or(&[])
    }
    fn deck_len(&self) -> usize {
        self.deck.len()
    }
    fn hand_limit(&self) -> Option<usize> {
        self.config.hand_limit
    }
    fn is_game_over(&self) -> bool {
        self.is_game_over()
    }
    fn calculate_score(&self, seat: usize) -> u32 {
        self.calculate_score(seat)
    }
}
