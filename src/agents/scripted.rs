use std::collections::VecDeque;

use crate::engine::GameEngine;
use crate::game::TurnAction;

use super::{AgentKind, PlayerAgent};

/// The fixed opponent: every turn it draws, then throws away the card in a
/// fixed hand position (the first one by default).
#[derive(Debug, Clone)]
pub struct AutoAgent {
    discard_index: usize,
}

impl AutoAgent {
    pub fn new() -> Self {
        Self { discard_index: 1 }
    }

    /// Discard from this 1-based position instead, clamped to the hand.
    pub fn with_discard_index(mut self, index: usize) -> Self {
        self.discard_index = index.max(1);
        self
    }
}

impl Default for AutoAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerAgent for AutoAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::Bot
    }
    fn choose_action(&mut self, _engine: &dyn GameEngine, _seat: usize) -> Option<TurnAction> {
        Some(TurnAction::DrawDiscard)
    }
    fn choose_discard(&mut self, engine: &dyn GameEngine, seat: usize) -> Option<usize> {
        let len = engine.hand(seat).len();
        if len == 0 {
            return None;
        }
        Some(self.discard_index.min(len))
    }
}

/// Replays a fixed list of decisions, then repeats the fallback (if any).
/// Handy for driving the engine deterministically in tests and benchmarks.
#[derive(Debug, Clone, Default)]
pub struct ScriptedAgent {
    actions: VecDeque<TurnAction>,
    discards: VecDeque<usize>,
    fallback_action: Option<TurnAction>,
    fallback_discard: Option<usize>,
}

impl ScriptedAgent {
    pub fn new(
        actions: impl IntoIterator<Item = TurnAction>,
        discards: impl IntoIterator<Item = usize>,
    ) -> Self {
        Self {
            actions: actions.into_iter().collect(),
            discards: discards.into_iter().collect(),
            fallback_action: None,
            fallback_discard: None,
        }
    }

    /// Always answer with `action`, and `discard` when a discard is owed.
    pub fn always(action: TurnAction, discard: Option<usize>) -> Self {
        Self { fallback_action: Some(action), fallback_discard: discard, ..Self::default() }
    }

    /// Remaining scripted (non-fallback) decisions.
    pub fn remaining(&self) -> usize {
        self.actions.len() + self.discards.len()
    }
}

impl PlayerAgent for ScriptedAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::Bot
    }
    fn choose_action(&mut self, _engine: &dyn GameEngine, _seat: usize) -> Option<TurnAction> {
        self.actions.pop_front().or(self.fallback_action)
    }
    fn choose_discard(&mut self, _engine: &dyn GameEngine, _seat: usize) -> Option<usize> {
        self.discards.pop_front().or(self.fallback_discard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Game, GameConfig};

    #[test]
    fn auto_agent_draws_then_discards_first_card() {
        let g = Game::new(GameConfig::default().with_seed(1)).unwrap();
        let mut bot = AutoAgent::new();
        assert_eq!(bot.choose_action(&g, 1), Some(TurnAction::DrawDiscard));
        assert_eq!(bot.choose_discard(&g, 1), Some(1));
        let mut far = AutoAgent::new().with_discard_index(40);
        assert_eq!(far.choose_discard(&g, 1), Some(10));
    }

    #[test]
    fn scripted_agent_replays_then_falls_back() {
        let g = Game::new(GameConfig::default().with_seed(1)).unwrap();
        let mut s = ScriptedAgent::new([TurnAction::Discard], [4]);
        assert_eq!(s.remaining(), 2);
        assert_eq!(s.choose_action(&g, 0), Some(TurnAction::Discard));
        assert_eq!(s.choose_action(&g, 0), None);
        assert_eq!(s.choose_discard(&g, 0), Some(4));
        assert_eq!(s.choose_discard(&g, 0), None);

        let mut always = ScriptedAgent::always(TurnAction::Draw, None);
        assert_eq!(always.choose_action(&g, 0), Some(TurnAction::Draw));
        assert_eq!(always.choose_action(&g, 0), Some(TurnAction::Draw));
        assert_eq!(always.choose_discard(&g, 0), None);
    }
}
