//! Agents: pluggable seat controllers (scripted bots, humans via a front end).
//!
//! The game never reads input itself. When a seat has to decide, the engine
//! asks that seat's `PlayerAgent`; `AgentTable` keeps one agent per seat and
//! paces bots so a UI can show their moves.

use crate::engine::GameEngine;
use crate::game::{Game, GameError, Step, TurnAction};
use std::fmt;
use std::time::{Duration, Instant};

/// Kinds of agents attached to seats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum AgentKind {
    Human,
    Bot,
}

/// Seat-level intents, typically produced by a UI for a human player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Intent {
    Action(TurnAction),
    /// 1-based hand position.
    Discard(usize),
}

/// A seat controller the engine consults when it is that seat's turn.
///
/// Returning `None` means "no decision yet"; the engine leaves the turn open.
pub trait PlayerAgent {
    /// Pick how to start the turn.
    fn choose_action(&mut self, engine: &dyn GameEngine, seat: usize) -> Option<TurnAction>;
    /// Pick a 1-based hand position to discard.
    fn choose_discard(&mut self, engine: &dyn GameEngine, seat: usize) -> Option<usize>;
    /// The kind of this agent (human, bot, etc.).
    fn kind(&self) -> AgentKind {
        AgentKind::Human
    }
    /// Optionally receive an intent; default is to ignore it and return false.
    fn receive(&mut self, _intent: Intent) -> bool {
        false
    }
}

mod scripted;

pub use scripted::{AutoAgent, ScriptedAgent};

/// Plays whatever intents a UI queued for it.
#[derive(Debug, Default)]
pub struct HumanAgent {
    pending_action: Option<TurnAction>,
    pending_discard: Option<usize>,
}

impl HumanAgent {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PlayerAgent for HumanAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::Human
    }
    fn receive(&mut self, intent: Intent) -> bool {
        let slot_taken = match intent {
            Intent::Action(_) => self.pending_action.is_some(),
            Intent::Discard(_) => self.pending_discard.is_some(),
        };
        if slot_taken {
            return false;
        }
        match intent {
            Intent::Action(a) => self.pending_action = Some(a),
            Intent::Discard(i) => self.pending_discard = Some(i),
        }
        true
    }
    fn choose_action(&mut self, engine: &dyn GameEngine, seat: usize) -> Option<TurnAction> {
        if engine.current() != seat {
            return None;
        }
        self.pending_action.take()
    }
    fn choose_discard(&mut self, engine: &dyn GameEngine, seat: usize) -> Option<usize> {
        if engine.current() != seat {
            return None;
        }
        self.pending_discard.take()
    }
}

/// The agents sitting at the table, at most one per seat, plus the pacing
/// that keeps bots from moving faster than a person can follow.
pub struct AgentTable {
    seats: Vec<Option<Box<dyn PlayerAgent>>>,
    bot_delay: Duration,
    bot_ready_at: Option<Instant>,
}

impl fmt::Debug for AgentTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AgentTable(")?;
        for seat in 0..self.seats.len() {
            let flag = match self.agent_kind(seat) {
                Some(AgentKind::Human) => 'H',
                Some(AgentKind::Bot) => 'B',
                None => '-',
            };
            write!(f, "{flag}")?;
        }
        f.write_str(")")
    }
}

impl AgentTable {
    /// `n` empty seats.
    pub fn for_seats(n: usize) -> Self {
        Self { seats: (0..n).map(|_| None).collect(), bot_delay: Duration::ZERO, bot_ready_at: None }
    }

    /// Every seat played by an [`AutoAgent`].
    pub fn autoplay(n: usize) -> Self {
        let mut table = Self::for_seats(n);
        for seat in 0..n {
            table.set_agent(seat, Some(Box::new(AutoAgent::new())));
        }
        table
    }

    /// Seat 0 gets `human`, every other seat an [`AutoAgent`].
    pub fn human_vs_auto(n: usize, human: Box<dyn PlayerAgent>) -> Self {
        let mut table = Self::autoplay(n);
        table.set_agent(0, Some(human));
        table
    }

    pub fn len(&self) -> usize {
        self.seats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    /// Add empty seats or drop trailing ones until there are exactly `n`.
    pub fn ensure_len(&mut self, n: usize) {
        self.seats.resize_with(n, || None);
    }

    /// Seat `agent` (or empty the seat with `None`), growing the table if needed.
    pub fn set_agent(&mut self, seat: usize, agent: Option<Box<dyn PlayerAgent>>) {
        if seat >= self.seats.len() {
            self.ensure_len(seat + 1);
        }
        self.seats[seat] = agent;
    }

    pub fn agent(&self, seat: usize) -> Option<&dyn PlayerAgent> {
        self.seats.get(seat)?.as_deref()
    }

    pub fn agent_mut(&mut self, seat: usize) -> Option<&mut (dyn PlayerAgent + 'static)> {
        self.seats.get_mut(seat)?.as_deref_mut()
    }

    pub fn agent_kind(&self, seat: usize) -> Option<AgentKind> {
        self.agent(seat).map(|ag| ag.kind())
    }

    /// Hand an intent to the agent at `seat`; false if nobody took it.
    pub fn receive(&mut self, seat: usize, intent: Intent) -> bool {
        self.agent_mut(seat).is_some_and(|agent| agent.receive(intent))
    }

    /// Minimum time between a move and the next bot move. 0 disables pacing.
    pub fn set_min_action_delay_ms(&mut self, delay_ms: u64) {
        self.bot_delay = Duration::from_millis(delay_ms);
    }

    /// Advance the game by one decision of the current seat. A bot that is
    /// still inside the pacing window is reported as `Waiting`.
    pub fn on_turn(&mut self, game: &mut Game) -> Result<Step, GameError> {
        let seat = game.current();
        let is_bot = matches!(self.agent_kind(seat), Some(AgentKind::Bot));
        let paced = self.bot_ready_at.is_some_and(|ready| Instant::now() < ready);
        if is_bot && paced && !game.is_game_over() {
            return Ok(Step::Waiting { seat });
        }
        let step = game.step(self)?;
        let moved = matches!(step, Step::AwaitingDiscard { .. } | Step::TurnEnded(_));
        if moved && !self.bot_delay.is_zero() {
            self.bot_ready_at = Some(Instant::now() + self.bot_delay);
        }
        Ok(step)
    }
}
