use crate::agents::AgentTable;
use crate::cards::Card;
use crate::deck::{Deck, DeckError};
use crate::player::{DiscardError, Player};
use crate::scoring::{self, ScoreReport};
use tracing::{debug, info, warn};

/// Cards dealt to each seat before the first turn.
pub const INITIAL_HAND_SIZE: usize = 10;
/// Default hand size above which a drawing player must discard.
pub const DEFAULT_HAND_LIMIT: usize = 10;
/// Rejected decisions in a row a host retries before giving up on a seat.
pub const MAX_REJECTED_DECISIONS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Phase {
    /// The current seat picks a [`TurnAction`].
    AwaitingAction,
    /// The current seat must name a card to discard to finish the turn.
    AwaitingDiscard,
    GameOver,
}

/// What a seat does with its turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum TurnAction {
    /// Draw one card. A discard follows only if the hand goes over the limit.
    Draw,
    /// Draw one card, then always discard one.
    DrawDiscard,
    /// Skip the draw and discard one card.
    Discard,
}

impl TurnAction {
    pub fn label(self) -> &'static str {
        match self {
            TurnAction::Draw => "Draw",
            TurnAction::DrawDiscard => "Draw + discard",
            TurnAction::Discard => "Discard",
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ActionError {
    #[error("the game is over")]
    GameOver,
    #[error("a discard is required to finish the turn")]
    DiscardPending,
    #[error("no discard was requested")]
    NoDiscardPending,
    #[error("cannot discard from an empty hand")]
    EmptyHand,
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("a game needs at least one player")]
    NoPlayers,
    #[error("dealing needs {needed} cards but the deck holds {available}")]
    NotEnoughCards { needed: usize, available: usize },
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum GameError {
    /// A draw hit an empty deck. Unrecoverable: the engine drew when it
    /// should have ended the game.
    #[error(transparent)]
    Deck(#[from] DeckError),
    #[error(transparent)]
    Discard(#[from] DiscardError),
    #[error(transparent)]
    Action(#[from] ActionError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("no agent controls seat {seat}")]
    NoAgent { seat: usize },
    #[error("agent for seat {seat} gave no decision")]
    Stalled { seat: usize },
}

impl GameError {
    /// Whether the error means the game state can no longer be trusted.
    pub fn is_fatal(&self) -> bool {
        matches!(self, GameError::Deck(_))
    }

    /// A rejected choice: the state is unchanged and the seat may try again.
    pub fn is_retryable(&self) -> bool {
        matches!(self, GameError::Action(_) | GameError::Discard(_))
    }
}

/// Game settings. `hand_limit: None` lets hands grow without a forced discard.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct GameConfig {
    pub num_players: usize,
    pub initial_hand_size: usize,
    pub hand_limit: Option<usize>,
    /// Fixed shuffle seed; `None` shuffles from fresh entropy.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            num_players: 2,
            initial_hand_size: INITIAL_HAND_SIZE,
            hand_limit: Some(DEFAULT_HAND_LIMIT),
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn with_players(mut self, n: usize) -> Self {
        self.num_players = n;
        self
    }

    pub fn with_hand_limit(mut self, limit: Option<usize>) -> Self {
        self.hand_limit = limit;
        self
    }

    pub fn with_initial_hand_size(mut self, n: usize) -> Self {
        self.initial_hand_size = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check that every seat can be dealt from a deck of `deck_len` cards.
    pub fn validate(&self, deck_len: usize) -> Result<(), ConfigError> {
        if self.num_players == 0 {
            return Err(ConfigError::NoPlayers);
        }
        let needed = self.num_players.saturating_mul(self.initial_hand_size);
        if needed > deck_len {
            return Err(ConfigError::NotEnoughCards { needed, available: deck_len });
        }
        Ok(())
    }
}

/// One completed turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub struct TurnRecord {
    /// 0-based count of turns before this one.
    pub turn: usize,
    pub seat: usize,
    pub drawn: Option<Card>,
    pub discarded: Option<Card>,
}

/// Result of advancing the game by one decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Step {
    /// The seat's agent has not decided yet.
    Waiting { seat: usize },
    /// The action was applied and the seat now owes a discard.
    AwaitingDiscard { seat: usize, drawn: Option<Card> },
    TurnEnded(TurnRecord),
    Finished,
}

#[derive(Debug)]
#[non_exhaustive]
pub struct Game {
    pub(crate) config: GameConfig,
    pub(crate) deck: Deck,
    pub(crate) players: Vec<Player>,
    pub(crate) current: usize,
    pub(crate) phase: Phase,
    turns: usize,
    pending_draw: Option<Card>,
    history: Vec<TurnRecord>,
}

impl Game {
    /// Create the seats, shuffle a fresh deck and deal.
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        let deck = match config.seed {
            Some(seed) => Deck::seeded(seed),
            None => Deck::new(),
        };
        Self::with_deck(config, deck)
    }

    /// Like [`Game::new`] but deals from the given deck as-is.
    pub fn with_deck(config: GameConfig, deck: Deck) -> Result<Self, GameError> {
        config.validate(deck.len())?;
        let players = (1..=config.num_players).map(|i| Player::new(format!("Player {i}"))).collect();
        let mut game = Self {
            config,
            deck,
            players,
            current: 0,
            phase: Phase::AwaitingAction,
            turns: 0,
            pending_draw: None,
            history: Vec::new(),
        };
        game.deal_initial_hands()?;
        Ok(game)
    }

    // Seat by seat: player 0 takes its whole hand before player 1 starts.
    fn deal_initial_hands(&mut self) -> Result<(), DeckError> {
        for p in &mut self.players {
            for _ in 0..self.config.initial_hand_size {
                p.draw(&mut self.deck)?;
            }
        }
        if self.deck.is_empty() {
            self.phase = Phase::GameOver;
        }
        info!(
            players = self.players.len(),
            hand = self.config.initial_hand_size,
            deck = self.deck.len(),
            "dealt initial hands"
        );
        Ok(())
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Returns a reference to the players
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, seat: usize) -> Option<&Player> {
        self.players.get(seat)
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// Returns the current player index
    pub fn current(&self) -> usize {
        self.current
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Completed turns so far.
    pub fn turns(&self) -> usize {
        self.turns
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self.phase, Phase::GameOver)
    }

    pub fn history_recent(&self, n: usize) -> Vec<TurnRecord> {
        let start = self.history.len().saturating_sub(n);
        self.history[start..].to_vec()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Score of one seat; 0 for a seat that does not exist.
    pub fn calculate_score(&self, seat: usize) -> u32 {
        self.players.get(seat).map(scoring::score_player).unwrap_or(0)
    }

    pub fn scores(&self) -> Vec<u32> {
        self.players.iter().map(scoring::score_player).collect()
    }

    /// Standings as they are now; final once the game is over.
    pub fn report(&self) -> ScoreReport {
        ScoreReport::from_players(&self.players).unwrap_or_default()
    }

    fn over_limit(&self, seat: usize) -> bool {
        match self.config.hand_limit {
            Some(limit) => self.players[seat].hand.len() > limit,
            None => false,
        }
    }

    /// Start the current seat's turn.
    pub fn apply_action(&mut self, action: TurnAction) -> Result<Step, GameError> {
        match self.phase {
            Phase::GameOver => return Err(ActionError::GameOver.into()),
            Phase::AwaitingDiscard => return Err(ActionError::DiscardPending.into()),
            Phase::AwaitingAction => {}
        }
        let seat = self.current;
        debug!(seat, action = action.label(), "turn start");
        match action {
            TurnAction::Draw | TurnAction::DrawDiscard => {
                let card = self.players[seat].draw(&mut self.deck)?;
                debug!(seat, card = %card, remaining = self.deck.len(), "draw");
                self.pending_draw = Some(card);
                if matches!(action, TurnAction::DrawDiscard) || self.over_limit(seat) {
                    self.phase = Phase::AwaitingDiscard;
                    return Ok(Step::AwaitingDiscard { seat, drawn: Some(card) });
                }
                Ok(Step::TurnEnded(self.end_turn(None)))
            }
            TurnAction::Discard => {
                if self.players[seat].hand.is_empty() {
                    return Err(ActionError::EmptyHand.into());
                }
                self.phase = Phase::AwaitingDiscard;
                Ok(Step::AwaitingDiscard { seat, drawn: None })
            }
        }
    }

    /// Finish the current seat's turn by discarding the card at 1-based
    /// `index`. An invalid index leaves the turn waiting for another try.
    pub fn apply_discard(&mut self, index: usize) -> Result<Step, GameError> {
        match self.phase {
            Phase::GameOver => return Err(ActionError::GameOver.into()),
            Phase::AwaitingAction => return Err(ActionError::NoDiscardPending.into()),
            Phase::AwaitingDiscard => {}
        }
        let seat = self.current;
        let card = match self.players[seat].discard(index) {
            Ok(card) => card,
            Err(err) => {
                warn!(seat, %err, "rejected discard");
                return Err(err.into());
            }
        };
        debug!(seat, card = %card, "discard");
        Ok(Step::TurnEnded(self.end_turn(Some(card))))
    }

    fn end_turn(&mut self, discarded: Option<Card>) -> TurnRecord {
        let record = TurnRecord {
            turn: self.turns,
            seat: self.current,
            drawn: self.pending_draw.take(),
            discarded,
        };
        self.history.push(record);
        self.turns += 1;
        self.current = (self.current + 1) % self.players.len();
        if self.deck.is_empty() {
            self.phase = Phase::GameOver;
            info!(turns = self.turns, "deck exhausted, game over");
        } else {
            self.phase = Phase::AwaitingAction;
        }
        record
    }

    /// Ask the current seat's agent for the decision the phase needs and apply it.
    pub fn step(&mut self, agents: &mut AgentTable) -> Result<Step, GameError> {
        let seat = self.current;
        if self.is_game_over() {
            return Ok(Step::Finished);
        }
        let agent = agents.agent_mut(seat).ok_or(GameError::NoAgent { seat })?;
        match self.phase {
            Phase::AwaitingAction => match agent.choose_action(&*self, seat) {
                Some(action) => self.apply_action(action),
                None => Ok(Step::Waiting { seat }),
            },
            Phase::AwaitingDiscard => match agent.choose_discard(&*self, seat) {
                Some(index) => self.apply_discard(index),
                None => Ok(Step::Waiting { seat }),
            },
            Phase::GameOver => Ok(Step::Finished),
        }
    }

    /// Run turns until the deck runs out and return the final standings.
    ///
    /// A rejected decision is logged and asked for again, up to
    /// [`MAX_REJECTED_DECISIONS`] times in a row.
    pub fn play(&mut self, agents: &mut AgentTable) -> Result<ScoreReport, GameError> {
        let mut rejected = 0;
        loop {
            let step = match self.step(agents) {
                Ok(step) => step,
                Err(err) if err.is_retryable() && rejected < MAX_REJECTED_DECISIONS => {
                    rejected += 1;
                    warn!(seat = self.current, %err, "decision rejected, asking again");
                    continue;
                }
                Err(err) => return Err(err),
            };
            rejected = 0;
            match step {
                Step::Finished => break,
                Step::Waiting { seat } => return Err(GameError::Stalled { seat }),
                Step::AwaitingDiscard { .. } | Step::TurnEnded(_) => {}
            }
        }
        Ok(self.report())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::ScriptedAgent;
    use crate::cards::{Rank, Suit};

    fn mk_game(n: usize, limit: Option<usize>) -> Game {
        let cfg = GameConfig::default().with_players(n).with_hand_limit(limit).with_seed(7);
        Game::new(cfg).unwrap()
    }

    #[test]
    fn deal_is_seat_by_seat_from_the_top() {
        let deck = Deck::standard();
        let order: Vec<Card> = deck.cards().iter().rev().copied().collect();
        let g = Game::with_deck(GameConfig::default(), deck).unwrap();
        assert_eq!(g.players[0].hand(), &order[..10]);
        assert_eq!(g.players[1].hand(), &order[10..20]);
        assert_eq!(g.deck.len(), 32);
        assert_eq!(g.current, 0);
        assert_eq!(g.phase, Phase::AwaitingAction);
    }

    #[test]
    fn config_rejects_impossible_deals() {
        let none = GameConfig::default().with_players(0);
        assert_eq!(Game::new(none).unwrap_err(), GameError::Config(ConfigError::NoPlayers));
        let six = GameConfig::default().with_players(6);
        assert!(matches!(
            Game::new(six).unwrap_err(),
            GameError::Config(ConfigError::NotEnoughCards { needed: 60, available: 52 })
        ));
    }

    #[test]
    fn dealing_the_whole_deck_ends_the_game_at_once() {
        let cfg = GameConfig::default().with_players(4).with_initial_hand_size(13);
        let g = Game::with_deck(cfg, Deck::standard()).unwrap();
        assert!(g.is_game_over());
    }

    #[test]
    fn draw_under_limit_ends_turn() {
        let mut g = mk_game(2, None);
        let step = g.apply_action(TurnAction::Draw).unwrap();
        assert!(matches!(step, Step::TurnEnded(TurnRecord { seat: 0, discarded: None, .. })));
        assert_eq!(g.players[0].hand().len(), 11);
        assert_eq!(g.current, 1);
    }

    #[test]
    fn draw_over_limit_requires_discard() {
        let mut g = mk_game(2, Some(10));
        let step = g.apply_action(TurnAction::Draw).unwrap();
        assert!(matches!(step, Step::AwaitingDiscard { seat: 0, drawn: Some(_) }));
        assert_eq!(g.phase, Phase::AwaitingDiscard);
        assert_eq!(g.apply_action(TurnAction::Draw), Err(GameError::Action(ActionError::DiscardPending)));

        g.apply_discard(11).unwrap();
        assert_eq!(g.players[0].hand().len(), 10);
        assert_eq!(g.current, 1);
        assert_eq!(g.phase, Phase::AwaitingAction);
    }

    #[test]
    fn invalid_discard_keeps_turn_open() {
        let mut g = mk_game(2, Some(10));
        g.apply_action(TurnAction::Draw).unwrap();
        let hand = g.players[0].hand().to_vec();
        let err = g.apply_discard(12).unwrap_err();
        assert_eq!(err, GameError::Discard(DiscardError::InvalidIndex { index: 12, len: 11 }));
        assert!(!err.is_fatal());
        assert_eq!(g.players[0].hand(), hand.as_slice());
        assert_eq!(g.phase, Phase::AwaitingDiscard);
        assert_eq!(g.current, 0);
    }

    #[test]
    fn only_deck_exhaustion_is_fatal() {
        let err = GameError::from(DeckError::Empty);
        assert!(err.is_fatal());
        assert!(!err.is_retryable());
        assert!(!GameError::Stalled { seat: 0 }.is_fatal());
        assert!(GameError::Action(ActionError::EmptyHand).is_retryable());
    }

    #[test]
    fn empty_deck_draw_surfaces_as_fatal() {
        let cfg = GameConfig::default().with_players(1).with_initial_hand_size(0);
        let mut g = Game::with_deck(cfg, Deck::from_cards(vec![Card::new(Rank::Two, Suit::Hearts)])).unwrap();
        g.deck.draw().unwrap();
        let err = g.apply_action(TurnAction::Draw).unwrap_err();
        assert_eq!(err, GameError::Deck(DeckError::Empty));
        assert!(err.is_fatal());
    }

    #[test]
    fn play_asks_again_after_a_rejected_decision() {
        let cfg = GameConfig::default().with_players(1).with_initial_hand_size(0).with_hand_limit(None);
        let cards = vec![Card::new(Rank::Two, Suit::Hearts), Card::new(Rank::Three, Suit::Hearts)];
        let mut g = Game::with_deck(cfg, Deck::from_cards(cards)).unwrap();
        let script = ScriptedAgent::new([TurnAction::Discard, TurnAction::Draw, TurnAction::Draw], Vec::<usize>::new());
        let mut agents = AgentTable::for_seats(1);
        agents.set_agent(0, Some(Box::new(script)));
        let report = g.play(&mut agents).unwrap();
        assert!(g.is_game_over());
        assert_eq!(g.turns(), 2);
        assert_eq!(report.scores, vec![5]);
    }

    #[test]
    fn play_gives_up_on_a_seat_that_keeps_failing() {
        let cfg = GameConfig::default().with_players(1).with_initial_hand_size(0);
        let mut g = Game::new(cfg).unwrap();
        let mut agents = AgentTable::for_seats(1);
        agents.set_agent(0, Some(Box::new(ScriptedAgent::always(TurnAction::Discard, None))));
        assert_eq!(g.play(&mut agents), Err(GameError::Action(ActionError::EmptyHand)));
        assert_eq!(g.turns(), 0);
    }

    #[test]
    fn discard_without_pending_turn_is_rejected() {
        let mut g = mk_game(2, None);
        assert_eq!(g.apply_discard(1), Err(GameError::Action(ActionError::NoDiscardPending)));
    }

    #[test]
    fn discard_only_turn_keeps_deck() {
        let mut g = mk_game(2, None);
        g.apply_action(TurnAction::Discard).unwrap();
        g.apply_discard(1).unwrap();
        assert_eq!(g.deck.len(), 32);
        assert_eq!(g.players[0].hand().len(), 9);
        assert_eq!(g.players[0].discard_pile().len(), 1);
        assert_eq!(g.current, 1);
    }

    #[test]
    fn discard_action_needs_cards() {
        let cfg = GameConfig::default().with_players(1).with_initial_hand_size(0);
        let mut g = Game::new(cfg).unwrap();
        assert_eq!(g.apply_action(TurnAction::Discard), Err(GameError::Action(ActionError::EmptyHand)));
    }

    #[test]
    fn last_draw_ends_game_and_blocks_actions() {
        let cards = vec![
            Card::new(Rank::Two, Suit::Hearts),
            Card::new(Rank::Three, Suit::Hearts),
            Card::new(Rank::Four, Suit::Hearts),
        ];
        let cfg = GameConfig::default().with_players(2).with_initial_hand_size(1).with_hand_limit(None);
        let mut g = Game::with_deck(cfg, Deck::from_cards(cards)).unwrap();
        assert_eq!(g.deck.len(), 1);
        g.apply_action(TurnAction::Draw).unwrap();
        assert!(g.is_game_over());
        assert_eq!(g.apply_action(TurnAction::Draw), Err(GameError::Action(ActionError::GameOver)));
        assert_eq!(g.history_len(), 1);
    }

    #[test]
    fn report_uses_hand_and_meld_scores() {
        let mut g = mk_game(2, None);
        g.players[0].hand = vec![Card::new(Rank::King, Suit::Clubs)];
        g.players[0].add_meld(vec![Card::new(Rank::Ace, Suit::Hearts)]);
        g.players[1].hand = vec![Card::new(Rank::Two, Suit::Clubs)];
        let r = g.report();
        assert_eq!(r.scores, vec![11, 2]);
        assert_eq!((r.winner, r.winning_score), (1, 2));
        assert_eq!(g.calculate_score(5), 0);
    }
}
