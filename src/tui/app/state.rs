use crate::agents::{AgentKind, AgentTable, HumanAgent, Intent};
use crate::engine::GameEngine;
use crate::game::{Game, GameConfig, GameError, Phase, Step, TurnAction};
use std::time::{Duration, Instant};

/// Seat the local person plays from.
pub const HUMAN_SEAT: usize = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Scene {
    Menu,
    Table,
}

/// What a key press means once the controller has decoded it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum InputAction {
    MenuNext,
    MenuPrev,
    MenuInc,
    MenuDec,
    MenuApply,
    MenuCancel,
    ToggleMenu,
    ToggleHelp,
    ToggleHistory,
    NewGame,
    Draw,
    Discard,
    IndexDigit(u8),
    IndexBackspace,
    IndexSubmit,
    IndexCancel,
}

#[derive(Debug)]
#[non_exhaustive]
pub struct AppState {
    pub scene: Scene,
    pub game: Game,
    pub agents: AgentTable,
    // Pending settings; applied by `apply_menu`.
    pub menu_index: usize,
    pub cfg_num_players: usize,
    pub cfg_hand_limit: Option<usize>,
    pub cfg_bot_delay_ms: u64,
    pub bot_delay_ms: u64,
    pub game_started: bool,
    seed: Option<u64>,
    help_open: bool,
    history_open: bool,
    index_entry: String,
    index_entry_error: Option<String>,
    action_error: Option<String>,
    action_error_at: Option<Instant>,
}

impl AppState {
    pub const HISTORY_PAGE_SIZE: usize = 20;
    const ACTION_ERROR_TTL: Duration = Duration::from_secs(3);
    const DEFAULT_BOT_DELAY_MS: u64 = 500;

    /// Start in the menu with a dealt game behind it built from `config`.
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        let seed = config.seed;
        let cfg_num_players = config.num_players;
        let cfg_hand_limit = config.hand_limit;
        let game = Game::new(config)?;
        let mut agents = AgentTable::human_vs_auto(cfg_num_players, Box::new(HumanAgent::new()));
        agents.set_min_action_delay_ms(Self::DEFAULT_BOT_DELAY_MS);
        Ok(Self {
            scene: Scene::Menu,
            game,
            agents,
            menu_index: 0,
            cfg_num_players,
            cfg_hand_limit,
            cfg_bot_delay_ms: Self::DEFAULT_BOT_DELAY_MS,
            bot_delay_ms: Self::DEFAULT_BOT_DELAY_MS,
            game_started: false,
            seed,
            help_open: false,
            history_open: false,
            index_entry: String::new(),
            index_entry_error: None,
            action_error: None,
            action_error_at: None,
        })
    }

    pub(crate) fn seed(&self) -> Option<u64> {
        self.seed
    }

    fn human_to_act(&self) -> bool {
        self.scene == Scene::Table
            && self.game_started
            && !self.game.is_game_over()
            && self.game.current() == HUMAN_SEAT
            && matches!(self.agents.agent_kind(HUMAN_SEAT), Some(AgentKind::Human))
    }

    /// The human owes a discard, so digit keys edit the index entry.
    pub fn index_entry_active(&self) -> bool {
        self.human_to_act() && self.game.phase() == Phase::AwaitingDiscard
    }

    pub fn index_entry_text(&self) -> &str {
        &self.index_entry
    }

    pub fn index_entry_error(&self) -> Option<&str> {
        self.index_entry_error.as_deref()
    }

    pub fn action_error(&self) -> Option<&str> {
        self.action_error.as_deref()
    }

    fn set_action_error(&mut self, msg: String) {
        self.action_error = Some(msg);
        self.action_error_at = Some(Instant::now());
    }

    fn clear_action_error(&mut self) {
        self.action_error = None;
        self.action_error_at = None;
    }

    pub fn help_open(&self) -> bool {
        self.help_open
    }

    pub fn history_open(&self) -> bool {
        self.history_open
    }

    pub(crate) fn close_help(&mut self) {
        self.help_open = false;
    }

    pub(crate) fn close_history(&mut self) {
        self.history_open = false;
    }

    fn queue_action(&mut self, action: TurnAction) -> bool {
        if !self.human_to_act() || self.game.phase() != Phase::AwaitingAction {
            return false;
        }
        self.clear_action_error();
        self.agents.receive(HUMAN_SEAT, Intent::Action(action))
    }

    fn index_entry_push_digit(&mut self, digit: u8) {
        if !self.index_entry_active() || self.index_entry.len() >= 2 {
            return;
        }
        self.index_entry.push(char::from(b'0' + digit));
        self.index_entry_error = None;
    }

    fn index_entry_backspace(&mut self) {
        self.index_entry.pop();
        self.index_entry_error = None;
    }

    fn index_entry_cancel(&mut self) {
        self.index_entry.clear();
        self.index_entry_error = None;
    }

    fn index_entry_submit(&mut self) -> bool {
        if !self.index_entry_active() {
            return false;
        }
        let len = self.game.hand(HUMAN_SEAT).len();
        let index = match self.index_entry.parse::<usize>() {
            Ok(i) if (1..=len).contains(&i) => i,
            Ok(_) => {
                self.index_entry_error = Some(format!("Choose 1 to {len}"));
                return false;
            }
            Err(_) => {
                self.index_entry_error = Some("Enter a card number".to_string());
                return false;
            }
        };
        if self.agents.receive(HUMAN_SEAT, Intent::Discard(index)) {
            self.index_entry.clear();
            self.index_entry_error = None;
            return true;
        }
        false
    }

    /// Apply one input. Returns true when it handed a move to the human's
    /// agent, so the caller can let the game take it right away.
    pub fn handle_input(&mut self, action: InputAction) -> bool {
        use InputAction as A;
        let in_menu = self.scene == Scene::Menu;
        match action {
            A::MenuNext | A::MenuPrev | A::MenuInc | A::MenuDec | A::MenuApply | A::MenuCancel
                if !in_menu => {}
            A::MenuNext => self.menu_next(),
            A::MenuPrev => self.menu_prev(),
            A::MenuInc => self.menu_inc(),
            A::MenuDec => self.menu_dec(),
            A::MenuApply => self.apply_menu(),
            A::MenuCancel => self.cancel_menu(),
            A::ToggleMenu => self.toggle_menu(),
            A::ToggleHelp | A::ToggleHistory if in_menu => {}
            A::ToggleHelp => {
                self.help_open = !self.help_open;
                self.history_open = false;
            }
            A::ToggleHistory => {
                self.history_open = !self.history_open;
                self.help_open = false;
            }
            A::NewGame => {
                if !in_menu && (!self.game_started || self.game.is_game_over()) {
                    self.new_game();
                }
            }
            A::Draw => return self.queue_action(TurnAction::Draw),
            A::Discard => return self.queue_action(TurnAction::Discard),
            A::IndexDigit(d) => self.index_entry_push_digit(d),
            A::IndexBackspace => self.index_entry_backspace(),
            A::IndexSubmit => return self.index_entry_submit(),
            A::IndexCancel => self.index_entry_cancel(),
        }
        false
    }

    /// Re-deal with the settings currently applied.
    pub fn new_game(&mut self) {
        let mut config = GameConfig::default()
            .with_players(self.cfg_num_players)
            .with_hand_limit(self.cfg_hand_limit);
        config.seed = self.seed;
        match Game::new(config) {
            Ok(game) => {
                self.game = game;
                self.agents =
                    AgentTable::human_vs_auto(self.cfg_num_players, Box::new(HumanAgent::new()));
                self.agents.set_min_action_delay_ms(self.bot_delay_ms);
                self.game_started = true;
                self.index_entry_cancel();
                self.clear_action_error();
            }
            Err(err) => self.set_action_error(err.to_string()),
        }
    }

    /// Let the seat to act make its move, if it has one ready.
    pub fn agents_on_turn(&mut self) {
        if self.scene != Scene::Table || !self.game_started {
            return;
        }
        if let Some(at) = self.action_error_at {
            if at.elapsed() >= Self::ACTION_ERROR_TTL {
                self.clear_action_error();
            }
        }
        self.agents.ensure_len(self.game.num_players());
        match self.agents.on_turn(&mut self.game) {
            Ok(Step::AwaitingDiscard { .. } | Step::TurnEnded(_)) => self.clear_action_error(),
            Ok(Step::Waiting { .. } | Step::Finished) => {}
            Err(err) => self.set_action_error(err.to_string()),
        }
    }
}
