use super::{AppState, Scene};

const MAX_PLAYERS: usize = 5;
const MIN_HAND_LIMIT: usize = 7;
const MAX_HAND_LIMIT: usize = 15;

#[derive(Debug, Clone, Copy)]
enum MenuItem {
    Players,
    HandLimit,
    BotDelayMs,
}

const MENU_ITEMS: [MenuItem; 3] = [MenuItem::Players, MenuItem::HandLimit, MenuItem::BotDelayMs];

impl MenuItem {
    fn display(self, app: &AppState) -> String {
        match self {
            MenuItem::Players => format!("Players: {}", app.cfg_num_players),
            MenuItem::HandLimit => match app.cfg_hand_limit {
                Some(n) => format!("Hand Limit: {n}"),
                None => "Hand Limit: Off".to_string(),
            },
            MenuItem::BotDelayMs => format!("Bot Delay (ms): {}", app.cfg_bot_delay_ms),
        }
    }

    fn inc(self, app: &mut AppState) {
        match self {
            MenuItem::Players => {
                if app.cfg_num_players < MAX_PLAYERS {
                    app.cfg_num_players += 1;
                }
            }
            MenuItem::HandLimit => {
                app.cfg_hand_limit = match app.cfg_hand_limit {
                    None => Some(MIN_HAND_LIMIT),
                    Some(n) if n >= MAX_HAND_LIMIT => None,
                    Some(n) => Some(n + 1),
                };
            }
            MenuItem::BotDelayMs => {
                app.cfg_bot_delay_ms = app.cfg_bot_delay_ms.saturating_add(100);
            }
        }
    }

    fn dec(self, app: &mut AppState) {
        match self {
            MenuItem::Players => {
                if app.cfg_num_players > 1 {
                    app.cfg_num_players -= 1;
                }
            }
            MenuItem::HandLimit => {
                app.cfg_hand_limit = match app.cfg_hand_limit {
                    None => Some(MAX_HAND_LIMIT),
                    Some(n) if n <= MIN_HAND_LIMIT => None,
                    Some(n) => Some(n - 1),
                };
            }
            MenuItem::BotDelayMs => {
                app.cfg_bot_delay_ms = app.cfg_bot_delay_ms.saturating_sub(100);
            }
        }
    }
}

impl AppState {
    pub fn menu_items_display(&self) -> Vec<String> {
        MENU_ITEMS.iter().map(|item| item.display(self)).collect()
    }

    pub fn toggle_menu(&mut self) {
        match self.scene {
            Scene::Menu => self.cancel_menu(),
            Scene::Table => self.open_menu(),
        }
    }

    /// Show the menu seeded with the settings of the table in play.
    pub fn open_menu(&mut self) {
        self.close_help();
        self.close_history();
        self.menu_index = 0;
        self.cfg_num_players = self.game.players().len();
        self.cfg_hand_limit = self.game.config().hand_limit;
        self.cfg_bot_delay_ms = self.bot_delay_ms;
        self.scene = Scene::Menu;
    }

    /// Apply pending settings and deal a fresh game.
    pub fn apply_menu(&mut self) {
        self.bot_delay_ms = self.cfg_bot_delay_ms;
        self.new_game();
        self.scene = Scene::Table;
    }

    pub fn cancel_menu(&mut self) {
        self.scene = Scene::Table;
    }

    pub fn menu_next(&mut self) {
        self.menu_index = (self.menu_index + 1) % MENU_ITEMS.len();
    }

    pub fn menu_prev(&mut self) {
        self.menu_index = self.menu_index.checked_sub(1).unwrap_or(MENU_ITEMS.len() - 1);
    }

    pub fn menu_inc(&mut self) {
        MENU_ITEMS[self.menu_index].inc(self);
    }

    pub fn menu_dec(&mut self) {
        MENU_ITEMS[self.menu_index].dec(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameConfig;

    #[test]
    fn hand_limit_cycles_through_off() {
        let mut app = AppState::new(GameConfig::default().with_seed(2)).unwrap();
        app.menu_index = 1;
        app.cfg_hand_limit = Some(MAX_HAND_LIMIT);
        app.menu_inc();
        assert_eq!(app.cfg_hand_limit, None);
        app.menu_inc();
        assert_eq!(app.cfg_hand_limit, Some(MIN_HAND_LIMIT));
        app.menu_dec();
        assert_eq!(app.cfg_hand_limit, None);
    }

    #[test]
    fn apply_uses_pending_player_count() {
        let mut app = AppState::new(GameConfig::default().with_seed(2)).unwrap();
        app.menu_inc();
        app.apply_menu();
        assert_eq!(app.game.players().len(), 3);
        assert_eq!(app.agents.len(), 3);
        assert!(app.game_started);
    }
}
