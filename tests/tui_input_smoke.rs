use crossterm::event::KeyCode;
use rummy_rs::engine::GameEngine;
use rummy_rs::game::{GameConfig, Phase};
use rummy_rs::tui::app::{AppState, InputAction, Scene, HUMAN_SEAT};
use rummy_rs::tui::controller::handle_key;

fn new_app() -> AppState {
    AppState::new(GameConfig::default().with_seed(3)).unwrap()
}

fn setup_table_app() -> AppState {
    let mut app = new_app();
    app.apply_menu();
    app.agents.set_min_action_delay_ms(0);
    app
}

fn human_draws(app: &mut AppState) {
    assert!(app.handle_input(InputAction::Draw));
    app.agents_on_turn();
    assert_eq!(app.game.phase(), Phase::AwaitingDiscard);
    assert!(app.index_entry_active());
}

#[test]
fn menu_navigation_and_apply() {
    let mut app = new_app();
    assert!(matches!(app.scene, Scene::Menu));
    assert!(!app.game_started);
    let start = app.menu_index;
    let _ = app.handle_input(InputAction::MenuNext);
    assert_ne!(app.menu_index, start);
    let _ = app.handle_input(InputAction::MenuPrev);
    assert_eq!(app.menu_index, start);
    let _ = app.handle_input(InputAction::MenuApply);
    assert!(matches!(app.scene, Scene::Table));
    assert!(app.game_started);
}

#[test]
fn help_and_history_toggle() {
    let mut app = setup_table_app();
    let _ = app.handle_input(InputAction::ToggleHelp);
    assert!(app.help_open());
    let _ = app.handle_input(InputAction::ToggleHistory);
    assert!(!app.help_open());
    assert!(app.history_open());
    let _ = app.handle_input(InputAction::ToggleHistory);
    assert!(!app.history_open());
}

#[test]
fn index_entry_edit_and_cancel() {
    let mut app = setup_table_app();
    human_draws(&mut app);

    let _ = app.handle_input(InputAction::IndexDigit(1));
    let _ = app.handle_input(InputAction::IndexDigit(2));
    let _ = app.handle_input(InputAction::IndexDigit(3));
    assert_eq!(app.index_entry_text(), "12");

    let _ = app.handle_input(InputAction::IndexBackspace);
    assert_eq!(app.index_entry_text(), "1");

    let _ = app.handle_input(InputAction::IndexCancel);
    assert_eq!(app.index_entry_text(), "");
    assert!(app.index_entry_active());
}

#[test]
fn submitting_an_index_ends_the_turn() {
    let mut app = setup_table_app();
    human_draws(&mut app);
    let drawn = *app.game.hand(HUMAN_SEAT).last().unwrap();

    let _ = app.handle_input(InputAction::IndexDigit(1));
    let _ = app.handle_input(InputAction::IndexDigit(1));
    assert!(app.handle_input(InputAction::IndexSubmit));
    app.agents_on_turn();

    assert_eq!(app.game.current(), 1);
    assert_eq!(app.game.hand(HUMAN_SEAT).len(), 10);
    assert_eq!(app.game.discard_pile(HUMAN_SEAT), &[drawn]);
    assert!(!app.index_entry_active());
}

#[test]
fn bot_replies_after_the_human() {
    let mut app = setup_table_app();
    human_draws(&mut app);
    let _ = app.handle_input(InputAction::IndexDigit(1));
    assert!(app.handle_input(InputAction::IndexSubmit));
    for _ in 0..3 {
        app.agents_on_turn();
    }
    assert_eq!(app.game.turns(), 2);
    assert_eq!(app.game.current(), HUMAN_SEAT);
    assert_eq!(app.game.discard_pile(1).len(), 1);
}

#[test]
fn keys_drive_the_table() {
    let mut app = setup_table_app();
    assert!(!handle_key(&mut app, KeyCode::Char('d')));
    app.agents_on_turn();
    assert!(app.index_entry_active());
    assert!(!handle_key(&mut app, KeyCode::Char('4')));
    assert_eq!(app.index_entry_text(), "4");
    assert!(!handle_key(&mut app, KeyCode::Enter));
    assert_eq!(app.game.current(), 1);
    assert!(handle_key(&mut app, KeyCode::Char('q')));
}

#[test]
fn quit_works_while_a_discard_is_owed() {
    let mut app = setup_table_app();
    human_draws(&mut app);
    assert!(!handle_key(&mut app, KeyCode::Char('7')));
    assert!(handle_key(&mut app, KeyCode::Char('Q')));
    assert_eq!(app.game.phase(), Phase::AwaitingDiscard);
}

#[test]
fn menu_key_round_trip() {
    let mut app = setup_table_app();
    assert!(!handle_key(&mut app, KeyCode::Char('m')));
    assert!(matches!(app.scene, Scene::Menu));
    assert!(!handle_key(&mut app, KeyCode::Esc));
    assert!(matches!(app.scene, Scene::Table));
}
