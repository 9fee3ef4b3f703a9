use crate::tui::app::{AppState, InputAction, Scene};
use crate::tui::ui;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::prelude::{CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};

/// Redraw, read keys and let bots move once per tick until the user quits.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut AppState,
    tick_rate: Duration,
) -> io::Result<()> {
    let mut last_tick = Instant::now();
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && handle_key(app, key.code) {
                    return Ok(());
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.agents_on_turn();
            last_tick = Instant::now();
        }
    }
}

enum KeyOutcome {
    Input(InputAction),
    Quit,
    Ignore,
}

// Overlays capture every key but `?`. The discard prompt captures all but `q`.
fn map_key(app: &AppState, code: KeyCode) -> KeyOutcome {
    use KeyOutcome::{Ignore, Input, Quit};

    let key = match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    };
    if key == KeyCode::Char('?') {
        return Input(InputAction::ToggleHelp);
    }
    if app.help_open() {
        return if key == KeyCode::Esc { Input(InputAction::ToggleHelp) } else { Ignore };
    }
    if app.history_open() {
        return match key {
            KeyCode::Esc | KeyCode::Char('h') => Input(InputAction::ToggleHistory),
            _ => Ignore,
        };
    }
    if key == KeyCode::Char('q') {
        return Quit;
    }
    if app.index_entry_active() {
        return match key {
            KeyCode::Char(c @ '0'..='9') => Input(InputAction::IndexDigit(c as u8 - b'0')),
            KeyCode::Backspace => Input(InputAction::IndexBackspace),
            KeyCode::Enter => Input(InputAction::IndexSubmit),
            KeyCode::Esc => Input(InputAction::IndexCancel),
            KeyCode::Char('h') => Input(InputAction::ToggleHistory),
            _ => Ignore,
        };
    }
    match (app.scene, key) {
        (Scene::Menu, KeyCode::Up) => Input(InputAction::MenuPrev),
        (Scene::Menu, KeyCode::Down) => Input(InputAction::MenuNext),
        (Scene::Menu, KeyCode::Right | KeyCode::Char('+' | '=')) => Input(InputAction::MenuInc),
        (Scene::Menu, KeyCode::Left | KeyCode::Char('-' | '_')) => Input(InputAction::MenuDec),
        (Scene::Menu, KeyCode::Enter) => Input(InputAction::MenuApply),
        (Scene::Menu, KeyCode::Esc) => Input(InputAction::MenuCancel),
        (Scene::Table, KeyCode::Char('m')) => Input(InputAction::ToggleMenu),
        (Scene::Table, KeyCode::Char('h')) => Input(InputAction::ToggleHistory),
        (Scene::Table, KeyCode::Char(' ')) => Input(InputAction::NewGame),
        (Scene::Table, KeyCode::Char('d')) => Input(InputAction::Draw),
        (Scene::Table, KeyCode::Char('x')) => Input(InputAction::Discard),
        _ => Ignore,
    }
}

/// Map a key press to an app input. Returns true when the app should quit.
///
/// A move the human just handed to their agent is played right away instead
/// of waiting for the next tick.
pub fn handle_key(app: &mut AppState, code: KeyCode) -> bool {
    match map_key(app, code) {
        KeyOutcome::Quit => true,
        KeyOutcome::Ignore => false,
        KeyOutcome::Input(input) => {
            if app.handle_input(input) {
                app.agents_on_turn();
            }
            false
        }
    }
}
