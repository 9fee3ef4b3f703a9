use clap::Parser;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use ratatui::prelude::*;
use rummy_rs::agents::AgentTable;
use rummy_rs::console::{self, ConsoleAgent, SessionError};
use rummy_rs::game::{Game, GameConfig, GameError, DEFAULT_HAND_LIMIT};
use rummy_rs::tui::{app::AppState, controller};
use std::error::Error;
use std::io::{self, IsTerminal, Stdout};
use std::process::ExitCode;
use std::time::Duration;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rummy-rs", version)]
#[command(about = "Draw-and-discard rummy against automatic opponents")]
struct Args {
    /// Number of seats; you play seat 1
    #[arg(short, long, default_value_t = 2)]
    players: usize,

    /// Deck seed (for reproducible games)
    #[arg(long)]
    seed: Option<u64>,

    /// Most cards a hand may hold after drawing; 0 turns the limit off
    #[arg(long, default_value_t = DEFAULT_HAND_LIMIT)]
    hand_limit: usize,

    /// Use the line-based console instead of the TUI
    #[arg(long)]
    plain: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn config(&self) -> GameConfig {
        let limit = (self.hand_limit > 0).then_some(self.hand_limit);
        let mut config = GameConfig::default().with_players(self.players).with_hand_limit(limit);
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        config
    }
}

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    crossterm::execute!(
        stdout,
        crossterm::terminal::EnterAlternateScreen,
        crossterm::event::EnableMouseCapture
    )?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(mut terminal: Terminal<CrosstermBackend<Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        crossterm::event::DisableMouseCapture,
        crossterm::terminal::LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;
    Ok(())
}

fn run_tui(config: GameConfig) -> Result<(), Box<dyn Error>> {
    let mut app = AppState::new(config)?;
    let mut terminal = setup_terminal()?;
    let tick_rate = Duration::from_millis(100);

    let res = controller::run(&mut terminal, &mut app, tick_rate);

    // Always attempt to restore terminal
    restore_terminal(terminal)?;
    Ok(res?)
}

fn run_console(config: GameConfig) -> Result<(), Box<dyn Error>> {
    let mut game = Game::new(config)?;
    let human = ConsoleAgent::new(io::stdin().lock(), io::stdout());
    let mut agents = AgentTable::human_vs_auto(game.players().len(), Box::new(human));
    match console::run_session(&mut game, &mut agents, &mut io::stdout()) {
        Ok(report) => {
            info!(winner = report.winner + 1, score = report.winning_score, "session finished");
            Ok(())
        }
        Err(SessionError::Game(GameError::Stalled { seat })) => {
            warn!(seat, turns = game.turns(), "input closed before the game finished");
            Ok(())
        }
        Err(err) if err.is_fatal() => {
            error!(%err, deck = game.deck().len(), "game state is broken, giving up");
            Err(err.into())
        }
        Err(err) => Err(err.into()),
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Silent by default, only warnings and errors; RUST_LOG wins when set.
    let default_filter = if args.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();

    let config = args.config();
    info!(players = config.num_players, seed = ?config.seed, "starting rummy-rs {}", rummy_rs::VERSION);

    let res = if args.plain || !io::stdout().is_terminal() {
        run_console(config)
    } else {
        run_tui(config)
    };
    match res {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "rummy-rs stopped");
            ExitCode::FAILURE
        }
    }
}
