//! rummy-rs: a small draw-and-discard rummy engine
//!
//! Goals:
//! - Deterministic play from a seed, so whole games can be replayed
//! - One engine enforcing the turn rules, with pluggable seat agents
//! - No panics for invalid input; use `Result` for recoverable errors
//!
//! ## Quick start: let two bots play a seeded game
//! ```
//! use rummy_rs::agents::AgentTable;
//! use rummy_rs::game::{Game, GameConfig};
//!
//! let mut game = Game::new(GameConfig::default().with_seed(42)).unwrap();
//! assert_eq!(game.deck().len(), 32);
//!
//! let mut agents = AgentTable::autoplay(2);
//! let report = game.play(&mut agents).unwrap();
//! assert!(game.is_game_over());
//! assert_eq!(report.scores.len(), 2);
//! assert!(report.scores.iter().all(|&s| s >= report.winning_score));
//! ```
//!
//! ## Playing
//! Run the interactive TUI (or the line-based console when stdout is not a
//! terminal, or with `--plain`):
//! ```sh
//! cargo run --bin rummy-rs -- --seed 42
//! ```

pub mod agents;
pub mod cards;
pub mod console;
pub mod deck;
pub mod engine;
pub mod game;
pub mod player;
pub mod render;
pub mod scoring;
pub mod tui;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
