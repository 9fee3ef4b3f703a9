//! Line-based front end: a prompting agent for the human seat and a session
//! loop that prints each turn. Input validation and re-prompting live here so
//! the engine only ever sees in-range choices.

use std::io::{self, BufRead, Write};

use crate::agents::{AgentKind, AgentTable, PlayerAgent};
use crate::engine::GameEngine;
use crate::game::{Game, GameError, Step, TurnAction, MAX_REJECTED_DECISIONS};
use crate::render;
use crate::scoring::ScoreReport;
use tracing::warn;

/// Asks a person at a terminal what to do, re-asking until the answer is valid.
///
/// End of input (or a read error) means no decision; the engine reports the
/// seat as stalled.
pub struct ConsoleAgent<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ConsoleAgent<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }

    fn read_number(&mut self) -> io::Result<Option<i64>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        match line.trim().parse::<i64>() {
            Ok(n) => Ok(Some(n)),
            Err(_) => {
                writeln!(self.output, "Invalid input. Please enter a number.")?;
                Ok(Some(-1))
            }
        }
    }

    /// Prompt until the reply is a number in `lo..=hi`.
    fn prompt_in_range(&mut self, prompt: &str, lo: i64, hi: i64) -> io::Result<Option<i64>> {
        loop {
            write!(self.output, "{prompt}")?;
            self.output.flush()?;
            match self.read_number()? {
                None => return Ok(None),
                Some(n) if (lo..=hi).contains(&n) => return Ok(Some(n)),
                Some(_) => {}
            }
        }
    }

    fn ask_action(&mut self, engine: &dyn GameEngine, seat: usize) -> io::Result<Option<TurnAction>> {
        writeln!(self.output, "\nPlayer {}'s turn:", seat + 1)?;
        write!(self.output, "{}", render::ascii_cards_wide(engine.hand(seat), 6))?;
        let prompt = "Choose an action:\n1. Draw a card\n2. Discard a card\nEnter your choice (1 or 2): ";
        loop {
            match self.prompt_in_range(prompt, 1, 2)? {
                None => return Ok(None),
                Some(1) => return Ok(Some(TurnAction::Draw)),
                Some(_) if engine.hand(seat).is_empty() => {
                    writeln!(self.output, "You have no cards to discard. Draw a card instead.")?;
                }
                Some(_) => return Ok(Some(TurnAction::Discard)),
            }
        }
    }

    fn ask_discard(&mut self, engine: &dyn GameEngine, seat: usize) -> io::Result<Option<usize>> {
        let hand = engine.hand(seat);
        if let Some(limit) = engine.hand_limit() {
            if hand.len() > limit {
                writeln!(
                    self.output,
                    "Your hand has more than {limit} cards. Choose a card to discard:"
                )?;
            }
        }
        writeln!(self.output, "{}", render::hand_line(hand))?;
        let len = hand.len();
        let prompt = format!("Enter the index of the card to discard (1 to {len}): ");
        let index = self.prompt_in_range(&prompt, 1, len as i64)?;
        Ok(index.map(|i| i as usize))
    }
}

impl<R: BufRead, W: Write> PlayerAgent for ConsoleAgent<R, W> {
    fn kind(&self) -> AgentKind {
        AgentKind::Human
    }
    fn choose_action(&mut self, engine: &dyn GameEngine, seat: usize) -> Option<TurnAction> {
        self.ask_action(engine, seat).unwrap_or_else(|err| {
            warn!(%err, "console read failed");
            None
        })
    }
    fn choose_discard(&mut self, engine: &dyn GameEngine, seat: usize) -> Option<usize> {
        self.ask_discard(engine, seat).unwrap_or_else(|err| {
            warn!(%err, "console read failed");
            None
        })
    }
}

/// Drive `game` to the end, printing each completed turn and the final scores.
///
/// A rejected choice is printed and the seat is asked again; only fatal
/// errors, stalls and repeated rejections end the session early.
pub fn run_session<W: Write>(
    game: &mut Game,
    agents: &mut AgentTable,
    out: &mut W,
) -> Result<ScoreReport, SessionError> {
    let mut rejected = 0;
    loop {
        let step = match game.step(agents) {
            Ok(step) => step,
            Err(err) if err.is_retryable() && rejected < MAX_REJECTED_DECISIONS => {
                rejected += 1;
                warn!(seat = game.current(), %err, "choice rejected");
                writeln!(out, "Invalid choice: {err}. Try again.")?;
                continue;
            }
            Err(err) => return Err(err.into()),
        };
        rejected = 0;
        match step {
            Step::Finished => break,
            Step::Waiting { seat } => return Err(GameError::Stalled { seat }.into()),
            Step::AwaitingDiscard { .. } => {}
            Step::TurnEnded(record) => {
                if let Some(card) = record.drawn {
                    writeln!(out, "Player {} drew [{}]", record.seat + 1, card.code())?;
                }
                if let Some(card) = record.discarded {
                    writeln!(out, "Player {} discarded [{}]", record.seat + 1, card.code())?;
                }
            }
        }
    }
    let report = game.report();
    writeln!(out, "\nGame over!\n\n{report}")?;
    Ok(report)
}

#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum SessionError {
    #[error(transparent)]
    Game(#[from] GameError),
    #[error("console output failed: {0}")]
    Io(#[from] io::Error),
}

impl SessionError {
    /// True when the game itself broke, as opposed to the player leaving.
    pub fn is_fatal(&self) -> bool {
        matches!(self, SessionError::Game(err) if err.is_fatal())
    }
}
