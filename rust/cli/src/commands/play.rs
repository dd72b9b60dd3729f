//! # Play Command
//!
//! Interactive blackjack against the house on the terminal.
//!
//! The first round is dealt as soon as the session starts. While a round is
//! in progress the prompt accepts `hit`, `stand` and `quit`; between rounds it
//! accepts `deal` and `quit`. End of input is treated as `quit`. A session
//! ends early when the `--rounds` limit has been reached.

use crate::error::CliError;
use crate::formatters::{format_table, format_tally};
use crate::io_utils::read_stdin_line;
use crate::ui;
use crate::validation::{ParseResult, parse_player_action};
use blackjack_engine::engine::{Action, Engine};
use blackjack_engine::game::GameState;
use blackjack_engine::logger::RoundLogger;
use std::io::{BufRead, Write};
use std::path::PathBuf;

/// Handle the play command.
///
/// # Arguments
///
/// * `seed` - Shuffle seed (default: random, printed in the header)
/// * `rounds` - Rounds to play before the session ends (default: until quit)
/// * `log` - JSONL file receiving one record per settled round
/// * `reveal_dealer` - Show the dealer's hole card during the round
/// * `out` - Table output
/// * `err` - Rejected input and errors
/// * `stdin` - Player input, one action per line
///
/// # Errors
///
/// `CliError::InvalidInput` when `rounds` is 0, `CliError::Io` when the log
/// cannot be created or written.
pub fn handle_play_command(
    seed: Option<u64>,
    rounds: Option<u32>,
    log: Option<PathBuf>,
    reveal_dealer: bool,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<(), CliError> {
    if rounds == Some(0) {
        ui::write_error(err, "rounds must be >= 1")?;
        return Err(CliError::InvalidInput("rounds must be >= 1".to_string()));
    }

    let seed = seed.unwrap_or_else(rand::random);
    let logger = match log {
        Some(path) => Some(RoundLogger::create(&path)?),
        None => None,
    };

    let limit = rounds.map_or_else(|| "unlimited".to_string(), |n| n.to_string());
    writeln!(out, "play: rounds={} seed={}", limit, seed)?;

    let mut session = PlaySession {
        engine: Engine::new(Some(seed)),
        state: GameState::new(format!("cli-{}", seed)),
        logger,
        reveal_dealer,
    };

    session.apply(Action::Deal, out)?;

    loop {
        if let Some(limit) = rounds
            && session.state.rounds_played() >= limit
        {
            break;
        }

        let prompt = if session.state.round_active {
            "Enter action (hit/stand/q): "
        } else {
            "Deal again? (d/q): "
        };
        write!(out, "{}", prompt)?;
        out.flush()?;

        let Some(input) = read_stdin_line(stdin) else {
            writeln!(out)?;
            break;
        };

        match parse_player_action(&input) {
            ParseResult::Quit => break,
            ParseResult::Invalid(msg) => ui::write_error(err, &msg)?,
            ParseResult::Action(Action::Deal) if session.state.round_active => {
                ui::write_error(err, "Round in progress; hit or stand first")?;
            }
            ParseResult::Action(action @ (Action::Hit | Action::Stand))
                if !session.state.round_active =>
            {
                ui::write_error(
                    err,
                    &format!("Cannot {} with no round in progress; deal first", action),
                )?;
            }
            ParseResult::Action(action) => session.apply(action, out)?,
        }
    }

    writeln!(out, "Rounds played: {}", session.state.rounds_played())?;
    writeln!(out, "{}", format_tally(&session.state.tally))?;
    Ok(())
}

struct PlaySession {
    engine: Engine,
    state: GameState,
    logger: Option<RoundLogger>,
    reveal_dealer: bool,
}

impl PlaySession {
    fn apply(&mut self, action: Action, out: &mut dyn Write) -> Result<(), CliError> {
        if action == Action::Deal {
            writeln!(out, "Round {}", self.state.rounds_played() + 1)?;
        }
        let transition = self.engine.apply(&self.state, action)?;
        if let Some(logger) = &mut self.logger {
            logger.log_transition(&transition)?;
        }
        let settled = transition.is_round_over();
        self.state = transition.into_state();

        for line in format_table(&self.state, self.reveal_dealer) {
            writeln!(out, "{}", line)?;
        }
        if settled {
            writeln!(out, "{}", format_tally(&self.state.tally))?;
        }
        Ok(())
    }
}
