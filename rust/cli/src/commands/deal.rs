//! Deal command: one round dealt from a seeded deck, printed face up.
//!
//! The player's hand is resolved by the engine only when it is a natural;
//! otherwise the round is left where the player would have to act.

use crate::error::CliError;
use crate::formatters::format_table;
use blackjack_engine::engine::{Action, Engine};
use blackjack_engine::game::GameState;
use std::io::Write;

/// Handle the deal command.
///
/// The same seed always prints the same hands.
///
/// ```
/// let mut out = Vec::new();
/// blackjack_cli::commands::handle_deal_command(Some(42), &mut out).unwrap();
/// assert!(String::from_utf8(out).unwrap().starts_with("Seed: 42"));
/// ```
pub fn handle_deal_command(seed: Option<u64>, out: &mut dyn Write) -> Result<(), CliError> {
    let seed = seed.unwrap_or_else(rand::random);
    let mut engine = Engine::new(Some(seed));
    let transition = engine.apply(&GameState::new(format!("deal-{}", seed)), Action::Deal)?;
    let state = transition.state();

    writeln!(out, "Seed: {}", seed)?;
    for line in format_table(state, true) {
        writeln!(out, "{}", line)?;
    }
    writeln!(out, "Cards left: {}", state.deck.remaining())?;
    Ok(())
}
