//! # Blackjack CLI Library
//!
//! Terminal front end for the blackjack engine: an interactive game loop,
//! a one-shot deal for inspecting seeds, and a configuration dump.
//!
//! ## Main Entry Point
//!
//! [`run`] parses the arguments, resolves configuration and dispatches to a
//! subcommand handler, returning the process exit code.
//!
//! ```no_run
//! use std::io;
//! let args = vec!["blackjack", "play", "--rounds", "3"];
//! let code = blackjack_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Subcommands
//!
//! - `play`: play rounds interactively, optionally logging them to JSONL
//! - `deal`: deal one round for a seed and print it face up
//! - `cfg`: show the resolved configuration and its sources
//!
//! ## Configuration
//!
//! Values are layered as defaults, then the TOML file named by
//! `BLACKJACK_CONFIG`, then `BLACKJACK_SEED`, `BLACKJACK_ROUNDS` and
//! `BLACKJACK_REVEAL_DEALER`. Command-line flags win over all of them.

use clap::Parser;
use std::io::Write;

pub mod cli;
pub mod commands;
pub mod config;
mod error;
pub mod exit_code;
pub mod formatters;
pub mod io_utils;
pub mod ui;
pub mod validation;

use cli::{BlackjackCli, COMMANDS, Commands};
use commands::{handle_cfg_command, handle_deal_command, handle_play_command};

pub use error::CliError;

/// Parses `args` and runs the chosen subcommand.
///
/// # Returns
///
/// [`exit_code::SUCCESS`] on success, [`exit_code::ERROR`] for argument,
/// configuration or command failures. Help and version output go to `out`
/// with a success code.
///
/// ```
/// use std::io;
/// let args = vec!["blackjack", "deal", "--seed", "42"];
/// let code = blackjack_cli::run(args, &mut io::sink(), &mut io::sink());
/// assert_eq!(code, 0);
/// ```
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match BlackjackCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => return report_parse_error(e, out, err),
    };

    let result = match cli.cmd {
        Commands::Cfg => handle_cfg_command(out, err),
        Commands::Deal { seed } => {
            load_config(err).and_then(|cfg| handle_deal_command(seed.or(cfg.seed), out))
        }
        Commands::Play {
            seed,
            rounds,
            log,
            reveal_dealer,
        } => load_config(err).and_then(|cfg| {
            let stdin = std::io::stdin();
            let mut stdin_lock = stdin.lock();
            handle_play_command(
                seed.or(cfg.seed),
                rounds.or(cfg.rounds),
                log,
                reveal_dealer || cfg.reveal_dealer,
                out,
                err,
                &mut stdin_lock,
            )
        }),
    };

    match result {
        Ok(()) => exit_code::SUCCESS,
        // handlers have already reported these on `err`
        Err(CliError::InvalidInput(_) | CliError::Config(_)) => exit_code::ERROR,
        Err(e) => {
            let _ = ui::write_error(err, &e.to_string());
            exit_code::ERROR
        }
    }
}

fn load_config(err: &mut dyn Write) -> Result<config::Config, CliError> {
    match config::load_with_sources() {
        Ok(resolved) => Ok(resolved.config),
        Err(e) => {
            ui::write_error(err, &format!("Invalid configuration: {}", e))?;
            Err(CliError::Config(e.to_string()))
        }
    }
}

fn report_parse_error(e: clap::Error, out: &mut dyn Write, err: &mut dyn Write) -> i32 {
    use clap::error::ErrorKind;

    match e.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            if write!(out, "{}", e).is_err() {
                return exit_code::ERROR;
            }
            exit_code::SUCCESS
        }
        _ => {
            if writeln!(err, "{}", e).is_err()
                || writeln!(err, "Usage: blackjack <command> [options]\n").is_err()
                || writeln!(err, "Commands:").is_err()
            {
                return exit_code::ERROR;
            }
            for c in COMMANDS {
                if writeln!(err, "  {}", c).is_err() {
                    return exit_code::ERROR;
                }
            }
            let _ = writeln!(err, "\nFor full help, run: blackjack --help");
            exit_code::ERROR
        }
    }
}
