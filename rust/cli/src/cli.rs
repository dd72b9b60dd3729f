//! Command-line argument definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "blackjack",
    version,
    about = "Single-player blackjack against a house dealer"
)]
pub struct BlackjackCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play interactively on the terminal
    Play {
        /// Shuffle seed; random when omitted
        #[arg(long)]
        seed: Option<u64>,
        /// Stop after this many rounds
        #[arg(long)]
        rounds: Option<u32>,
        /// Append each settled round to this JSONL file
        #[arg(long)]
        log: Option<PathBuf>,
        /// Show the dealer's hole card during the round
        #[arg(long)]
        reveal_dealer: bool,
    },
    /// Deal a single round and print both hands
    Deal {
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print the resolved configuration and where each value came from
    Cfg,
}

/// Subcommand names, in help order.
pub const COMMANDS: &[&str] = &["play", "deal", "cfg"];
