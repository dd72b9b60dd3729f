//! # blackjack-engine: Blackjack Rules Core
//!
//! Pure rules logic for a single-player blackjack table: deck construction
//! and shuffling, soft-ace scoring, and the round state machine
//! (deal, hit, stand, dealer auto-play, settlement and tallies).
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and deck construction
//! - [`deck`] - Fisher-Yates shuffling with an injected RNG
//! - [`hand`] - Hand scoring with soft-ace adjustment
//! - [`game`] - Session state, outcomes and win/loss/tie tallies
//! - [`engine`] - Round transitions and the seeded [`engine::Engine`]
//! - [`logger`] - JSONL round history
//! - [`errors`] - Error types for round operations
//!
//! ## Quick Start
//!
//! ```rust
//! use blackjack_engine::cards::{Card, Rank, Suit};
//! use blackjack_engine::hand::compute_score;
//!
//! let hand = [
//!     Card::new(Suit::Spades, Rank::Ace),
//!     Card::new(Suit::Hearts, Rank::Ace),
//!     Card::new(Suit::Clubs, Rank::Nine),
//! ];
//! assert_eq!(compute_score(&hand), 21);
//! ```
//!
//! ## Playing a Round
//!
//! Transitions take a state snapshot and return a new one; the caller decides
//! what to persist.
//!
//! ```rust
//! use blackjack_engine::engine::{Action, Engine, Transition};
//! use blackjack_engine::errors::GameError;
//! use blackjack_engine::game::GameState;
//!
//! let mut engine = Engine::new(Some(42));
//! let fresh = GameState::new("table-1");
//!
//! // hit before any deal is rejected
//! assert_eq!(
//!     engine.apply(&fresh, Action::Hit),
//!     Err(GameError::InactiveRound)
//! );
//!
//! match engine.apply(&fresh, Action::Deal).unwrap() {
//!     Transition::Continues(state) => assert!(state.round_active),
//!     Transition::RoundEnded { state, outcome } => {
//!         assert!(outcome.is_player_win());
//!         assert_eq!(state.tally.wins, 1);
//!     }
//! }
//! ```

pub mod cards;
pub mod deck;
pub mod engine;
pub mod errors;
pub mod game;
pub mod hand;
pub mod logger;
