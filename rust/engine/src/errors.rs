use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid action: {0}")]
    InvalidAction(String),
    #[error("No round in progress")]
    InactiveRound,
    #[error("Deck is empty")]
    DeckExhausted,
}
