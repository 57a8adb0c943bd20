use crate::difficulty::Difficulty;
use crate::round::RoundStatus;
use thiserror::Error;

/// Errors raised by round play and the game controller.
#[derive(Error, Debug)]
pub enum GameError {
    #[error("Guess must be exactly one letter, got {0:?}")]
    InvalidGuessInput(String),
    #[error("Round is already {0}, no more guesses are accepted")]
    InvalidStateTransition(RoundStatus),
    #[error("Secret word must be a non-empty run of letters, got {0:?}")]
    InvalidSecretWord(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Errors raised while opening, reading or writing the Hall of Fame.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Hall of Fame has more than one row for level {0}")]
    DuplicateLevel(Difficulty),
}

pub type Result<T> = core::result::Result<T, GameError>;
