//! Error and rejection types for the gallows game.

use derive_more::{Display, Error};
use tracing::instrument;

use crate::SessionId;

/// Failure raised by a persistence gateway, with caller location tracking.
///
/// Persistence failures only affect history features; gameplay never
/// depends on them succeeding.
#[derive(Debug, Clone, Display, Error)]
#[display("Store error: {} at {}:{}", message, file, line)]
pub struct StoreError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl StoreError {
    /// Creates a new store error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// Anomalies signalled to the caller of a game operation.
#[derive(Debug, Clone, Display, Error)]
pub enum GameError {
    /// The secret word is empty or contains something other than letters.
    #[display("Invalid secret word: '{word}'")]
    InvalidWord {
        /// The rejected word, as supplied.
        word: String,
    },

    /// The session already reached a terminal status.
    #[display("Game is already finished")]
    GameAlreadyFinished,

    /// The word source has nothing to offer.
    #[display("No words available")]
    NoWordsAvailable,

    /// No stored session carries the requested identifier.
    #[display("Session {id} not found")]
    SessionNotFound {
        /// The identifier that was looked up.
        id: SessionId,
    },

    /// The persistence gateway failed.
    #[display("Persistence failure: {_0}")]
    Persistence(StoreError),
}

impl From<StoreError> for GameError {
    fn from(err: StoreError) -> Self {
        Self::Persistence(err)
    }
}

/// Expected rule violations inside a turn.
///
/// These are returned as [`GuessOutcome::Rejected`](crate::GuessOutcome)
/// rather than as errors: the caller re-prompts and the session is unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Rejection {
    /// The input was blank after trimming.
    #[display("Enter a letter or a word")]
    EmptyInput,

    /// The letter was already guessed, right or wrong.
    #[display("Letter '{}' was already guessed", _0.to_uppercase())]
    DuplicateGuess(char),
}
