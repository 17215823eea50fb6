//! Guess parsing and per-turn results.
//!
//! Raw player input is resolved once into a [`Guess`] at the session
//! boundary, so nothing downstream has to look at string lengths again.

use derive_more::Display;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{Outcome, Rejection};

/// A normalized guess: one letter or a whole-word attempt.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum Guess {
    /// A single letter.
    #[display("{_0}")]
    Letter(char),
    /// A whole-word attempt, judged all-or-nothing.
    #[display("{_0}")]
    Word(String),
}

impl Guess {
    /// Classifies trimmed input by its length, then lowercases it.
    ///
    /// One typed character is always a letter guess, even when its
    /// lowercase form spans several characters.
    ///
    /// # Errors
    ///
    /// Returns [`Rejection::EmptyInput`] if nothing is left after trimming.
    #[instrument(skip(input), fields(input = %input))]
    pub fn parse(input: &str) -> Result<Self, Rejection> {
        let trimmed = input.trim();
        let mut chars = trimmed.chars();
        match (chars.next(), chars.next()) {
            (None, _) => Err(Rejection::EmptyInput),
            (Some(key), None) => Ok(Guess::Letter(key.to_lowercase().next().unwrap_or(key))),
            _ => Ok(Guess::Word(trimmed.to_lowercase())),
        }
    }

    /// Returns the text recorded in the attempt log.
    pub fn text(&self) -> String {
        self.to_string()
    }
}

/// Result of an accepted guess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    /// The guess as evaluated.
    pub guess: Guess,
    /// Whether the guess hit.
    pub correct: bool,
    /// Set when this guess ended the session.
    pub finished: Option<Outcome>,
}

/// What happened to a submitted guess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuessOutcome {
    /// The guess was evaluated and logged.
    Accepted(Verdict),
    /// The guess broke a turn rule; nothing changed.
    Rejected(Rejection),
}

impl GuessOutcome {
    /// Returns true if the guess was evaluated.
    pub fn is_accepted(&self) -> bool {
        matches!(self, GuessOutcome::Accepted(_))
    }

    /// Returns true if the guess was accepted and correct.
    pub fn is_correct(&self) -> bool {
        matches!(self, GuessOutcome::Accepted(Verdict { correct: true, .. }))
    }

    /// Returns the outcome if this guess ended the session.
    pub fn finished(&self) -> Option<Outcome> {
        match self {
            GuessOutcome::Accepted(verdict) => verdict.finished,
            GuessOutcome::Rejected(_) => None,
        }
    }

    /// Returns the rejection reason, if rejected.
    pub fn rejection(&self) -> Option<Rejection> {
        match self {
            GuessOutcome::Rejected(reason) => Some(*reason),
            GuessOutcome::Accepted(_) => None,
        }
    }
}
