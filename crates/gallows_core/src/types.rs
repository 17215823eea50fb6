//! Core domain types for the gallows game.

use std::collections::BTreeSet;

use chrono::NaiveDateTime;
use derive_getters::Getters;
use derive_more::{Display, From};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Mistake budget for every session.
pub const MAX_MISTAKES: u32 = 6;

/// Player label used when none is given.
pub const DEFAULT_PLAYER_NAME: &str = "Player";

/// Marker shown for a letter that is still hidden.
pub const HIDDEN_MARKER: char = '_';

/// Opaque identifier assigned by a store when a session is saved.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, From, Serialize, Deserialize,
)]
#[display("#{_0}")]
pub struct SessionId(i64);

impl SessionId {
    /// Creates an identifier from its raw store value.
    pub fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Returns the raw store value.
    pub fn get(self) -> i64 {
        self.0
    }
}

/// Lifecycle status of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum GameStatus {
    /// Guesses are still accepted.
    #[strum(to_string = "in progress")]
    InProgress,
    /// The word was revealed.
    #[strum(to_string = "won")]
    Won,
    /// The mistake budget ran out.
    #[strum(to_string = "lost")]
    Lost,
}

impl GameStatus {
    /// Returns true once the session can no longer change.
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }

    /// Returns the terminal outcome, if any.
    pub fn outcome(self) -> Option<Outcome> {
        match self {
            GameStatus::InProgress => None,
            GameStatus::Won => Some(Outcome::Won),
            GameStatus::Lost => Some(Outcome::Lost),
        }
    }
}

/// Final result of a finished session.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum Outcome {
    /// Player revealed the word.
    Won,
    /// Player exhausted the mistake budget.
    Lost,
}

impl Outcome {
    /// Returns true for a win.
    pub fn is_win(self) -> bool {
        matches!(self, Outcome::Won)
    }
}

impl From<Outcome> for GameStatus {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Won => GameStatus::Won,
            Outcome::Lost => GameStatus::Lost,
        }
    }
}

/// One entry of a session's attempt log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct Attempt {
    /// Position in the log, starting at 1.
    ordinal: u32,
    /// Normalized text the player submitted.
    guessed_text: String,
    /// Whether the guess hit.
    was_correct: bool,
    /// When the guess was made.
    timestamp: NaiveDateTime,
}

impl Attempt {
    /// Creates a log entry.
    #[instrument(skip(guessed_text), fields(guessed_text = %guessed_text))]
    pub fn new(
        ordinal: u32,
        guessed_text: String,
        was_correct: bool,
        timestamp: NaiveDateTime,
    ) -> Self {
        Self {
            ordinal,
            guessed_text,
            was_correct,
            timestamp,
        }
    }

    /// Returns the guessed letter when this entry is a single-letter guess.
    pub fn letter(&self) -> Option<char> {
        let mut chars = self.guessed_text.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(c),
            _ => None,
        }
    }

    /// Returns true for a whole-word guess.
    pub fn is_word_guess(&self) -> bool {
        self.letter().is_none()
    }
}

/// Renders the display form of `secret`: guessed letters uppercase,
/// hidden ones as [`HIDDEN_MARKER`], space-separated.
pub fn reveal(secret: &str, guessed: &BTreeSet<char>) -> String {
    let mut out = String::with_capacity(secret.len() * 2);
    for (i, c) in secret.chars().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        if guessed.contains(&c) {
            out.extend(c.to_uppercase());
        } else {
            out.push(HIDDEN_MARKER);
        }
    }
    out
}

/// Distinct letters of `secret`.
pub fn letters_of(secret: &str) -> BTreeSet<char> {
    secret.chars().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reveal_hides_unguessed_letters() {
        let guessed: BTreeSet<char> = ['r', 't'].into_iter().collect();
        assert_eq!(reveal("rust", &guessed), "R _ _ T");
    }

    #[test]
    fn test_reveal_repeated_letters() {
        let guessed: BTreeSet<char> = ['l'].into_iter().collect();
        assert_eq!(reveal("hello", &guessed), "_ _ L L _");
    }

    #[test]
    fn test_outcome_db_strings() {
        assert_eq!(Outcome::Won.to_string(), "won");
        let parsed = "lost".parse::<Outcome>().expect("Parse failed");
        assert_eq!(parsed, Outcome::Lost);
        assert!("draw".parse::<Outcome>().is_err());
    }

    #[test]
    fn test_attempt_letter_detection() {
        let ts = chrono::DateTime::from_timestamp(0, 0)
            .expect("Valid timestamp")
            .naive_utc();
        assert_eq!(Attempt::new(1, "r".into(), true, ts).letter(), Some('r'));
        assert!(Attempt::new(2, "rust".into(), true, ts).is_word_guess());
    }
}
