//! The gallows session state machine.
//!
//! A [`GameSession`] owns one play-through: it evaluates guesses, appends
//! to the attempt log and decides when the game is over. Once the status
//! is terminal it never changes again.

use std::collections::BTreeSet;

use chrono::{NaiveDateTime, Utc};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::invariants::assert_invariants;
use crate::{
    Attempt, DEFAULT_PLAYER_NAME, GameError, GameStatus, Guess, GuessOutcome, MAX_MISTAKES,
    Outcome, Rejection, SessionId, SessionRecord, SessionStore, Verdict, letters_of,
    normalize_word, reveal,
};

/// One game of gallows, from word selection to terminal status.
#[derive(Debug, Clone)]
pub struct GameSession {
    player_name: String,
    secret_word: String,
    guessed_letters: BTreeSet<char>,
    wrong_letters: BTreeSet<char>,
    mistake_count: u32,
    status: GameStatus,
    attempts: Vec<Attempt>,
    started_at: NaiveDateTime,
    finished_at: Option<NaiveDateTime>,
    record_taken: bool,
    stored_id: Option<SessionId>,
}

/// Snapshot of what the player should currently see.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct SessionView {
    player_name: String,
    revealed_word: String,
    wrong_letters: Vec<char>,
    mistake_count: u32,
    attempts_left: u32,
    max_mistakes: u32,
    status: GameStatus,
}

impl GameSession {
    /// Starts a session for `player_name` with the given secret word.
    ///
    /// A missing or blank player name falls back to [`DEFAULT_PLAYER_NAME`].
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidWord`] if the word is empty or not made
    /// of letters.
    #[instrument(skip(word))]
    pub fn create(player_name: Option<String>, word: &str) -> Result<Self, GameError> {
        let secret_word = normalize_word(word)?;
        let player_name = player_name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| DEFAULT_PLAYER_NAME.to_string());

        info!(
            player = %player_name,
            word_len = secret_word.chars().count(),
            "Creating new game session"
        );

        Ok(Self {
            player_name,
            secret_word,
            guessed_letters: BTreeSet::new(),
            wrong_letters: BTreeSet::new(),
            mistake_count: 0,
            status: GameStatus::InProgress,
            attempts: Vec::new(),
            started_at: Utc::now().naive_utc(),
            finished_at: None,
            record_taken: false,
            stored_id: None,
        })
    }

    /// Evaluates one guess.
    ///
    /// Blank input and repeated letters come back as
    /// [`GuessOutcome::Rejected`] with the session untouched.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::GameAlreadyFinished`] once the status is terminal.
    #[instrument(skip(self, input), fields(player = %self.player_name, status = %self.status))]
    pub fn guess(&mut self, input: &str) -> Result<GuessOutcome, GameError> {
        if self.status.is_terminal() {
            warn!("Guess submitted after the game finished");
            return Err(GameError::GameAlreadyFinished);
        }

        let guess = match Guess::parse(input) {
            Ok(guess) => guess,
            Err(reason) => {
                debug!(%reason, "Guess rejected");
                return Ok(GuessOutcome::Rejected(reason));
            }
        };

        let outcome = match guess {
            Guess::Letter(letter) => self.guess_letter(letter),
            Guess::Word(word) => self.guess_word(word),
        };

        assert_invariants(self);
        Ok(outcome)
    }

    /// Evaluates a guess and, if it ended the session, stores the record.
    ///
    /// The record is handed to `store` exactly once per session. A storage
    /// failure is logged and otherwise ignored: the outcome stands.
    ///
    /// # Errors
    ///
    /// Same as [`GameSession::guess`].
    #[instrument(skip(self, input, store), fields(player = %self.player_name))]
    pub fn guess_and_record<S>(&mut self, input: &str, store: &S) -> Result<GuessOutcome, GameError>
    where
        S: SessionStore + ?Sized,
    {
        let outcome = self.guess(input)?;

        if let Some(record) = self.take_record() {
            match store.save(&record) {
                Ok(id) => {
                    info!(session_id = %id, outcome = %record.outcome(), "Session stored");
                    self.stored_id = Some(id);
                }
                Err(e) => {
                    warn!(error = %e, "Failed to store finished session");
                }
            }
        }

        Ok(outcome)
    }

    fn guess_letter(&mut self, letter: char) -> GuessOutcome {
        if self.guessed_letters.contains(&letter) || self.wrong_letters.contains(&letter) {
            debug!(%letter, "Duplicate letter");
            return GuessOutcome::Rejected(Rejection::DuplicateGuess(letter));
        }

        let correct = self.secret_word.contains(letter);
        self.log(letter.to_string(), correct);

        let finished = if correct {
            self.guessed_letters.insert(letter);
            debug!(%letter, revealed = %self.revealed_word(), "Letter hit");
            if letters_of(&self.secret_word).is_subset(&self.guessed_letters) {
                Some(self.finish(Outcome::Won))
            } else {
                None
            }
        } else {
            self.wrong_letters.insert(letter);
            self.mistake_count += 1;
            debug!(%letter, attempts_left = self.attempts_left(), "Letter missed");
            if self.attempts_left() == 0 {
                Some(self.finish(Outcome::Lost))
            } else {
                None
            }
        };

        GuessOutcome::Accepted(Verdict {
            guess: Guess::Letter(letter),
            correct,
            finished,
        })
    }

    fn guess_word(&mut self, word: String) -> GuessOutcome {
        let correct = word == self.secret_word;
        self.log(word.clone(), correct);

        let finished = if correct {
            self.guessed_letters.extend(letters_of(&self.secret_word));
            self.finish(Outcome::Won)
        } else {
            // A wrong word spends the whole budget at once.
            self.mistake_count = MAX_MISTAKES;
            self.finish(Outcome::Lost)
        };

        GuessOutcome::Accepted(Verdict {
            guess: Guess::Word(word),
            correct,
            finished: Some(finished),
        })
    }

    fn log(&mut self, guessed_text: String, correct: bool) {
        let ordinal = self.attempts.len() as u32 + 1;
        self.attempts.push(Attempt::new(
            ordinal,
            guessed_text,
            correct,
            Utc::now().naive_utc(),
        ));
    }

    fn finish(&mut self, outcome: Outcome) -> Outcome {
        self.status = outcome.into();
        self.finished_at = Some(Utc::now().naive_utc());
        info!(
            player = %self.player_name,
            %outcome,
            mistakes = self.mistake_count,
            attempts = self.attempts.len(),
            "Game finished"
        );
        outcome
    }

    /// Returns the finished record the first time it is called on a
    /// terminal session, `None` otherwise.
    #[instrument(skip(self), fields(status = %self.status, record_taken = self.record_taken))]
    pub fn take_record(&mut self) -> Option<SessionRecord> {
        if self.record_taken {
            return None;
        }
        let record = self.record()?;
        self.record_taken = true;
        Some(record)
    }

    /// Snapshot of the finished session, or `None` while in progress.
    pub fn record(&self) -> Option<SessionRecord> {
        let outcome = self.status.outcome()?;
        Some(SessionRecord::new(
            self.player_name.clone(),
            self.secret_word.clone(),
            outcome,
            self.finished_at.unwrap_or(self.started_at),
            self.attempts.clone(),
        ))
    }

    /// Current display form of the word, e.g. `R _ S _`.
    pub fn revealed_word(&self) -> String {
        reveal(&self.secret_word, &self.guessed_letters)
    }

    /// Everything a presentation layer needs to draw the current turn.
    #[instrument(skip(self))]
    pub fn view(&self) -> SessionView {
        SessionView {
            player_name: self.player_name.clone(),
            revealed_word: self.revealed_word(),
            wrong_letters: self.wrong_letters.iter().copied().collect(),
            mistake_count: self.mistake_count,
            attempts_left: self.attempts_left(),
            max_mistakes: MAX_MISTAKES,
            status: self.status,
        }
    }

    /// First letter of the secret word, uppercase.
    pub fn hint(&self) -> String {
        self.secret_word
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_default()
    }

    /// Remaining wrong guesses before the game is lost.
    pub fn attempts_left(&self) -> u32 {
        MAX_MISTAKES.saturating_sub(self.mistake_count)
    }

    /// Returns the player label.
    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    /// Returns the secret word.
    pub fn secret_word(&self) -> &str {
        &self.secret_word
    }

    /// Letters confirmed present in the word.
    pub fn guessed_letters(&self) -> &BTreeSet<char> {
        &self.guessed_letters
    }

    /// Letters confirmed absent from the word.
    pub fn wrong_letters(&self) -> &BTreeSet<char> {
        &self.wrong_letters
    }

    /// Returns the mistake count.
    pub fn mistake_count(&self) -> u32 {
        self.mistake_count
    }

    /// Returns the status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Returns the attempt log.
    pub fn attempts(&self) -> &[Attempt] {
        &self.attempts
    }

    /// Id assigned by the store, once the finished session was saved.
    pub fn stored_id(&self) -> Option<SessionId> {
        self.stored_id
    }
}
