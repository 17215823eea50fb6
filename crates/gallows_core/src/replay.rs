//! Step-by-step reconstruction of stored sessions.
//!
//! Replay never re-runs the game rules: it folds the stored attempt log,
//! trusting each entry's recorded verdict. Because it is a pure function
//! of an immutable record, the same record always yields the same steps.

use std::collections::BTreeSet;

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::{
    Attempt, GameError, MAX_MISTAKES, Outcome, SessionId, SessionRecord, SessionStore,
    StoredSession, letters_of, reveal,
};

/// The state of a replayed session around one attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ReplayStep {
    ordinal: u32,
    guessed_text: String,
    was_correct: bool,
    revealed_before: String,
    revealed_after: String,
    mistakes_at_step: u32,
}

/// Lazy iterator over the [`ReplayStep`]s of a record.
///
/// Call [`replay`] again for a fresh pass from the first attempt.
#[derive(Debug, Clone)]
pub struct ReplaySteps<'a> {
    secret_word: &'a str,
    attempts: std::slice::Iter<'a, Attempt>,
    guessed: BTreeSet<char>,
    mistakes: u32,
}

/// Starts a replay over `record`'s attempt log.
#[instrument(skip(record), fields(attempts = record.attempts().len()))]
pub fn replay(record: &SessionRecord) -> ReplaySteps<'_> {
    ReplaySteps {
        secret_word: record.secret_word(),
        attempts: record.attempts().iter(),
        guessed: BTreeSet::new(),
        mistakes: 0,
    }
}

impl Iterator for ReplaySteps<'_> {
    type Item = ReplayStep;

    fn next(&mut self) -> Option<Self::Item> {
        let attempt = self.attempts.next()?;
        let revealed_before = reveal(self.secret_word, &self.guessed);
        let correct = *attempt.was_correct();

        match (attempt.letter(), correct) {
            (Some(letter), true) => {
                self.guessed.insert(letter);
            }
            (Some(_), false) => {
                self.mistakes = (self.mistakes + 1).min(MAX_MISTAKES);
            }
            (None, true) => {
                self.guessed.extend(letters_of(self.secret_word));
            }
            (None, false) => {
                self.mistakes = MAX_MISTAKES;
            }
        }

        let step = ReplayStep {
            ordinal: *attempt.ordinal(),
            guessed_text: attempt.guessed_text().clone(),
            was_correct: correct,
            revealed_before,
            revealed_after: reveal(self.secret_word, &self.guessed),
            mistakes_at_step: self.mistakes,
        };
        debug!(
            ordinal = step.ordinal,
            mistakes = step.mistakes_at_step,
            "Replay step"
        );
        Some(step)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.attempts.size_hint()
    }
}

impl ExactSizeIterator for ReplaySteps<'_> {}

/// A stored session loaded for replay.
#[derive(Debug, Clone)]
pub struct SessionReplay {
    session: StoredSession,
}

impl SessionReplay {
    /// Fetches session `id` from `store`.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::SessionNotFound`] if the store has no such
    /// session, or [`GameError::Persistence`] if the lookup fails.
    #[instrument(skip(store))]
    pub fn load<S>(store: &S, id: SessionId) -> Result<Self, GameError>
    where
        S: SessionStore + ?Sized,
    {
        match store.get_by_id(id)? {
            Some(session) => {
                info!(
                    session_id = %id,
                    attempts = session.record().attempts().len(),
                    "Loaded session for replay"
                );
                Ok(Self::from_stored(session))
            }
            None => {
                warn!(session_id = %id, "Replay requested for unknown session");
                Err(GameError::SessionNotFound { id })
            }
        }
    }

    /// Wraps an already loaded session.
    pub fn from_stored(session: StoredSession) -> Self {
        Self { session }
    }

    /// Returns the loaded session.
    pub fn session(&self) -> &StoredSession {
        &self.session
    }

    /// Starts a fresh pass over the steps.
    pub fn steps(&self) -> ReplaySteps<'_> {
        replay(self.session.record())
    }

    /// Final outcome as stored.
    pub fn outcome(&self) -> Outcome {
        *self.session.record().outcome()
    }
}
