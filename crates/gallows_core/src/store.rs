//! Persistence gateway contract and the records it exchanges.

use chrono::NaiveDateTime;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{Attempt, Outcome, SessionId, StoreError};

/// Immutable snapshot of a finished session, ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct SessionRecord {
    player_name: String,
    secret_word: String,
    outcome: Outcome,
    played_at: NaiveDateTime,
    attempts: Vec<Attempt>,
}

impl SessionRecord {
    /// Creates a record. Attempts are expected in ordinal order.
    #[instrument(skip(attempts), fields(attempt_count = attempts.len()))]
    pub fn new(
        player_name: String,
        secret_word: String,
        outcome: Outcome,
        played_at: NaiveDateTime,
        attempts: Vec<Attempt>,
    ) -> Self {
        Self {
            player_name,
            secret_word,
            outcome,
            played_at,
            attempts,
        }
    }
}

/// A [`SessionRecord`] as held by a store, addressed by its id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct StoredSession {
    id: SessionId,
    record: SessionRecord,
}

impl StoredSession {
    /// Pairs a record with the id its store assigned.
    pub fn new(id: SessionId, record: SessionRecord) -> Self {
        Self { id, record }
    }

    /// Returns the listing summary for this session.
    #[instrument(skip(self), fields(id = %self.id))]
    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            id: self.id,
            player_name: self.record.player_name.clone(),
            secret_word: self.record.secret_word.clone(),
            outcome: self.record.outcome,
            played_at: self.record.played_at,
            attempt_count: self.record.attempts.len(),
        }
    }
}

/// Listing row for a stored session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct SessionSummary {
    id: SessionId,
    player_name: String,
    secret_word: String,
    outcome: Outcome,
    played_at: NaiveDateTime,
    attempt_count: usize,
}

impl SessionSummary {
    /// Creates a summary row.
    pub fn new(
        id: SessionId,
        player_name: String,
        secret_word: String,
        outcome: Outcome,
        played_at: NaiveDateTime,
        attempt_count: usize,
    ) -> Self {
        Self {
            id,
            player_name,
            secret_word,
            outcome,
            played_at,
            attempt_count,
        }
    }
}

/// Anything that carries a final outcome.
pub trait HasOutcome {
    /// Returns the final outcome.
    fn final_outcome(&self) -> Outcome;
}

impl HasOutcome for SessionRecord {
    fn final_outcome(&self) -> Outcome {
        self.outcome
    }
}

impl HasOutcome for StoredSession {
    fn final_outcome(&self) -> Outcome {
        self.record.outcome
    }
}

impl HasOutcome for SessionSummary {
    fn final_outcome(&self) -> Outcome {
        self.outcome
    }
}

impl HasOutcome for Outcome {
    fn final_outcome(&self) -> Outcome {
        *self
    }
}

/// Durable storage for finished sessions.
///
/// Implementations must write a record and its full attempt log
/// atomically: a reader never sees a session with a truncated log.
pub trait SessionStore {
    /// Stores a finished session and returns its new id.
    fn save(&self, record: &SessionRecord) -> Result<SessionId, StoreError>;

    /// Loads a stored session with its attempt log in ordinal order.
    fn get_by_id(&self, id: SessionId) -> Result<Option<StoredSession>, StoreError>;

    /// Lists all stored sessions, newest first.
    fn list_all(&self) -> Result<Vec<SessionSummary>, StoreError>;

    /// Deletes every stored session.
    fn clear_all(&self) -> Result<(), StoreError>;
}
