//! Database models and their conversions to domain types.

use chrono::NaiveDateTime;
use derive_getters::Getters;
use derive_new::new;
use diesel::prelude::*;
use gallows_core::{Attempt, Outcome, SessionId, SessionRecord, SessionSummary, StoredSession};
use tracing::instrument;

use crate::db::{DbError, schema};

/// Finished game header row.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable, Getters)]
#[diesel(table_name = schema::games)]
pub struct GameRow {
    id: i32,
    player_name: String,
    secret_word: String,
    outcome: String,
    played_at: NaiveDateTime,
}

impl GameRow {
    /// Parses the stored outcome string into an [`Outcome`].
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the string is not a valid outcome value.
    #[instrument(skip(self), fields(outcome = %self.outcome))]
    pub fn parse_outcome(&self) -> Result<Outcome, DbError> {
        let raw = &self.outcome;
        raw.parse::<Outcome>()
            .map_err(|_| DbError::corrupt_row(format!("Invalid outcome '{raw}'")))
    }

    /// Assembles the domain session from this header and its attempt rows.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a stored value cannot be mapped back.
    #[instrument(skip(self, attempts), fields(game_id = self.id, attempts = attempts.len()))]
    pub fn into_stored(self, attempts: Vec<AttemptRow>) -> Result<StoredSession, DbError> {
        let outcome = self.parse_outcome()?;
        let attempts = attempts
            .into_iter()
            .map(AttemptRow::into_attempt)
            .collect::<Result<Vec<_>, _>>()?;
        let record = SessionRecord::new(
            self.player_name,
            self.secret_word,
            outcome,
            self.played_at,
            attempts,
        );
        let id = SessionId::new(i64::from(self.id));
        Ok(StoredSession::new(id, record))
    }

    /// Builds the listing summary for this header.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the outcome cannot be parsed.
    #[instrument(skip(self), fields(game_id = self.id))]
    pub fn into_summary(self, attempt_count: usize) -> Result<SessionSummary, DbError> {
        let outcome = self.parse_outcome()?;
        Ok(SessionSummary::new(
            SessionId::new(i64::from(self.id)),
            self.player_name,
            self.secret_word,
            outcome,
            self.played_at,
            attempt_count,
        ))
    }
}

/// Insertable game header.
#[derive(Debug, Clone, Insertable, new, Getters)]
#[diesel(table_name = schema::games)]
pub struct NewGameRow {
    player_name: String,
    secret_word: String,
    outcome: String,
    played_at: NaiveDateTime,
}

impl From<&SessionRecord> for NewGameRow {
    fn from(record: &SessionRecord) -> Self {
        let outcome: &'static str = (*record.outcome()).into();
        Self::new(
            record.player_name().clone(),
            record.secret_word().clone(),
            outcome.to_string(),
            *record.played_at(),
        )
    }
}

/// One attempt log row.
#[derive(Debug, Clone, Queryable, Identifiable, Associations, Selectable, Getters)]
#[diesel(table_name = schema::attempts)]
#[diesel(belongs_to(GameRow, foreign_key = game_id))]
pub struct AttemptRow {
    id: i32,
    game_id: i32,
    ordinal: i32,
    guessed_text: String,
    was_correct: bool,
    attempted_at: NaiveDateTime,
}

impl AttemptRow {
    /// Maps the row back to a log entry.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the ordinal is negative.
    pub fn into_attempt(self) -> Result<Attempt, DbError> {
        let id = self.id;
        let ordinal = u32::try_from(self.ordinal)
            .map_err(|_| DbError::corrupt_row(format!("Negative ordinal in attempt {id}")))?;
        Ok(Attempt::new(
            ordinal,
            self.guessed_text,
            self.was_correct,
            self.attempted_at,
        ))
    }
}

/// Insertable attempt log row.
#[derive(Debug, Clone, Insertable, new)]
#[diesel(table_name = schema::attempts)]
pub struct NewAttemptRow {
    game_id: i32,
    ordinal: i32,
    guessed_text: String,
    was_correct: bool,
    attempted_at: NaiveDateTime,
}

impl NewAttemptRow {
    /// Builds the row for `attempt` under game `game_id`.
    pub fn from_attempt(game_id: i32, attempt: &Attempt) -> Self {
        Self::new(
            game_id,
            *attempt.ordinal() as i32,
            attempt.guessed_text().clone(),
            *attempt.was_correct(),
            *attempt.timestamp(),
        )
    }
}

/// Insertable word pool row.
#[derive(Debug, Clone, Insertable, new)]
#[diesel(table_name = schema::words)]
pub struct NewWordRow {
    word: String,
}
