//! SQLite repository for finished sessions and the word pool.

use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::Integer;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use gallows_core::{
    GameError, SessionId, SessionRecord, SessionStore, SessionSummary, StoreError, StoredSession,
    WordSource, normalize_word,
};
use tracing::{debug, info, instrument, warn};

use crate::db::{AttemptRow, DbError, GameRow, NewAttemptRow, NewGameRow, NewWordRow, schema};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Database repository for game history and words.
///
/// Every call opens its own connection; there is no shared handle.
#[derive(Debug, Clone)]
pub struct GameRepository {
    db_path: String,
}

impl GameRepository {
    /// Creates a new repository for the database at the given path.
    ///
    /// Use a file path; `":memory:"` gives every call a fresh empty database.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the path is empty.
    #[instrument(skip(db_path), fields(db_path = %db_path))]
    pub fn new(db_path: String) -> Result<Self, DbError> {
        if db_path.trim().is_empty() {
            return Err(DbError::invalid_input("Database path is empty"));
        }
        info!(path = %db_path, "Creating GameRepository");
        Ok(Self { db_path })
    }

    /// Returns the database path.
    pub fn db_path(&self) -> &str {
        &self.db_path
    }

    /// Establishes a database connection with foreign keys enforced.
    #[instrument(skip(self))]
    fn connection(&self) -> Result<SqliteConnection, DbError> {
        debug!(path = %self.db_path, "Establishing connection");
        let path = &self.db_path;
        let mut conn = SqliteConnection::establish(path)
            .map_err(|e| DbError::connection(format!("Failed to open '{path}': {e}")))?;
        diesel::sql_query("PRAGMA foreign_keys = ON").execute(&mut conn)?;
        Ok(conn)
    }

    /// Applies any pending schema migrations.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a migration fails.
    #[instrument(skip(self))]
    pub fn migrate(&self) -> Result<(), DbError> {
        let mut conn = self.connection()?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| DbError::migration(e.to_string()))?;
        info!(count = applied.len(), "Migrations applied");
        Ok(())
    }

    /// Stores a finished session and its attempt log in one transaction.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if any insert fails; nothing is written then.
    #[instrument(skip(self, record), fields(outcome = %record.outcome()))]
    pub fn record_session(&self, record: &SessionRecord) -> Result<SessionId, DbError> {
        let attempts = record.attempts().len();
        debug!(player = %record.player_name(), attempts, "Recording finished session");
        let mut conn = self.connection()?;

        let game_id = conn.transaction::<i32, DbError, _>(|conn| {
            let game = diesel::insert_into(schema::games::table)
                .values(NewGameRow::from(record))
                .returning(GameRow::as_returning())
                .get_result(conn)?;

            let rows: Vec<NewAttemptRow> = record
                .attempts()
                .iter()
                .map(|attempt| NewAttemptRow::from_attempt(*game.id(), attempt))
                .collect();
            if !rows.is_empty() {
                diesel::insert_into(schema::attempts::table)
                    .values(&rows)
                    .execute(conn)?;
            }

            Ok(*game.id())
        })?;

        info!(game_id, "Session recorded");
        Ok(SessionId::new(i64::from(game_id)))
    }

    /// Loads a stored session with its attempts in ordinal order.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self), fields(id = %id))]
    pub fn find_session(&self, id: SessionId) -> Result<Option<StoredSession>, DbError> {
        debug!("Loading session");
        let Ok(game_id) = i32::try_from(id.get()) else {
            debug!("Id outside the stored range");
            return Ok(None);
        };
        let mut conn = self.connection()?;

        let Some(game) = schema::games::table
            .find(game_id)
            .select(GameRow::as_select())
            .first(&mut conn)
            .optional()?
        else {
            debug!("Session not found");
            return Ok(None);
        };

        let attempts = AttemptRow::belonging_to(&game)
            .select(AttemptRow::as_select())
            .order(schema::attempts::ordinal.asc())
            .load(&mut conn)?;

        let stored = game.into_stored(attempts)?;
        let attempts = stored.record().attempts().len();
        info!(attempts, "Session loaded");
        Ok(Some(stored))
    }

    /// Lists stored sessions with attempt counts, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn list_sessions(&self) -> Result<Vec<SessionSummary>, DbError> {
        debug!("Listing sessions");
        let mut conn = self.connection()?;

        let games = schema::games::table
            .select(GameRow::as_select())
            .order((schema::games::played_at.desc(), schema::games::id.desc()))
            .load(&mut conn)?;

        let attempts = AttemptRow::belonging_to(&games)
            .select(AttemptRow::as_select())
            .load(&mut conn)?;

        let summaries = attempts
            .grouped_by(&games)
            .into_iter()
            .zip(games)
            .map(|(attempts, game)| game.into_summary(attempts.len()))
            .collect::<Result<Vec<_>, _>>()?;

        info!(count = summaries.len(), "Sessions listed");
        Ok(summaries)
    }

    /// Deletes every stored session and attempt.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn clear_sessions(&self) -> Result<(), DbError> {
        let mut conn = self.connection()?;
        let (games, attempts) = conn.transaction::<_, DbError, _>(|conn| {
            let attempts = diesel::delete(schema::attempts::table).execute(conn)?;
            let games = diesel::delete(schema::games::table).execute(conn)?;
            Ok((games, attempts))
        })?;
        info!(games, attempts, "History cleared");
        Ok(())
    }

    /// Adds a word to the pool. Returns `false` if it was already there.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the word is not a valid secret word or a
    /// database error occurs.
    #[instrument(skip(self))]
    pub fn add_word(&self, word: &str) -> Result<bool, DbError> {
        let word = normalize_word(word).map_err(|e| DbError::invalid_input(e.to_string()))?;
        let mut conn = self.connection()?;

        let inserted = diesel::insert_or_ignore_into(schema::words::table)
            .values(NewWordRow::new(word.clone()))
            .execute(&mut conn)?;

        if inserted == 0 {
            debug!(%word, "Word already in pool");
        } else {
            info!(%word, "Word added");
        }
        Ok(inserted > 0)
    }

    /// Lists the word pool alphabetically.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn list_words(&self) -> Result<Vec<String>, DbError> {
        let mut conn = self.connection()?;
        let words = schema::words::table
            .select(schema::words::word)
            .order(schema::words::word.asc())
            .load::<String>(&mut conn)?;
        debug!(count = words.len(), "Words loaded");
        Ok(words)
    }

    /// Fills the pool with `words` if it is currently empty.
    ///
    /// Returns how many words were inserted.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self, words), fields(candidates = words.len()))]
    pub fn seed_words(&self, words: &[String]) -> Result<usize, DbError> {
        let mut conn = self.connection()?;

        let inserted = conn.transaction::<usize, DbError, _>(|conn| {
            let existing: i64 = schema::words::table.count().get_result(conn)?;
            if existing > 0 {
                debug!(existing, "Word pool already seeded");
                return Ok(0);
            }

            let mut inserted = 0;
            for word in words {
                match normalize_word(word) {
                    Ok(word) => {
                        inserted += diesel::insert_or_ignore_into(schema::words::table)
                            .values(NewWordRow::new(word))
                            .execute(conn)?;
                    }
                    Err(e) => warn!(error = %e, "Skipping seed word"),
                }
            }
            Ok(inserted)
        })?;

        if inserted > 0 {
            info!(inserted, "Word pool seeded");
        }
        Ok(inserted)
    }

    /// Draws a random word from the pool, `None` if it is empty.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn random_word(&self) -> Result<Option<String>, DbError> {
        let mut conn = self.connection()?;
        let word = schema::words::table
            .select(schema::words::word)
            .order(sql::<Integer>("RANDOM()"))
            .first::<String>(&mut conn)
            .optional()?;
        debug!(found = word.is_some(), "Random word drawn");
        Ok(word)
    }
}

impl SessionStore for GameRepository {
    fn save(&self, record: &SessionRecord) -> Result<SessionId, StoreError> {
        Ok(self.record_session(record)?)
    }

    fn get_by_id(&self, id: SessionId) -> Result<Option<StoredSession>, StoreError> {
        Ok(self.find_session(id)?)
    }

    fn list_all(&self) -> Result<Vec<SessionSummary>, StoreError> {
        Ok(self.list_sessions()?)
    }

    fn clear_all(&self) -> Result<(), StoreError> {
        Ok(self.clear_sessions()?)
    }
}

impl WordSource for GameRepository {
    #[instrument(skip(self))]
    fn next_word(&self) -> Result<String, GameError> {
        self.random_word()
            .map_err(|e| GameError::Persistence(e.into()))?
            .ok_or_else(|| {
                warn!("Word pool is empty");
                GameError::NoWordsAvailable
            })
    }
}
