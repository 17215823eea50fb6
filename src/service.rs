//! Game service layer.

use gallows_core::{
    GameError, GameSession, GuessOutcome, SessionId, SessionReplay, SessionStore, SessionSummary,
    SessionView, Statistics, WordSource,
};
use tracing::{debug, info, instrument};

use crate::{DbError, GallowsConfig, GameRepository};

/// Entry points for the presentation layer.
///
/// Wraps [`GameRepository`] with session start-up, guessing with
/// persist-on-finish, replay and statistics.
#[derive(Debug, Clone)]
pub struct GallowsService {
    repository: GameRepository,
    config: GallowsConfig,
}

impl GallowsService {
    /// Creates a new service backed by the given repository.
    #[instrument(skip(repository, config))]
    pub fn new(repository: GameRepository, config: GallowsConfig) -> Self {
        info!(db_path = %repository.db_path(), "Creating GallowsService");
        Self { repository, config }
    }

    /// Opens the configured database, migrates it and seeds the word pool.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the database cannot be prepared.
    #[instrument(skip(config), fields(db_path = %config.db_path()))]
    pub fn open(config: GallowsConfig) -> Result<Self, DbError> {
        let repository = GameRepository::new(config.db_path().clone())?;
        repository.migrate()?;
        repository.seed_words(config.words())?;
        Ok(Self::new(repository, config))
    }

    /// Returns the underlying repository.
    #[instrument(skip(self))]
    pub fn repository(&self) -> &GameRepository {
        &self.repository
    }

    /// Returns the configuration.
    pub fn config(&self) -> &GallowsConfig {
        &self.config
    }

    /// Starts a session with a word drawn from the pool.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::NoWordsAvailable`] if the pool is empty.
    #[instrument(skip(self))]
    pub fn start_session(&self, player_name: Option<String>) -> Result<GameSession, GameError> {
        let word = self.repository.next_word()?;
        let default_name = self.config.default_player_name();
        let player_name = player_name.unwrap_or_else(|| default_name.clone());
        GameSession::create(Some(player_name), &word)
    }

    /// Submits a guess; a finishing guess stores the session.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::GameAlreadyFinished`] if the session is over.
    #[instrument(skip(self, session, input), fields(player = %session.player_name()))]
    pub fn submit_guess(
        &self,
        session: &mut GameSession,
        input: &str,
    ) -> Result<GuessOutcome, GameError> {
        session.guess_and_record(input, &self.repository)
    }

    /// Returns the current view of `session`.
    #[instrument(skip(self, session))]
    pub fn current_view(&self, session: &GameSession) -> SessionView {
        session.view()
    }

    /// Loads stored session `id` for replay.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::SessionNotFound`] if there is no such session.
    #[instrument(skip(self))]
    pub fn replay(&self, id: SessionId) -> Result<SessionReplay, GameError> {
        SessionReplay::load(&self.repository, id)
    }

    /// Computes win/loss statistics over all stored sessions.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Persistence`] if the history cannot be read.
    #[instrument(skip(self))]
    pub fn statistics(&self) -> Result<Statistics, GameError> {
        let sessions = self.repository.list_all()?;
        debug!(count = sessions.len(), "Computing statistics");
        Ok(Statistics::compute(&sessions))
    }

    /// Returns all stored sessions, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Persistence`] if the history cannot be read.
    #[instrument(skip(self))]
    pub fn history(&self) -> Result<Vec<SessionSummary>, GameError> {
        Ok(self.repository.list_all()?)
    }

    /// Deletes all stored sessions.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Persistence`] on a database failure.
    #[instrument(skip(self))]
    pub fn clear_history(&self) -> Result<(), GameError> {
        Ok(self.repository.clear_all()?)
    }

    /// Adds a word to the pool. Returns `false` if it was already there.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidWord`] for a non-word, or
    /// [`GameError::Persistence`] on a database failure.
    #[instrument(skip(self))]
    pub fn add_word(&self, word: &str) -> Result<bool, GameError> {
        gallows_core::normalize_word(word)?;
        self.repository
            .add_word(word)
            .map_err(|e| GameError::Persistence(e.into()))
    }

    /// Lists the word pool alphabetically.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Persistence`] on a database failure.
    #[instrument(skip(self))]
    pub fn words(&self) -> Result<Vec<String>, GameError> {
        self.repository
            .list_words()
            .map_err(|e| GameError::Persistence(e.into()))
    }
}
