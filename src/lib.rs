//! Gallows library - word-guessing game with durable history.
//!
//! This library binds the pure game logic from [`gallows_core`] to a
//! SQLite store, a TOML configuration and a small service layer.
//!
//! # Architecture
//!
//! - **Db**: diesel repository implementing the session store and word source
//! - **Config**: TOML configuration with environment override
//! - **Service**: start, guess, replay and statistics entry points
//!
//! # Example
//!
//! ```no_run
//! use gallows::{GallowsConfig, GallowsService};
//!
//! # fn example() -> anyhow::Result<()> {
//! let service = GallowsService::open(GallowsConfig::new("gallows.db".to_string()))?;
//! let mut session = service.start_session(Some("Ada".to_string()))?;
//! service.submit_guess(&mut session, "e")?;
//! println!("{}", session.revealed_word());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod db;
mod service;

pub use config::{ConfigError, DB_PATH_ENV, GallowsConfig};
pub use db::{
    AttemptRow, DbError, DbErrorKind, GameRepository, GameRow, NewAttemptRow, NewGameRow,
    NewWordRow,
};
pub use service::GallowsService;

pub use gallows_core::{
    GameError, GameSession, GameStatus, Guess, GuessOutcome, Outcome, Rejection, ReplayStep,
    SessionId, SessionReplay, SessionStore, SessionSummary, SessionView, Statistics, StoredSession,
    WordSource,
};
