//! Errors raised by the SQLite store.

use derive_more::{Display, Error};
use gallows_core::StoreError;
use tracing::instrument;

/// Stage of a store call that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum DbErrorKind {
    /// The database file could not be opened.
    Connection,
    /// An embedded migration did not apply.
    Migration,
    /// A statement or transaction failed.
    Query,
    /// A stored row does not map back to a game record.
    CorruptRow,
    /// The caller passed data the store refuses.
    InvalidInput,
}

/// Store failure, tagged with its stage and the code location that raised it.
#[derive(Debug, Clone, Display, Error)]
#[display("{kind} error in store: {message} ({file}:{line})")]
pub struct DbError {
    /// Failing stage.
    pub kind: DbErrorKind,
    /// What went wrong.
    pub message: String,
    /// Line that raised the error.
    pub line: u32,
    /// File that raised the error.
    pub file: &'static str,
}

impl DbError {
    /// Builds an error located at the caller.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(kind: DbErrorKind, message: impl Into<String>) -> Self {
        let caller = std::panic::Location::caller();
        Self {
            kind,
            message: message.into(),
            line: caller.line(),
            file: caller.file(),
        }
    }

    /// Opening the database failed.
    #[track_caller]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::new(DbErrorKind::Connection, message)
    }

    /// Applying migrations failed.
    #[track_caller]
    pub fn migration(message: impl Into<String>) -> Self {
        Self::new(DbErrorKind::Migration, message)
    }

    /// A stored value is out of range for the game model.
    #[track_caller]
    pub fn corrupt_row(message: impl Into<String>) -> Self {
        Self::new(DbErrorKind::CorruptRow, message)
    }

    /// The caller supplied something the store will not keep.
    #[track_caller]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(DbErrorKind::InvalidInput, message)
    }
}

impl From<diesel::result::Error> for DbError {
    #[track_caller]
    fn from(err: diesel::result::Error) -> Self {
        Self::new(DbErrorKind::Query, err.to_string())
    }
}

// Keeps the raising location rather than the conversion site.
impl From<DbError> for StoreError {
    fn from(err: DbError) -> Self {
        StoreError {
            message: format!("{}: {}", err.kind, err.message),
            line: err.line,
            file: err.file,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_records_raising_location() {
        let err = DbError::corrupt_row("bad outcome");
        assert_eq!(err.kind, DbErrorKind::CorruptRow);
        assert!(err.file.ends_with("error.rs"));
        let shown = err.to_string();
        assert!(shown.starts_with("corrupt_row error in store: bad outcome"));
    }

    #[test]
    fn test_store_error_keeps_kind_and_location() {
        let err = DbError::migration("table exists");
        let line = err.line;
        let store: StoreError = err.into();
        assert_eq!(store.message, "migration: table exists");
        assert_eq!(store.line, line);
    }

    #[test]
    fn test_diesel_errors_are_query_failures() {
        let err = DbError::from(diesel::result::Error::NotFound);
        assert_eq!(err.kind, DbErrorKind::Query);
    }
}
