//! SQLite persistence for finished sessions and the word pool.

mod error;
mod models;
mod repository;
mod schema; // Diesel generated schema - internal use only

pub use error::{DbError, DbErrorKind};
pub use models::{AttemptRow, GameRow, NewAttemptRow, NewGameRow, NewWordRow};
pub use repository::GameRepository;
