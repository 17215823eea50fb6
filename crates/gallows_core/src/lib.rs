//! Pure gallows game logic.
//!
//! # Architecture
//!
//! - **Session**: the state machine turning guesses into a win or a loss
//! - **Replay**: step-by-step reconstruction of a stored attempt log
//! - **Statistics**: win/loss aggregation over stored sessions
//! - **Contracts**: [`WordSource`] and [`SessionStore`], implemented by
//!   the storage layer
//!
//! # Example
//!
//! ```
//! use gallows_core::{GameSession, GameStatus};
//!
//! let mut session = GameSession::create(Some("Ada".to_string()), "rust")?;
//! for letter in ["r", "u", "s", "t"] {
//!     session.guess(letter)?;
//! }
//! assert_eq!(session.revealed_word(), "R U S T");
//! assert_eq!(session.status(), GameStatus::Won);
//! # Ok::<(), gallows_core::GameError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod guess;
pub mod invariants;
mod replay;
mod session;
mod stats;
mod store;
mod types;
mod word;

pub use error::{GameError, Rejection, StoreError};
pub use guess::{Guess, GuessOutcome, Verdict};
pub use replay::{ReplayStep, ReplaySteps, SessionReplay, replay};
pub use session::{GameSession, SessionView};
pub use stats::Statistics;
pub use store::{HasOutcome, SessionRecord, SessionStore, SessionSummary, StoredSession};
pub use types::{
    Attempt, DEFAULT_PLAYER_NAME, GameStatus, HIDDEN_MARKER, MAX_MISTAKES, Outcome, SessionId,
    letters_of, reveal,
};
pub use word::{DEFAULT_WORDS, WordPool, WordSource, normalize_word};
