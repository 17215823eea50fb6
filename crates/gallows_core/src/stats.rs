//! Win/loss statistics over stored sessions.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::HasOutcome;

/// Aggregated results across all stored sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct Statistics {
    total: usize,
    won: usize,
    lost: usize,
    win_rate_percent: f64,
}

impl Statistics {
    /// Counts wins and losses over `sessions`.
    ///
    /// The win rate is a percentage rounded to two decimals, `0` when
    /// there are no sessions.
    #[instrument(skip(sessions))]
    pub fn compute<'a, T, I>(sessions: I) -> Self
    where
        T: HasOutcome + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        let mut won = 0;
        let mut lost = 0;
        for session in sessions {
            if session.final_outcome().is_win() {
                won += 1;
            } else {
                lost += 1;
            }
        }
        let total = won + lost;

        let win_rate_percent = if total == 0 {
            0.0
        } else {
            (won as f64 / total as f64 * 100.0 * 100.0).round() / 100.0
        };

        info!(total, won, lost, win_rate_percent, "Statistics computed");

        Self {
            total,
            won,
            lost,
            win_rate_percent,
        }
    }
}
