//! Word sources and secret word validation.

use rand::seq::SliceRandom;
use tracing::{debug, info, instrument, warn};

use crate::GameError;

/// Words offered when no other pool is configured.
pub const DEFAULT_WORDS: &[&str] = &[
    "python", "golang", "kotlin", "ruby", "java", "swift", "rust", "scala", "perl", "basic",
    "clojure", "erlang", "haskell", "pascal", "julia",
];

/// Supplies secret words for new sessions.
pub trait WordSource {
    /// Draws one word from the pool.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::NoWordsAvailable`] if the pool is empty.
    fn next_word(&self) -> Result<String, GameError>;
}

/// Normalizes a candidate secret word (trim, lowercase).
///
/// # Errors
///
/// Returns [`GameError::InvalidWord`] if the word is empty or contains
/// anything other than letters.
#[instrument(skip(word), fields(word = %word))]
pub fn normalize_word(word: &str) -> Result<String, GameError> {
    let normalized = word.trim().to_lowercase();
    if normalized.is_empty() || !normalized.chars().all(char::is_alphabetic) {
        warn!("Rejected secret word");
        return Err(GameError::InvalidWord {
            word: word.to_string(),
        });
    }
    Ok(normalized)
}

/// Flat in-memory word pool with uniform random selection.
#[derive(Debug, Clone, Default)]
pub struct WordPool {
    words: Vec<String>,
}

impl WordPool {
    /// Builds a pool, dropping invalid and duplicate entries.
    #[instrument(skip(words))]
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut pool: Vec<String> = Vec::new();
        for word in words {
            match normalize_word(word.as_ref()) {
                Ok(w) if !pool.contains(&w) => pool.push(w),
                Ok(_) => debug!(word = word.as_ref(), "Skipping duplicate word"),
                Err(_) => warn!(word = word.as_ref(), "Skipping invalid word"),
            }
        }
        info!(count = pool.len(), "Word pool built");
        Self { words: pool }
    }

    /// Pool seeded with [`DEFAULT_WORDS`].
    pub fn with_defaults() -> Self {
        Self::new(DEFAULT_WORDS.iter().copied())
    }

    /// Returns the words in the pool.
    pub fn words(&self) -> &[String] {
        &self.words
    }
}

impl WordSource for WordPool {
    #[instrument(skip(self), fields(pool_size = self.words.len()))]
    fn next_word(&self) -> Result<String, GameError> {
        let word = self
            .words
            .choose(&mut rand::thread_rng())
            .cloned()
            .ok_or(GameError::NoWordsAvailable)?;
        debug!("Drew word from pool");
        Ok(word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_word() {
        assert_eq!(normalize_word("  Rust ").expect("Valid word"), "rust");
    }

    #[test]
    fn test_normalize_word_rejects_empty_and_non_letters() {
        assert!(matches!(
            normalize_word("   "),
            Err(GameError::InvalidWord { .. })
        ));
        assert!(matches!(
            normalize_word("c++"),
            Err(GameError::InvalidWord { .. })
        ));
    }

    #[test]
    fn test_empty_pool_has_no_words() {
        let pool = WordPool::new(Vec::<String>::new());
        assert!(matches!(pool.next_word(), Err(GameError::NoWordsAvailable)));
    }

    #[test]
    fn test_pool_drops_duplicates_and_invalid_words() {
        let pool = WordPool::new(["Rust", "rust", "", "go lang", "kotlin"]);
        assert_eq!(pool.words(), &["rust".to_string(), "kotlin".to_string()]);
    }

    #[test]
    fn test_pool_draws_from_its_words() {
        let pool = WordPool::with_defaults();
        let word = pool.next_word().expect("Draw failed");
        assert!(DEFAULT_WORDS.contains(&word.as_str()));
    }
}
