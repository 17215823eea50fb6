//! Command-line interface for gallows.

use clap::{Parser, Subcommand};

/// Gallows - guess the word before the mistakes run out
#[derive(Parser, Debug)]
#[command(name = "gallows")]
#[command(about = "Word-guessing game with replayable history", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, global = true, default_value = "gallows.toml")]
    pub config: std::path::PathBuf,

    /// Database file, overriding the configuration
    #[arg(long, global = true)]
    pub db_path: Option<String>,

    /// Subcommand to run (defaults to `play`)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a new game
    Play {
        /// Player name (defaults to the configured name)
        #[arg(short, long)]
        player: Option<String>,
    },

    /// List finished games, newest first
    List,

    /// Replay a finished game step by step
    Replay {
        /// Game id as shown by `list`
        id: i64,
    },

    /// Show win/loss statistics
    Stats,

    /// Delete all finished games
    Clear,

    /// Manage the word pool
    Words {
        /// Word pool action
        #[command(subcommand)]
        action: WordsAction,
    },
}

/// Word pool actions
#[derive(Subcommand, Debug)]
pub enum WordsAction {
    /// Add a word to the pool
    Add {
        /// The word to add
        word: String,
    },

    /// List the words in the pool
    List,
}

/// One line typed during `play`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayInput {
    /// `:quit` or `:exit`: abandon the game.
    Quit,
    /// `:hint` or `?`: show the first letter.
    Hint,
    /// Anything else, submitted as a guess.
    Guess(String),
}

impl PlayInput {
    /// Classifies a line. Commands carry a `:` prefix, which no secret
    /// word can contain, so every word stays guessable.
    pub fn parse(line: &str) -> Self {
        match line.trim().to_lowercase().as_str() {
            ":quit" | ":exit" | ":q" => PlayInput::Quit,
            ":hint" | "?" => PlayInput::Hint,
            _ => PlayInput::Guess(line.to_string()),
        }
    }
}
