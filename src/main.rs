//! Gallows - command-line front end.

#![warn(missing_docs)]

mod cli;

use std::io::{BufRead, Write};

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command, PlayInput, WordsAction};
use gallows::{
    GallowsConfig, GallowsService, GameError, GameSession, GuessOutcome, Outcome, SessionId,
};
use tracing::{info, instrument, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    initialize_tracing();

    let cli = Cli::parse();

    let mut config = GallowsConfig::load(&cli.config)?;
    if let Some(db_path) = cli.db_path {
        config = config.with_db_path(db_path);
    }
    let service = GallowsService::open(config)?;

    match cli.command.unwrap_or(Command::Play { player: None }) {
        Command::Play { player } => play(&service, player),
        Command::List => list(&service),
        Command::Replay { id } => replay(&service, SessionId::new(id)),
        Command::Stats => stats(&service),
        Command::Clear => {
            service.clear_history()?;
            println!("History cleared.");
            Ok(())
        }
        Command::Words { action } => words(&service, action),
    }
}

/// Play one game on stdin/stdout.
#[instrument(skip(service))]
fn play(service: &GallowsService, player: Option<String>) -> Result<()> {
    let player = match player {
        Some(name) => Some(name),
        None => {
            let prompt = format!("Your name [{}]: ", service.config().default_player_name());
            let name = prompt_line(&prompt)?;
            name.filter(|name| !name.trim().is_empty())
        }
    };

    let mut session = service.start_session(player)?;
    info!(player = %session.player_name(), "Game started");
    println!(
        "Guess the word, {}! Type a letter or the whole word.",
        session.player_name()
    );
    println!("':hint' shows the first letter, ':quit' gives up.");

    while !session.status().is_terminal() {
        print_view(&session);

        let Some(line) = prompt_line("> ")? else {
            println!("Game abandoned.");
            return Ok(());
        };
        let input = match PlayInput::parse(&line) {
            PlayInput::Quit => {
                println!("Game abandoned.");
                return Ok(());
            }
            PlayInput::Hint => {
                println!("Hint: the word starts with {}", session.hint());
                continue;
            }
            PlayInput::Guess(input) => input,
        };

        match service.submit_guess(&mut session, &input)? {
            GuessOutcome::Rejected(reason) => println!("{reason}"),
            GuessOutcome::Accepted(verdict) if verdict.finished.is_none() => {
                if verdict.correct {
                    println!("Correct!");
                } else {
                    println!("Wrong.");
                }
            }
            GuessOutcome::Accepted(_) => {}
        }
    }

    print_view(&session);
    let word = session.secret_word().to_uppercase();
    match session.status().outcome() {
        Some(Outcome::Won) => println!("You won! The word was {word}."),
        _ => println!("You lost. The word was {word}."),
    }
    println!("Mistakes: {}", session.mistake_count());
    match session.stored_id() {
        Some(id) => {
            let raw = id.get();
            println!("Saved as game {id}. Replay it with: gallows replay {raw}");
        }
        None => println!("This game could not be saved."),
    }
    Ok(())
}

fn print_view(session: &GameSession) {
    let view = session.view();
    let wrong: String = view
        .wrong_letters()
        .iter()
        .map(|c| c.to_uppercase().to_string())
        .collect::<Vec<_>>()
        .join(", ");
    println!();
    println!("  {}", view.revealed_word());
    println!(
        "  Mistakes: {}/{}   Attempts left: {}   Wrong letters: {}",
        view.mistake_count(),
        view.max_mistakes(),
        view.attempts_left(),
        if wrong.is_empty() { "-" } else { wrong.as_str() }
    );
}

/// Reads one line; `None` at end of input.
fn prompt_line(prompt: &str) -> Result<Option<String>> {
    print!("{prompt}");
    std::io::stdout().flush()?;
    let mut line = String::new();
    let read = std::io::stdin().lock().read_line(&mut line)?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

#[instrument(skip(service))]
fn list(service: &GallowsService) -> Result<()> {
    let sessions = service.history()?;
    if sessions.is_empty() {
        println!("No finished games yet.");
        return Ok(());
    }

    println!("Game   Player           Word         Result Attempts  Played at");
    for s in &sessions {
        println!(
            "{:<6} {:<16} {:<12} {:<6} {:>8}  {}",
            s.id().to_string(),
            s.player_name(),
            s.secret_word().to_uppercase(),
            s.outcome().to_string(),
            s.attempt_count(),
            s.played_at().format("%Y-%m-%d %H:%M")
        );
    }
    println!();
    println!("Replay a game with: gallows replay ID");
    Ok(())
}

#[instrument(skip(service))]
fn replay(service: &GallowsService, id: SessionId) -> Result<()> {
    let replay = match service.replay(id) {
        Ok(replay) => replay,
        Err(GameError::SessionNotFound { id }) => {
            warn!(%id, "Replay of unknown game");
            println!("Game {id} not found.");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let record = replay.session().record();
    println!(
        "Game {} | Player: {} | Word: {} | Played at {}",
        replay.session().id(),
        record.player_name(),
        record.secret_word().to_uppercase(),
        record.played_at().format("%Y-%m-%d %H:%M")
    );

    for step in replay.steps() {
        let verdict = if *step.was_correct() {
            "correct"
        } else {
            "wrong"
        };
        println!(
            "  Attempt {}: '{}' - {verdict}",
            step.ordinal(),
            step.guessed_text().to_uppercase()
        );
        let mistakes = step.mistakes_at_step();
        println!("    {}   (mistakes: {mistakes})", step.revealed_after());
    }

    println!("Result: {}", replay.outcome());
    Ok(())
}

#[instrument(skip(service))]
fn stats(service: &GallowsService) -> Result<()> {
    let stats = service.statistics()?;
    println!("Games played: {}", stats.total());
    println!("Won:          {}", stats.won());
    println!("Lost:         {}", stats.lost());
    println!("Win rate:     {:.2}%", stats.win_rate_percent());
    Ok(())
}

#[instrument(skip(service))]
fn words(service: &GallowsService, action: WordsAction) -> Result<()> {
    match action {
        WordsAction::Add { word } => {
            let shown = word.trim().to_lowercase();
            if service.add_word(&word)? {
                println!("Added '{shown}'.");
            } else {
                println!("'{shown}' is already in the pool.");
            }
        }
        WordsAction::List => {
            for word in service.words()? {
                println!("{word}");
            }
        }
    }
    Ok(())
}

fn initialize_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into());
    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}
