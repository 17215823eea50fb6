//! Tests for the service layer over a real SQLite file.

use tempfile::NamedTempFile;

use gallows::{GallowsConfig, GallowsService, GameError, GameStatus, Outcome, SessionId};

fn open_service(words: &[&str]) -> (NamedTempFile, GallowsService) {
    let db_file = NamedTempFile::new().expect("Failed to create temp file");
    let db_path = db_file.path().to_str().expect("Invalid path");
    let word_list = words
        .iter()
        .map(|w| format!("\"{}\"", w))
        .collect::<Vec<_>>()
        .join(", ");
    let config = GallowsConfig::from_toml(&format!(
        "db_path = \"{}\"\ndefault_player_name = \"Tester\"\nwords = [{}]\n",
        db_path, word_list
    ))
    .expect("Config should parse");

    let service = GallowsService::open(config).expect("Service should open");
    (db_file, service)
}

#[test]
fn test_open_seeds_word_pool() {
    let (_db, service) = open_service(&["rust", "go"]);
    let words = service.words().expect("Words should load");
    assert_eq!(words, vec!["go".to_string(), "rust".to_string()]);
}

#[test]
fn test_start_session_uses_default_player() {
    let (_db, service) = open_service(&["rust"]);
    let session = service.start_session(None).expect("Session should start");
    assert_eq!(session.player_name(), "Tester");
    assert_eq!(session.secret_word(), "rust");
    assert_eq!(session.status(), GameStatus::InProgress);
}

#[test]
fn test_start_session_empty_pool() {
    let (_db, service) = open_service(&[]);
    let result = service.start_session(Some("Ada".to_string()));
    assert!(matches!(result, Err(GameError::NoWordsAvailable)));
}

#[test]
fn test_winning_game_is_stored() {
    let (_db, service) = open_service(&["rust"]);
    let mut session = service
        .start_session(Some("Ada".to_string()))
        .expect("Session should start");

    for letter in ["r", "u", "s"] {
        let outcome = service
            .submit_guess(&mut session, letter)
            .expect("Guess should succeed");
        assert!(outcome.is_correct());
        assert!(session.stored_id().is_none());
    }
    let outcome = service
        .submit_guess(&mut session, "t")
        .expect("Guess should succeed");
    assert_eq!(outcome.finished(), Some(Outcome::Won));

    let id = session.stored_id().expect("Finished game should be stored");
    let history = service.history().expect("History should load");
    assert_eq!(history.len(), 1);
    assert_eq!(*history[0].id(), id);
    assert_eq!(history[0].player_name(), "Ada");
    assert_eq!(*history[0].attempt_count(), 4);
}

#[test]
fn test_guess_after_finish_fails() {
    let (_db, service) = open_service(&["rust"]);
    let mut session = service.start_session(None).expect("Session should start");
    service
        .submit_guess(&mut session, "rusty")
        .expect("Guess should succeed");
    assert_eq!(session.status(), GameStatus::Lost);

    let result = service.submit_guess(&mut session, "r");
    assert!(matches!(result, Err(GameError::GameAlreadyFinished)));
    assert_eq!(service.history().expect("History should load").len(), 1);
}

#[test]
fn test_current_view_tracks_session() {
    let (_db, service) = open_service(&["rust"]);
    let mut session = service.start_session(None).expect("Session should start");
    service
        .submit_guess(&mut session, "x")
        .expect("Guess should succeed");

    let view = service.current_view(&session);
    assert_eq!(view.revealed_word(), "_ _ _ _");
    assert_eq!(*view.mistake_count(), 1);
    assert_eq!(view.wrong_letters(), &vec!['x']);
}

#[test]
fn test_replay_stored_game() {
    let (_db, service) = open_service(&["rust"]);
    let mut session = service.start_session(None).expect("Session should start");
    for guess in ["r", "a", "rust"] {
        service
            .submit_guess(&mut session, guess)
            .expect("Guess should succeed");
    }
    let id = session.stored_id().expect("Finished game should be stored");

    let replay = service.replay(id).expect("Replay should load");
    let steps: Vec<_> = replay.steps().collect();
    assert_eq!(steps.len(), 3);
    assert_eq!(steps[0].revealed_after(), "R _ _ _");
    assert_eq!(*steps[1].mistakes_at_step(), 1);
    assert_eq!(steps[2].revealed_after(), "R U S T");
    assert!(replay.outcome().is_win());
}

#[test]
fn test_replay_unknown_game() {
    let (_db, service) = open_service(&["rust"]);
    let result = service.replay(SessionId::new(42));
    assert!(matches!(
        result,
        Err(GameError::SessionNotFound { id }) if id == SessionId::new(42)
    ));
}

#[test]
fn test_statistics_over_history() {
    let (_db, service) = open_service(&["rust"]);
    for guesses in [&["rust"][..], &["rusk"][..], &["r", "u", "s", "t"][..]] {
        let mut session = service.start_session(None).expect("Session should start");
        for guess in guesses {
            service
                .submit_guess(&mut session, guess)
                .expect("Guess should succeed");
        }
    }

    let stats = service.statistics().expect("Statistics should compute");
    assert_eq!(*stats.total(), 3);
    assert_eq!(*stats.won(), 2);
    assert_eq!(*stats.lost(), 1);
    assert_eq!(*stats.win_rate_percent(), 66.67);
}

#[test]
fn test_statistics_empty_history() {
    let (_db, service) = open_service(&["rust"]);
    let stats = service.statistics().expect("Statistics should compute");
    assert_eq!(*stats.total(), 0);
    assert_eq!(*stats.win_rate_percent(), 0.0);
}

#[test]
fn test_clear_history() {
    let (_db, service) = open_service(&["rust"]);
    let mut session = service.start_session(None).expect("Session should start");
    service
        .submit_guess(&mut session, "rust")
        .expect("Guess should succeed");
    assert_eq!(service.history().expect("History should load").len(), 1);

    service.clear_history().expect("Clear should succeed");
    assert!(service.history().expect("History should load").is_empty());
    let words = service.words().expect("Words should load");
    assert_eq!(words, vec!["rust".to_string()]);
}

#[test]
fn test_add_word() {
    let (_db, service) = open_service(&["rust"]);
    assert!(service.add_word(" Zig ").expect("Add should succeed"));
    assert!(!service.add_word("zig").expect("Add should succeed"));

    let result = service.add_word("c++");
    assert!(matches!(result, Err(GameError::InvalidWord { .. })));
    assert_eq!(
        service.words().expect("Words should load"),
        vec!["rust".to_string(), "zig".to_string()]
    );
}
