//! Tests for replay reconstruction.

mod common;

use common::RecordingStore;
use gallows_core::{
    Attempt, GameError, GameSession, MAX_MISTAKES, Outcome, ReplayStep, SessionId, SessionRecord,
    SessionReplay, SessionStore, replay,
};

fn played(word: &str, guesses: &[&str]) -> SessionRecord {
    let mut session =
        GameSession::create(Some("Replayer".to_string()), word).expect("Create failed");
    for guess in guesses {
        session.guess(guess).expect("Guess failed");
    }
    session.take_record().expect("Session should be finished")
}

#[test]
fn test_replay_letter_progression() {
    let record = played("rust", &["r", "x", "u", "s", "t"]);
    let steps: Vec<ReplayStep> = replay(&record).collect();

    assert_eq!(steps.len(), 5);
    assert_eq!(steps[0].revealed_before(), "_ _ _ _");
    assert_eq!(steps[0].revealed_after(), "R _ _ _");
    assert_eq!(*steps[0].mistakes_at_step(), 0);

    assert_eq!(steps[1].guessed_text(), "x");
    assert!(!steps[1].was_correct());
    assert_eq!(steps[1].revealed_before(), steps[1].revealed_after());
    assert_eq!(*steps[1].mistakes_at_step(), 1);

    assert_eq!(steps[4].revealed_after(), "R U S T");
    assert_eq!(*steps[4].mistakes_at_step(), 1);

    let ordinals: Vec<u32> = steps.iter().map(|s| *s.ordinal()).collect();
    assert_eq!(ordinals, vec![1, 2, 3, 4, 5]);
}

#[test]
fn test_replay_matches_live_session() {
    let guesses = ["e", "a", "l", "q", "r", "g", "n"];
    let mut session = GameSession::create(None, "erlang").expect("Create failed");
    let mut live = Vec::new();
    for guess in guesses {
        if session.guess(guess).expect("Guess failed").is_accepted() {
            live.push((session.revealed_word(), session.mistake_count()));
        }
    }
    let record = session.take_record().expect("Session should be finished");

    let replayed: Vec<(String, u32)> = replay(&record)
        .map(|s| (s.revealed_after().clone(), *s.mistakes_at_step()))
        .collect();
    assert_eq!(replayed, live);
}

#[test]
fn test_replay_correct_word_reveals_everything() {
    let record = played("scala", &["s", "scala"]);
    let steps: Vec<ReplayStep> = replay(&record).collect();
    assert_eq!(steps[1].revealed_before(), "S _ _ _ _");
    assert_eq!(steps[1].revealed_after(), "S C A L A");
    assert_eq!(*steps[1].mistakes_at_step(), 0);
}

#[test]
fn test_replay_wrong_word_jumps_to_max_mistakes() {
    let record = played("perl", &["x", "ruby"]);
    let steps: Vec<ReplayStep> = replay(&record).collect();
    assert_eq!(*steps[0].mistakes_at_step(), 1);
    assert_eq!(*steps[1].mistakes_at_step(), MAX_MISTAKES);
    assert_eq!(steps[1].revealed_after(), "_ _ _ _");
}

#[test]
fn test_replay_is_deterministic() {
    let record = played("julia", &["j", "x", "u", "y", "julia"]);
    let first: Vec<ReplayStep> = replay(&record).collect();
    let second: Vec<ReplayStep> = replay(&record).collect();
    assert_eq!(first, second);
}

#[test]
fn test_replay_trusts_recorded_verdicts() {
    let ts = chrono::DateTime::from_timestamp(1_700_000_000, 0)
        .expect("Valid timestamp")
        .naive_utc();
    let record = SessionRecord::new(
        "Legacy".to_string(),
        "ab".to_string(),
        Outcome::Won,
        ts,
        vec![
            Attempt::new(1, "a".to_string(), true, ts),
            Attempt::new(2, "b".to_string(), false, ts),
        ],
    );
    let steps: Vec<ReplayStep> = replay(&record).collect();
    assert_eq!(steps[1].revealed_after(), "A _");
    assert_eq!(*steps[1].mistakes_at_step(), 1);
}

#[test]
fn test_load_from_store_and_restart() {
    let store = RecordingStore::new();
    let id = store
        .save(&played("ruby", &["r", "u", "b", "y"]))
        .expect("Save failed");

    let loaded = SessionReplay::load(&store, id).expect("Load failed");
    assert_eq!(loaded.outcome(), Outcome::Won);
    assert_eq!(loaded.steps().len(), 4);
    assert_eq!(
        loaded.steps().collect::<Vec<_>>(),
        loaded.steps().collect::<Vec<_>>()
    );
}

#[test]
fn test_load_missing_session() {
    let store = RecordingStore::new();
    let result = SessionReplay::load(&store, SessionId::new(42));
    match result {
        Err(GameError::SessionNotFound { id }) => assert_eq!(id, SessionId::new(42)),
        other => panic!("Expected SessionNotFound, got {other:?}"),
    }
}
