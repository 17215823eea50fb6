//! Property tests over random words and guess sequences.

use gallows_core::{
    GameError, GameSession, GameStatus, MAX_MISTAKES, Outcome, invariants, letters_of, replay,
};
use proptest::prelude::*;

/// Mostly single letters, with the occasional whole-word attempt.
fn guess_input() -> impl Strategy<Value = String> {
    prop_oneof![8 => "[a-z]", 1 => "[a-z]{2,6}", 1 => " *"]
}

proptest! {
    #[test]
    fn prop_invariants_hold_for_any_guesses(
        word in "[a-z]{1,8}",
        guesses in prop::collection::vec(guess_input(), 0..24)
    ) {
        let mut session = GameSession::create(None, &word).expect("Create failed");
        for guess in &guesses {
            let before = session.status();
            match session.guess(guess) {
                Ok(_) => {
                    prop_assert_eq!(before, GameStatus::InProgress);
                }
                Err(GameError::GameAlreadyFinished) => {
                    prop_assert!(before.is_terminal());
                    prop_assert_eq!(session.status(), before);
                }
                Err(e) => return Err(TestCaseError::fail(format!("unexpected error: {e}"))),
            }
            let wrong = session.wrong_letters();
            prop_assert!(session.guessed_letters().is_disjoint(wrong));
            prop_assert!(session.mistake_count() <= MAX_MISTAKES);
            prop_assert!(invariants::violations(&session).is_empty());
        }
    }

    #[test]
    fn prop_revealing_every_letter_keeps_mistakes(
        word in "[a-m]{1,8}",
        misses in prop::collection::btree_set("[n-z]", 0..MAX_MISTAKES as usize),
        rotation in 0usize..8,
        reversed in any::<bool>()
    ) {
        let mut session = GameSession::create(None, &word).expect("Create failed");
        for miss in &misses {
            session.guess(miss).expect("Guess failed");
        }
        let mistakes = session.mistake_count();
        prop_assert_eq!(mistakes as usize, misses.len());

        let mut letters: Vec<char> = letters_of(&word).into_iter().collect();
        let len = letters.len();
        letters.rotate_left(rotation % len);
        if reversed {
            letters.reverse();
        }
        for letter in letters {
            let outcome = session.guess(&letter.to_string()).expect("Guess failed");
            prop_assert!(outcome.is_correct());
        }

        prop_assert_eq!(session.status(), GameStatus::Won);
        prop_assert_eq!(session.mistake_count(), mistakes);
    }

    #[test]
    fn prop_replay_ends_where_the_session_ended(
        word in "[a-z]{1,8}",
        guesses in prop::collection::vec(guess_input(), 0..24)
    ) {
        let mut session = GameSession::create(None, &word).expect("Create failed");
        for guess in &guesses {
            if session.status().is_terminal() {
                break;
            }
            session.guess(guess).expect("Guess failed");
        }
        let revealed = session.revealed_word();
        let mistakes = session.mistake_count();

        if let Some(record) = session.take_record() {
            let last = replay(&record).last();
            let last = last.expect("A finished session has attempts");
            prop_assert_eq!(last.revealed_after(), &revealed);
            prop_assert_eq!(*last.mistakes_at_step(), mistakes);
            let won = *record.outcome() == Outcome::Won;
            prop_assert_eq!(won, revealed.chars().all(|c| c != '_'));
        }
    }
}
