//! First-class invariants for a gallows session.
//!
//! Invariants are logical properties that must hold after every accepted
//! guess. They are checked in debug builds and tested independently.

use crate::{GameSession, GameStatus, MAX_MISTAKES, letters_of};

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// No letter is both a hit and a miss.
pub struct DisjointLetters;

impl Invariant<GameSession> for DisjointLetters {
    fn holds(session: &GameSession) -> bool {
        session
            .guessed_letters()
            .is_disjoint(session.wrong_letters())
    }

    fn description() -> &'static str {
        "Guessed and wrong letters must be disjoint"
    }
}

/// Mistakes equal the wrong letters, except after a failed word guess.
pub struct MistakesTracked;

impl Invariant<GameSession> for MistakesTracked {
    fn holds(session: &GameSession) -> bool {
        let wrong = session.wrong_letters().len() as u32;
        let failed_word = session
            .attempts()
            .iter()
            .any(|a| a.is_word_guess() && !a.was_correct());
        if failed_word {
            session.mistake_count() == MAX_MISTAKES
        } else {
            session.mistake_count() == wrong && wrong <= MAX_MISTAKES
        }
    }

    fn description() -> &'static str {
        "Mistake count must match wrong letters or be forced to the maximum"
    }
}

/// Log ordinals run 1, 2, 3, ...
pub struct ContiguousOrdinals;

impl Invariant<GameSession> for ContiguousOrdinals {
    fn holds(session: &GameSession) -> bool {
        session
            .attempts()
            .iter()
            .enumerate()
            .all(|(i, a)| *a.ordinal() as usize == i + 1)
    }

    fn description() -> &'static str {
        "Attempt ordinals must be contiguous from 1"
    }
}

/// Status agrees with the letters and the mistake budget.
pub struct StatusConsistent;

impl Invariant<GameSession> for StatusConsistent {
    fn holds(session: &GameSession) -> bool {
        let all_revealed = letters_of(session.secret_word()).is_subset(session.guessed_letters());
        match session.status() {
            GameStatus::InProgress => !all_revealed && session.attempts_left() > 0,
            GameStatus::Won => all_revealed,
            GameStatus::Lost => session.attempts_left() == 0,
        }
    }

    fn description() -> &'static str {
        "Status must agree with revealed letters and attempts left"
    }
}

/// Returns descriptions of every violated invariant.
pub fn violations(session: &GameSession) -> Vec<&'static str> {
    let mut found = Vec::new();
    if !DisjointLetters::holds(session) {
        found.push(DisjointLetters::description());
    }
    if !MistakesTracked::holds(session) {
        found.push(MistakesTracked::description());
    }
    if !ContiguousOrdinals::holds(session) {
        found.push(ContiguousOrdinals::description());
    }
    if !StatusConsistent::holds(session) {
        found.push(StatusConsistent::description());
    }
    found
}

/// Panics in debug builds if any invariant is violated.
pub(crate) fn assert_invariants(session: &GameSession) {
    debug_assert!(
        violations(session).is_empty(),
        "Invariant violations: {:?}",
        violations(session)
    );
}
