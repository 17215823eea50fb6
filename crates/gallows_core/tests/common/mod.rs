//! Shared test doubles.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};

use gallows_core::{
    SessionId, SessionRecord, SessionStore, SessionSummary, StoreError, StoredSession,
};

/// In-memory store that records every save.
#[derive(Debug, Default)]
pub struct RecordingStore {
    sessions: RefCell<Vec<StoredSession>>,
    fail_saves: Cell<bool>,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose saves always fail.
    pub fn failing() -> Self {
        let store = Self::default();
        store.fail_saves.set(true);
        store
    }

    pub fn saved(&self) -> Vec<StoredSession> {
        self.sessions.borrow().clone()
    }
}

impl SessionStore for RecordingStore {
    fn save(&self, record: &SessionRecord) -> Result<SessionId, StoreError> {
        if self.fail_saves.get() {
            return Err(StoreError::new("disk full"));
        }
        let mut sessions = self.sessions.borrow_mut();
        let id = SessionId::new(sessions.len() as i64 + 1);
        sessions.push(StoredSession::new(id, record.clone()));
        Ok(id)
    }

    fn get_by_id(&self, id: SessionId) -> Result<Option<StoredSession>, StoreError> {
        Ok(self
            .sessions
            .borrow()
            .iter()
            .find(|s| *s.id() == id)
            .cloned())
    }

    fn list_all(&self) -> Result<Vec<SessionSummary>, StoreError> {
        Ok(self
            .sessions
            .borrow()
            .iter()
            .rev()
            .map(StoredSession::summary)
            .collect())
    }

    fn clear_all(&self) -> Result<(), StoreError> {
        self.sessions.borrow_mut().clear();
        Ok(())
    }
}
