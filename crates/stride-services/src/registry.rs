//! Session registry — process-wide map of session id → session handle.
//!
//! Explicit and injectable: constructed once in `main` (or fresh per test),
//! never a module-level global. Sessions are fully independent — the
//! registry hands out `Arc<SessionHandle>`s and otherwise stays out of the
//! way, so a failure inside one session can never corrupt another.

use std::sync::Arc;

use dashmap::DashMap;

use stride_core::SessionError;

use crate::ids::random_id;
use crate::session::SessionHandle;

/// All active sessions. Clone-shared across gateway tasks.
#[derive(Clone, Default)]
pub struct SessionRegistry {
    sessions: Arc<DashMap<String, Arc<SessionHandle>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(DashMap::new()),
        }
    }

    /// Create a session with a fresh unique id. The deck is fixed for the
    /// session's lifetime.
    pub fn create(&self, name: &str, questions: Arc<Vec<String>>) -> (String, Arc<SessionHandle>) {
        loop {
            let id = random_id(4);
            if self.sessions.contains_key(&id) {
                // 4 random bytes collide rarely, but ids must be unique.
                continue;
            }
            let handle = SessionHandle::new(id.clone(), name.to_string(), questions);
            self.sessions.insert(id.clone(), handle.clone());
            tracing::info!(session_id = %id, name, "session created");
            return (id, handle);
        }
    }

    pub fn get(&self, id: &str) -> Result<Arc<SessionHandle>, SessionError> {
        self.sessions
            .get(id)
            .map(|e| e.value().clone())
            .ok_or(SessionError::SessionNotFound)
    }

    /// Drop a session entirely. Subscribers see their feed close once the
    /// last handle clone is gone.
    pub fn remove(&self, id: &str) -> bool {
        let removed = self.sessions.remove(id).is_some();
        if removed {
            tracing::info!(session_id = %id, "session deleted");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Snapshot of all (id, handle) pairs, for the status endpoint.
    pub fn entries(&self) -> Vec<(String, Arc<SessionHandle>)> {
        self.sessions
            .iter()
            .map(|e| (e.key().clone(), e.value().clone()))
            .collect()
    }

    /// Drop every session. Shutdown path.
    pub fn clear(&self) {
        self.sessions.clear();
    }
}
