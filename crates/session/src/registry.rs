use crate::error::Result;
use crate::key::fresh_session_key;
use crate::store::{SessionEntry, SessionStore, DEFAULT_SESSION_CAPACITY};
use tokio::sync::Mutex;

/// Where a freshly created session lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionHandle {
    pub key: String,
    /// Number of distinct candidates, i.e. valid indices are `0..size`
    pub size: usize,
    /// Session dropped to make room for this one
    pub evicted: Option<String>,
}

/// Shared registry of pending disambiguations.
///
/// Every call takes the lock once, so insert-with-eviction and
/// resolve-and-remove are atomic: of two concurrent resolves for the same key
/// exactly one gets the candidate.
pub struct SessionRegistry {
    store: Mutex<SessionStore>,
}

impl SessionRegistry {
    pub fn new(capacity: usize) -> Self {
        Self {
            store: Mutex::new(SessionStore::new(capacity)),
        }
    }

    /// Stores `candidates` under `key`, or under a fresh key if none is
    /// given.
    pub async fn create_session(
        &self,
        key: Option<String>,
        candidates: impl Into<SessionEntry>,
    ) -> SessionHandle {
        let key = key.unwrap_or_else(fresh_session_key);
        let entry = candidates.into();
        let size = entry.len();

        let evicted = self.store.lock().await.insert(key.clone(), entry);
        log::debug!("Stored {size} choices for session {key}");

        SessionHandle { key, size, evicted }
    }

    /// Consumes the session and returns its candidate at `index`.
    pub async fn resolve(&self, key: &str, index: usize) -> Result<String> {
        self.store.lock().await.resolve(key, index)
    }

    pub async fn contains(&self, key: &str) -> bool {
        self.store.lock().await.contains(key)
    }

    /// Candidates of a pending session, without consuming it
    pub async fn candidates(&self, key: &str) -> Option<Vec<String>> {
        let store = self.store.lock().await;
        store.peek(key).map(|entry| entry.candidates().to_vec())
    }

    pub async fn len(&self) -> usize {
        self.store.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.store.lock().await.is_empty()
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_CAPACITY)
    }
}
