use crate::error::{Result, SessionMiss};
use std::collections::{HashMap, HashSet, VecDeque};

/// Pending disambiguations kept before the oldest one is dropped
pub const DEFAULT_SESSION_CAPACITY: usize = 60;

/// Candidates of one pending disambiguation.
///
/// Index `i` is the `i`-th distinct candidate in the order they were given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionEntry {
    candidates: Vec<String>,
}

impl SessionEntry {
    /// Builds an entry, dropping repeated candidates (the first one wins).
    pub fn new(candidates: impl IntoIterator<Item = String>) -> Self {
        let mut seen = HashSet::new();
        let candidates = candidates
            .into_iter()
            .filter(|candidate| seen.insert(candidate.clone()))
            .collect();
        Self { candidates }
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    pub fn candidate(&self, index: usize) -> Option<&str> {
        self.candidates.get(index).map(String::as_str)
    }

    fn into_candidate(self, index: usize) -> Option<String> {
        self.candidates.into_iter().nth(index)
    }
}

impl From<Vec<String>> for SessionEntry {
    fn from(candidates: Vec<String>) -> Self {
        Self::new(candidates)
    }
}

/// Bounded, insertion-ordered session map.
///
/// Not synchronised; [`crate::SessionRegistry`] owns one behind a mutex.
#[derive(Debug)]
pub struct SessionStore {
    capacity: usize,
    entries: HashMap<String, SessionEntry>,
    order: VecDeque<String>,
}

impl SessionStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: HashMap::new(),
            order: VecDeque::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Keys from oldest to newest
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Stores `entry` under `key`, replacing any previous entry for that key.
    ///
    /// A replaced key keeps its original slot in the eviction order. Returns
    /// the key evicted to stay within capacity, if any.
    pub fn insert(&mut self, key: String, entry: SessionEntry) -> Option<String> {
        if self.entries.insert(key.clone(), entry).is_some() {
            log::debug!("Replaced pending session {key}");
            return None;
        }
        self.order.push_back(key);

        let mut evicted = None;
        while self.order.len() > self.capacity {
            let Some(oldest) = self.order.pop_front() else {
                break;
            };
            self.entries.remove(&oldest);
            log::debug!("Evicted pending session {oldest}");
            evicted = Some(oldest);
        }
        evicted
    }

    pub fn peek(&self, key: &str) -> Option<&SessionEntry> {
        self.entries.get(key)
    }

    /// Removes and returns the entry for `key`.
    pub fn take(&mut self, key: &str) -> Option<SessionEntry> {
        let entry = self.entries.remove(key)?;
        self.order.retain(|k| k != key);
        Some(entry)
    }

    /// Consumes the session and returns the candidate at `index`.
    ///
    /// The session is gone afterwards even when `index` is out of range.
    pub fn resolve(&mut self, key: &str, index: usize) -> Result<String> {
        let entry = self.take(key).ok_or_else(|| SessionMiss::UnknownSession {
            key: key.to_string(),
        })?;
        let size = entry.len();
        entry
            .into_candidate(index)
            .ok_or_else(|| SessionMiss::InvalidChoice {
                key: key.to_string(),
                index,
                size,
            })
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn entry(names: &[&str]) -> SessionEntry {
        SessionEntry::new(names.iter().map(|n| n.to_string()))
    }

    #[test]
    fn entry_indices_follow_input_order() {
        let entry = entry(&["java.util.List", "java.awt.List", "java.util.List"]);
        assert_eq!(entry.len(), 2);
        assert_eq!(entry.candidate(0), Some("java.util.List"));
        assert_eq!(entry.candidate(1), Some("java.awt.List"));
        assert_eq!(entry.candidate(2), None);
    }

    #[test]
    fn insert_evicts_only_the_oldest() {
        let mut store = SessionStore::new(2);
        assert_eq!(store.insert("a".into(), entry(&["A"])), None);
        assert_eq!(store.insert("b".into(), entry(&["B"])), None);
        assert_eq!(store.insert("c".into(), entry(&["C"])), Some("a".to_string()));

        assert_eq!(store.len(), 2);
        assert!(!store.contains("a"));
        assert_eq!(store.keys().collect::<Vec<_>>(), vec!["b", "c"]);
    }

    #[test]
    fn reinserting_a_key_replaces_it_in_place() {
        let mut store = SessionStore::new(2);
        store.insert("a".into(), entry(&["A"]));
        store.insert("b".into(), entry(&["B"]));
        assert_eq!(store.insert("a".into(), entry(&["A2"])), None);

        assert_eq!(store.len(), 2);
        assert_eq!(store.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(store.peek("a").and_then(|e| e.candidate(0)), Some("A2"));

        assert_eq!(store.insert("c".into(), entry(&["C"])), Some("a".to_string()));
        assert_eq!(store.resolve("b", 0).unwrap(), "B");
    }

    #[test]
    fn resolve_is_single_use() {
        let mut store = SessionStore::default();
        store.insert("sess42".into(), entry(&["A", "B", "C"]));

        assert_eq!(store.resolve("sess42", 1).unwrap(), "B");
        assert_eq!(
            store.resolve("sess42", 1).unwrap_err(),
            SessionMiss::UnknownSession {
                key: "sess42".into()
            }
        );
        assert!(store.is_empty());
    }

    #[test]
    fn out_of_range_index_misses_and_consumes() {
        let mut store = SessionStore::default();
        store.insert("sess42".into(), entry(&["A", "B", "C"]));

        assert_eq!(
            store.resolve("sess42", 5).unwrap_err(),
            SessionMiss::InvalidChoice {
                key: "sess42".into(),
                index: 5,
                size: 3,
            }
        );
        assert!(!store.contains("sess42"));
    }

    #[test]
    fn zero_capacity_is_raised_to_one() {
        let mut store = SessionStore::new(0);
        store.insert("a".into(), entry(&["A"]));
        assert_eq!(store.capacity(), 1);
        assert_eq!(store.len(), 1);
    }
}
