// Thu Feb 5 2026 - Alex

use crate::ledger::UserId;
use indexmap::IndexMap;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub display_name: String,
    pub invocation_count: u64,
    pub total_records: u64,
}

// Per-user counters, only ever incremented by completed extractions.
// Insertion order is kept so operator reports stay stable.
pub struct HistoryStore {
    entries: Mutex<IndexMap<UserId, HistoryEntry>>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(IndexMap::new()),
        }
    }

    pub fn record(&self, user: UserId, display_name: &str, delivered: usize) {
        let mut entries = self.entries.lock();
        match entries.get_mut(&user) {
            Some(entry) => {
                entry.invocation_count += 1;
                entry.total_records += delivered as u64;
            }
            None => {
                entries.insert(
                    user,
                    HistoryEntry {
                        display_name: display_name.to_string(),
                        invocation_count: 1,
                        total_records: delivered as u64,
                    },
                );
            }
        }
    }

    pub fn get(&self, user: UserId) -> Option<HistoryEntry> {
        self.entries.lock().get(&user).cloned()
    }

    pub fn remove(&self, user: UserId) -> bool {
        self.entries.lock().shift_remove(&user).is_some()
    }

    pub fn snapshot(&self) -> IndexMap<UserId, HistoryEntry> {
        self.entries.lock().clone()
    }

    pub fn replace(&self, entries: IndexMap<UserId, HistoryEntry>) {
        *self.entries.lock() = entries;
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_creates_then_accumulates() {
        let history = HistoryStore::new();
        history.record(1, "someone", 5);
        history.record(1, "renamed", 7);

        let entry = history.get(1).unwrap();
        assert_eq!(entry.invocation_count, 2);
        assert_eq!(entry.total_records, 12);
        // Display name is fixed at first sight.
        assert_eq!(entry.display_name, "someone");
    }

    #[test]
    fn test_remove_is_idempotent() {
        let history = HistoryStore::new();
        history.record(1, "someone", 5);
        assert!(history.remove(1));
        assert!(!history.remove(1));
        assert!(history.get(1).is_none());
    }

    #[test]
    fn test_snapshot_preserves_insertion_order() {
        let history = HistoryStore::new();
        history.record(30, "c", 1);
        history.record(10, "a", 1);
        history.record(20, "b", 1);

        let users: Vec<UserId> = history.snapshot().keys().copied().collect();
        assert_eq!(users, vec![30, 10, 20]);
    }
}
