//! Preference store port
//!
//! Key-value storage for persisted panel preferences. Entries carry a
//! time-to-live; an expired or unreadable entry reads as absent.

use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use thiserror::Error;

/// Errors that can occur while writing or deleting preferences
#[derive(Error, Debug)]
pub enum PreferenceError {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Storage for persisted preferences.
///
/// Calls are synchronous; callers treat failures as best-effort.
pub trait PreferenceStore: Send + Sync {
    /// Stored value for `key`, or `None` when absent, expired or malformed
    fn get(&self, key: &str) -> Result<Option<Value>, PreferenceError>;

    /// Store `value` under `key`, expiring after `ttl`
    fn set(&self, key: &str, value: Value, ttl: Duration) -> Result<(), PreferenceError>;

    /// Remove `key`; removing a missing key is not an error
    fn delete(&self, key: &str) -> Result<(), PreferenceError>;
}

/// Process-local store, used for tests and when persistence is disabled
#[derive(Default)]
pub struct InMemoryPreferenceStore {
    entries: Mutex<HashMap<String, (Value, Instant)>>,
}

impl InMemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PreferenceStore for InMemoryPreferenceStore {
    fn get(&self, key: &str) -> Result<Option<Value>, PreferenceError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| PreferenceError::Io(e.to_string()))?;
        match entries.get(key) {
            Some((_, expires_at)) if Instant::now() >= *expires_at => {
                entries.remove(key);
                Ok(None)
            }
            Some((value, _)) => Ok(Some(value.clone())),
            None => Ok(None),
        }
    }

    fn set(&self, key: &str, value: Value, ttl: Duration) -> Result<(), PreferenceError> {
        let expires_at = Instant::now()
            .checked_add(ttl)
            .ok_or_else(|| PreferenceError::Serialization("invalid ttl: out of range".to_string()))?;
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| PreferenceError::Io(e.to_string()))?;
        entries.insert(key.to_string(), (value, expires_at));
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), PreferenceError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| PreferenceError::Io(e.to_string()))?;
        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_set_get_delete() {
        let store = InMemoryPreferenceStore::new();
        store
            .set("prefs", json!({ "a": 1 }), Duration::from_secs(60))
            .unwrap();
        assert_eq!(store.get("prefs").unwrap(), Some(json!({ "a": 1 })));

        store.delete("prefs").unwrap();
        assert_eq!(store.get("prefs").unwrap(), None);
        store.delete("prefs").unwrap();
    }

    #[test]
    fn test_expired_entry_reads_as_absent() {
        let store = InMemoryPreferenceStore::new();
        store.set("prefs", json!(true), Duration::ZERO).unwrap();
        assert_eq!(store.get("prefs").unwrap(), None);
        assert!(store.is_empty());
    }

    #[test]
    fn test_overflowing_ttl_is_an_error() {
        let store = InMemoryPreferenceStore::new();
        let result = store.set("prefs", json!(1), Duration::from_secs(u64::MAX));
        assert!(matches!(result, Err(PreferenceError::Serialization(_))));
        assert!(store.is_empty());
    }
}
