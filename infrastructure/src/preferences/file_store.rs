//! File-backed preference store.
//!
//! Each key is stored as one JSON envelope file in a directory:
//!
//! ```json
//! { "value": { ... }, "expiresAt": "2026-11-18T09:30:00.000Z" }
//! ```
//!
//! Reads of an expired or malformed envelope return `None`; an expired
//! file is removed on read.

use chrono::{DateTime, Utc};
use navigator_application::{PreferenceError, PreferenceStore};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Envelope {
    value: Value,
    expires_at: DateTime<Utc>,
}

/// Preference store writing one file per key under a directory
pub struct FilePreferenceStore {
    dir: PathBuf,
}

impl FilePreferenceStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Platform data directory: `$XDG_DATA_HOME/resource-navigator/preferences`
    pub fn default_dir() -> Option<PathBuf> {
        dirs::data_dir().map(|d| d.join("resource-navigator").join("preferences"))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File holding `key`; characters outside `[A-Za-z0-9_-]` become `_`
    pub fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{}.json", name))
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn get(&self, key: &str) -> Result<Option<Value>, PreferenceError> {
        let path = self.path_for(key);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(PreferenceError::Io(e.to_string())),
        };

        let envelope: Envelope = match serde_json::from_str(&content) {
            Ok(envelope) => envelope,
            Err(e) => {
                debug!("Ignoring malformed preference file {}: {}", path.display(), e);
                return Ok(None);
            }
        };

        if Utc::now() >= envelope.expires_at {
            debug!("Preference {} expired at {}", key, envelope.expires_at);
            let _ = std::fs::remove_file(&path);
            return Ok(None);
        }

        Ok(Some(envelope.value))
    }

    fn set(&self, key: &str, value: Value, ttl: Duration) -> Result<(), PreferenceError> {
        let ttl = chrono::Duration::from_std(ttl)
            .map_err(|e| PreferenceError::Serialization(format!("invalid ttl: {e}")))?;
        let expires_at = Utc::now()
            .checked_add_signed(ttl)
            .ok_or_else(|| PreferenceError::Serialization("invalid ttl: out of range".to_string()))?;
        let envelope = Envelope { value, expires_at };
        let json = serde_json::to_string(&envelope)
            .map_err(|e| PreferenceError::Serialization(e.to_string()))?;

        std::fs::create_dir_all(&self.dir).map_err(|e| PreferenceError::Io(e.to_string()))?;
        std::fs::write(self.path_for(key), json).map_err(|e| PreferenceError::Io(e.to_string()))
    }

    fn delete(&self, key: &str) -> Result<(), PreferenceError> {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(PreferenceError::Io(e.to_string())),
        }
    }
}
