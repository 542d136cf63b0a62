//! JSONL file writer for filter-change events.
//!
//! Each [`FilterCriteria`] is serialized as a single JSON line with a
//! `type` field and `timestamp`, appended to the file via a buffered writer.

use navigator_application::FilterObserver;
use navigator_domain::FilterCriteria;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

const EVENT_TYPE: &str = "filter_change";

/// JSONL filter log that writes one JSON object per line.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Flushes on `Drop`.
pub struct JsonlFilterLog {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlFilterLog {
    /// Create a log appending to the given path.
    ///
    /// Creates the file (and parent directories) if they don't exist.
    /// Returns `None` if the file cannot be opened.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create filter log directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not open filter log file {}: {}", path.display(), e);
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    /// Get the path to the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FilterObserver for JsonlFilterLog {
    fn on_filter_change(&self, criteria: &FilterCriteria) {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

        let mut record = match serde_json::to_value(criteria) {
            Ok(serde_json::Value::Object(map)) => map,
            _ => return,
        };
        record.insert(
            "type".to_string(),
            serde_json::Value::String(EVENT_TYPE.to_string()),
        );
        record.insert(
            "timestamp".to_string(),
            serde_json::Value::String(timestamp),
        );

        let Ok(line) = serde_json::to_string(&record) else {
            return;
        };

        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
            let _ = writer.flush();
        }
    }
}

impl Drop for JsonlFilterLog {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use navigator_domain::FilterState;

    fn read_lines(path: &Path) -> Vec<serde_json::Value> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_filter_log_writes_valid_jsonl() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("filters.jsonl");
        let log = JsonlFilterLog::new(&path).unwrap();

        let mut state = FilterState::new();
        state.search_text = "therapy".to_string();
        log.on_filter_change(&state.criteria());
        state.select_chip(2).unwrap();
        log.on_filter_change(&state.criteria());
        drop(log);

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 2);
        for line in &lines {
            assert_eq!(line["type"], "filter_change");
            assert!(line["timestamp"].is_string());
        }
        assert_eq!(lines[0]["search"], "therapy");
        assert_eq!(lines[0]["selectedFilter"], "All");
        assert_eq!(lines[1]["selectedFilter"], "Probation");
    }

    #[test]
    fn test_filter_log_appends_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("filters.jsonl");
        let criteria = FilterState::new().criteria();

        for _ in 0..2 {
            let log = JsonlFilterLog::new(&path).unwrap();
            log.on_filter_change(&criteria);
        }

        assert_eq!(read_lines(&path).len(), 2);
    }
}
