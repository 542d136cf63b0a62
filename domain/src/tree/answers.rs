//! Answer store and the "Other" free-text capture.
//!
//! # Other capture
//!
//! ```text
//! Idle ──select("Other")──> Pending(key, "")
//! Pending ──edit(text)────> Pending(key, text)
//! Pending ──commit────────> Idle   store[key] = "Other: <text>" (or delete when blank)
//! Pending ──cancel────────> Idle   delete store[key]
//! ```
//!
//! Only one capture is live at a time. Opening "Other" on a second question
//! drops the first draft without committing it and without touching the first
//! question's stored answer.

use crate::tree::key::AnswerKey;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Option label that opens the free-text capture
pub const OTHER_OPTION: &str = "Other";

/// Prefix of a committed free-text answer
pub const OTHER_PREFIX: &str = "Other: ";

/// An in-flight free-text entry for an "Other" selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtherCapture {
    pub key: AnswerKey,
    pub draft: String,
}

/// Mapping from answer key to the selected value
///
/// A key present in the store always carries a non-empty value; a pending
/// "Other" entry lives in [`OtherCapture`] until committed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerStore {
    answers: BTreeMap<AnswerKey, String>,
    #[serde(skip)]
    capture: Option<OtherCapture>,
}

impl AnswerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a store from persisted entries, dropping blank values
    pub fn from_entries(entries: impl IntoIterator<Item = (AnswerKey, String)>) -> Self {
        Self {
            answers: entries
                .into_iter()
                .filter(|(_, value)| !value.trim().is_empty())
                .collect(),
            capture: None,
        }
    }

    /// Select `option` for `key`, toggling it off when already selected.
    ///
    /// Selecting [`OTHER_OPTION`] never writes; it opens a capture instead.
    /// Any other selection closes an open capture.
    pub fn set_answer(&mut self, key: AnswerKey, option: &str) {
        if option == OTHER_OPTION {
            self.capture = Some(OtherCapture {
                key,
                draft: String::new(),
            });
            return;
        }

        self.capture = None;

        let toggles_off = match self.answers.get(&key) {
            Some(current) => {
                current == option || (is_other_value(current) && option == OTHER_OPTION)
            }
            None => false,
        };

        if toggles_off {
            self.answers.remove(&key);
        } else {
            self.answers.insert(key, option.to_string());
        }
    }

    /// Replace the draft text of the open capture (no-op when idle)
    pub fn edit_other(&mut self, text: &str) {
        if let Some(capture) = self.capture.as_mut() {
            capture.draft = text.to_string();
        }
    }

    /// Commit the open capture's draft.
    ///
    /// A blank draft deletes the answer for the capture key.
    pub fn commit_other(&mut self) {
        let Some(capture) = self.capture.take() else {
            return;
        };
        let text = capture.draft.trim();
        if text.is_empty() {
            self.answers.remove(&capture.key);
        } else {
            self.answers
                .insert(capture.key, format!("{}{}", OTHER_PREFIX, text));
        }
    }

    /// Close the open capture and delete its key's answer
    pub fn cancel_other(&mut self) {
        if let Some(capture) = self.capture.take() {
            self.answers.remove(&capture.key);
        }
    }

    pub fn clear_all(&mut self) {
        self.answers.clear();
        self.capture = None;
    }

    pub fn get(&self, key: &AnswerKey) -> Option<&str> {
        self.answers.get(key).map(String::as_str)
    }

    pub fn is_answered(&self, key: &AnswerKey) -> bool {
        self.answers.contains_key(key)
    }

    /// Whether `option` renders as selected for `key`
    ///
    /// A committed free-text answer or a pending capture marks "Other".
    pub fn is_selected(&self, key: &AnswerKey, option: &str) -> bool {
        if option == OTHER_OPTION {
            let pending = self.capture.as_ref().is_some_and(|c| &c.key == key);
            return pending || self.get(key).is_some_and(is_other_value);
        }
        self.get(key) == Some(option)
    }

    pub fn other_capture(&self) -> Option<&OtherCapture> {
        self.capture.as_ref()
    }

    pub fn entries(&self) -> &BTreeMap<AnswerKey, String> {
        &self.answers
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }
}

/// Whether a stored value is a committed free-text answer
pub fn is_other_value(value: &str) -> bool {
    value.starts_with(OTHER_PREFIX)
}
