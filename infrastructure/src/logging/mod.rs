//! Logging infrastructure: structured filter-event logging.
//!
//! Provides [`JsonlFilterLog`], a JSONL file writer that implements
//! the [`FilterObserver`](navigator_application::FilterObserver) port.

mod jsonl_filter_log;

pub use jsonl_filter_log::JsonlFilterLog;
