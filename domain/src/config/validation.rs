//! Configuration issues.
//!
//! Validation never fails loading: it returns structured issues with a
//! severity, and the caller decides whether to warn or abort.

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the configuration cannot work at all.
    Error,
    /// Non-fatal: the configuration works but may not behave as expected.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// Both a URL and a file are configured as the resource source.
    ConflictingSources,
    /// A source URL or file set to an empty string.
    EmptySource,
    /// A fetch timeout of zero seconds.
    ZeroTimeout,
    /// A preference lifetime of zero days.
    ZeroTtl,
    /// A preference lifetime too long to represent as an expiry time.
    TtlTooLarge,
    /// A listing page size of zero rows.
    ZeroPageSize,
}

/// A detected issue in the configuration.
#[derive(Debug, Clone)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn error(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    pub fn warning(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}
