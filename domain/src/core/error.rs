//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid question key: {0}")]
    InvalidQuestionKey(String),

    #[error("Invalid answer key: {0}")]
    InvalidAnswerKey(String),

    #[error("Unknown sub-option branch: {0}")]
    UnknownBranch(String),

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Unknown funnel: {0}")]
    UnknownFunnel(String),

    #[error("Chip index {index} out of range (0..{len})")]
    ChipOutOfRange { index: usize, len: usize },
}

impl DomainError {
    /// Check if this error came from parsing a persisted key
    pub fn is_key_error(&self) -> bool {
        matches!(
            self,
            DomainError::InvalidQuestionKey(_)
                | DomainError::InvalidAnswerKey(_)
                | DomainError::UnknownBranch(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chip_out_of_range_display() {
        let error = DomainError::ChipOutOfRange { index: 9, len: 6 };
        assert_eq!(error.to_string(), "Chip index 9 out of range (0..6)");
    }

    #[test]
    fn test_is_key_error_check() {
        assert!(DomainError::InvalidAnswerKey("x".to_string()).is_key_error());
        assert!(DomainError::UnknownBranch("y".to_string()).is_key_error());
        assert!(!DomainError::UnknownFunnel("3".to_string()).is_key_error());
    }
}
