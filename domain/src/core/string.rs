//! String utilities for the domain layer.

/// Case-insensitive substring test.
///
/// Both sides are lower-cased before comparison; an empty needle matches.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// First `max_chars` characters of `s`, with "..." appended when cut
pub fn truncate(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((end, _)) => format!("{}...", &s[..end]),
        None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_ignore_case() {
        assert!(contains_ignore_case("The Family Hub", "the"));
        assert!(contains_ignore_case("Mental Health Plan (MHP)", "mhp"));
        assert!(!contains_ignore_case("Probation", "education"));
        assert!(contains_ignore_case("anything", ""));
    }

    #[test]
    fn test_truncate_keeps_short_text() {
        assert_eq!(truncate("hello", 5), "hello");
        assert_eq!(truncate("", 3), "");
    }

    #[test]
    fn test_truncate_appends_ellipsis() {
        assert_eq!(truncate("hello world", 5), "hello...");
        // Counts characters, not bytes
        assert_eq!(truncate("café au lait", 4), "café...");
    }
}
