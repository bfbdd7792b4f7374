//! Rule to limit line length.
//!
//! # Detected Patterns
//!
//! Any line longer than [`MAX_LINE_LENGTH`] characters, counted as Unicode
//! scalar values. Comment lines are never checked.

use salt_lint_core::{LineMatch, Rule, Severity, StateFile};

/// Rule id for line-too-long.
pub const CODE: &str = "204";

/// Rule name for line-too-long.
pub const NAME: &str = "line-too-long";

/// Longest line accepted by default.
pub const MAX_LINE_LENGTH: usize = 160;

/// Flags lines longer than the configured maximum.
#[derive(Debug, Clone)]
pub struct LineTooLong {
    max_length: usize,
    shortdesc: String,
}

impl Default for LineTooLong {
    fn default() -> Self {
        Self::new()
    }
}

impl LineTooLong {
    /// Creates a new rule with the default limit.
    #[must_use]
    pub fn new() -> Self {
        Self {
            max_length: MAX_LINE_LENGTH,
            shortdesc: shortdesc_for(MAX_LINE_LENGTH),
        }
    }

    /// Sets the maximum line length.
    #[must_use]
    pub fn max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self.shortdesc = shortdesc_for(max_length);
        self
    }

    /// Longest accepted line, in characters.
    #[must_use]
    pub fn limit(&self) -> usize {
        self.max_length
    }
}

fn shortdesc_for(max_length: usize) -> String {
    format!("Lines should be no longer that {max_length} chars")
}

impl LineTooLong {
    /// Human-readable rule name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        NAME
    }
}

impl Rule for LineTooLong {
    fn id(&self) -> &str {
        CODE
    }

    fn shortdesc(&self) -> &str {
        &self.shortdesc
    }

    fn description(&self) -> &str {
        "Long lines make code harder to read and code review more difficult"
    }

    fn severity(&self) -> Severity {
        Severity::VeryLow
    }

    fn tags(&self) -> Vec<&str> {
        vec!["formatting"]
    }

    fn version_added(&self) -> Option<&str> {
        Some("v0.0.1")
    }

    fn match_line(&self, _file: &StateFile, line: &str) -> LineMatch {
        // Byte length is an upper bound on the character count.
        if line.len() <= self.max_length {
            return LineMatch::NoMatch;
        }
        LineMatch::from_bool(line.chars().count() > self.max_length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use salt_lint_core::{match_lines, FileKind, RuleRef};
    use std::sync::Arc;

    fn check(text: &str) -> Vec<usize> {
        let rule: RuleRef = Arc::new(LineTooLong::new());
        let file = StateFile::new("init.sls", FileKind::State);
        match_lines(&rule, &file, text)
            .iter()
            .map(salt_lint_core::Match::line_number)
            .collect()
    }

    #[test]
    fn test_line_over_limit() {
        let text = format!("short: line\n{}\n", "a".repeat(161));
        assert_eq!(check(&text), vec![2]);
    }

    #[test]
    fn test_line_at_limit() {
        assert!(check(&"a".repeat(160)).is_empty());
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        assert!(check(&"é".repeat(160)).is_empty());
        assert_eq!(check(&"é".repeat(161)), vec![1]);
    }

    #[test]
    fn test_long_comment_is_ignored() {
        assert!(check(&format!("# {}", "a".repeat(200))).is_empty());
    }

    #[test]
    fn test_custom_limit() {
        let rule = LineTooLong::new().max_length(10);
        let file = StateFile::new("init.sls", FileKind::State);
        assert!(rule.match_line(&file, "0123456789a").is_match());
        assert!(!rule.match_line(&file, "0123456789").is_match());
        assert_eq!(rule.limit(), 10);
        assert_eq!(rule.shortdesc(), "Lines should be no longer that 10 chars");
    }

    #[test]
    fn test_metadata() {
        let rule = LineTooLong::new();
        assert_eq!(rule.id(), CODE);
        assert_eq!(rule.shortdesc(), "Lines should be no longer that 160 chars");
        assert_eq!(rule.severity(), Severity::VeryLow);
        assert_eq!(rule.version_added(), Some("v0.0.1"));
        assert_eq!(rule.name(), "line-too-long");
    }
}
