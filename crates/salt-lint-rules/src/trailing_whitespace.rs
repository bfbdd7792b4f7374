//! Rule to forbid trailing whitespace.
//!
//! Carriage returns are removed before checking, so CRLF line endings alone
//! do not trigger the rule.

use salt_lint_core::{LineMatch, Rule, Severity, StateFile};

/// Rule id for trailing-whitespace.
pub const CODE: &str = "201";

/// Rule name for trailing-whitespace.
pub const NAME: &str = "trailing-whitespace";

/// Flags lines ending in whitespace.
#[derive(Debug, Clone, Default)]
pub struct TrailingWhitespace;

impl TrailingWhitespace {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl TrailingWhitespace {
    /// Human-readable rule name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        NAME
    }
}

impl Rule for TrailingWhitespace {
    fn id(&self) -> &str {
        CODE
    }

    fn shortdesc(&self) -> &str {
        "Trailing whitespace"
    }

    fn description(&self) -> &str {
        "There should not be any trailing whitespace"
    }

    fn severity(&self) -> Severity {
        Severity::Info
    }

    fn tags(&self) -> Vec<&str> {
        vec!["formatting"]
    }

    fn version_added(&self) -> Option<&str> {
        Some("v0.0.1")
    }

    fn match_line(&self, _file: &StateFile, line: &str) -> LineMatch {
        let line = line.replace('\r', "");
        LineMatch::from_bool(line.trim_end() != line)
    }
}
