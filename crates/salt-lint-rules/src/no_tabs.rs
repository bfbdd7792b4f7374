//! Rule to forbid tab characters.

use salt_lint_core::{LineMatch, Rule, Severity, StateFile};

/// Rule id for no-tabs.
pub const CODE: &str = "203";

/// Rule name for no-tabs.
pub const NAME: &str = "no-tabs";

/// Flags lines containing a tab.
#[derive(Debug, Clone, Default)]
pub struct NoTabs;

impl NoTabs {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl NoTabs {
    /// Human-readable rule name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        NAME
    }
}

impl Rule for NoTabs {
    fn id(&self) -> &str {
        CODE
    }

    fn shortdesc(&self) -> &str {
        "Most files should not contain tabs"
    }

    fn description(&self) -> &str {
        "Tabs can cause unexpected display issues, use spaces"
    }

    fn severity(&self) -> Severity {
        Severity::Low
    }

    fn tags(&self) -> Vec<&str> {
        vec!["formatting"]
    }

    fn version_added(&self) -> Option<&str> {
        Some("v0.0.1")
    }

    fn match_line(&self, _file: &StateFile, line: &str) -> LineMatch {
        LineMatch::from_bool(line.contains('\t'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use salt_lint_core::{match_lines, FileKind, RuleRef};
    use std::sync::Arc;

    fn check(text: &str) -> Vec<usize> {
        let rule: RuleRef = Arc::new(NoTabs::new());
        let file = StateFile::new("init.sls", FileKind::State);
        match_lines(&rule, &file, text)
            .iter()
            .map(salt_lint_core::Match::line_number)
            .collect()
    }

    #[test]
    fn test_tab_indentation() {
        assert_eq!(check("nginx:\n\tpkg.installed: []\n"), vec![2]);
    }

    #[test]
    fn test_tab_inside_line() {
        assert_eq!(check("name: a\tb"), vec![1]);
    }

    #[test]
    fn test_spaces_pass() {
        assert!(check("nginx:\n  pkg.installed: []\n").is_empty());
    }

    #[test]
    fn test_noqa() {
        assert!(check("name: a\tb # noqa: 203").is_empty());
    }
}
