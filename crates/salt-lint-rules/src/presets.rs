//! Rule presets.

use crate::{LineTooLong, NoTabs, TrailingWhitespace};
use salt_lint_core::RuleBox;

/// Returns the rules loaded when no rules directory overrides them.
///
/// Registration order follows rule id.
#[must_use]
pub fn default_rules() -> Vec<RuleBox> {
    vec![
        Box::new(TrailingWhitespace::new()),
        Box::new(NoTabs::new()),
        Box::new(LineTooLong::new()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_rules_have_unique_ids() {
        let rules = default_rules();
        let mut ids: Vec<&str> = rules.iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec!["201", "203", "204"]);
        ids.dedup();
        assert_eq!(ids.len(), rules.len());
    }

    #[test]
    fn default_rules_are_tagged_formatting() {
        for rule in default_rules() {
            assert!(rule.tags().contains(&"formatting"), "{}", rule.id());
            assert!(!rule.shortdesc().is_empty());
        }
    }
}
