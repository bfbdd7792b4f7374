//! Integration test: built-in rules through the registry and runner.

use salt_lint_core::{CheckedFiles, Config, LintResult, Match, RuleRegistry, Runner};
use salt_lint_rules::default_rules;
use std::sync::Arc;
use tempfile::TempDir;

const STATE: &str = "nginx:  \n\tpkg.installed: []\n# a comment with trailing space \n";

fn lint(config: Config, text: &str) -> Vec<(usize, String)> {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nginx.sls");
    std::fs::write(&path, text).unwrap();

    let config = Arc::new(config);
    let mut registry = RuleRegistry::new(Arc::clone(&config));
    registry.extend(default_rules());

    let mut result = LintResult::new();
    result.extend(Runner::new(&registry, &path, &config, CheckedFiles::new()).run());
    result.sort();
    result
        .matches
        .iter()
        .map(|m: &Match| (m.line_number(), m.rule_id().to_string()))
        .collect()
}

#[test]
fn default_rules_report_sorted_matches() {
    assert_eq!(
        lint(Config::default(), STATE),
        vec![(1, "201".to_string()), (2, "203".to_string())]
    );
}

#[test]
fn skipping_the_tag_disables_every_builtin() {
    let mut config = Config::default();
    config.skip_list.insert("formatting".to_string());
    assert!(lint(config, STATE).is_empty());
}

#[test]
fn skipping_an_id_keeps_the_rest() {
    let mut config = Config::default();
    config.skip_list.insert("203".to_string());
    assert_eq!(lint(config, STATE), vec![(1, "201".to_string())]);
}

#[test]
fn long_line_is_reported_once_at_its_line() {
    let text = format!("a: b\n{}\n", "x".repeat(161));
    assert_eq!(lint(Config::default(), &text), vec![(2, "204".to_string())]);
}
