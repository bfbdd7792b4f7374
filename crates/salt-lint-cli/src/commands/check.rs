//! Check command implementation.

use salt_lint_core::{CheckedFiles, Config, LintResult, RuleRegistry, Runner};
use std::path::PathBuf;

/// Runs every input through the registry and returns the sorted matches.
///
/// All runners share one [`CheckedFiles`] handle, so a file reached through
/// several inputs is reported once.
#[must_use]
pub fn run(registry: &RuleRegistry, config: &Config, states: &[PathBuf]) -> LintResult {
    let checked = CheckedFiles::new();
    let mut result = LintResult::new();

    for state in states {
        let runner = Runner::new(registry, state, config, checked.clone());
        result.extend(runner.run());
    }
    result.sort();

    tracing::info!(
        "Checked {} file(s), {} match(es)",
        checked.len(),
        result.len()
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::build_registry;
    use std::sync::Arc;
    use tempfile::TempDir;

    #[test]
    fn merges_and_sorts_matches_across_inputs() {
        let dir = TempDir::new().unwrap();
        let b = dir.path().join("b.sls");
        let a = dir.path().join("a");
        std::fs::create_dir(&a).unwrap();
        std::fs::write(&b, "x:\t\n").unwrap();
        std::fs::write(a.join("init.sls"), "y:  \n\tz\n").unwrap();

        let config = Arc::new(Config::default());
        let registry = build_registry(&config).unwrap();
        let result = run(&registry, &config, &[b.clone(), a.clone(), b.clone()]);

        let keys: Vec<(PathBuf, usize, &str)> = result
            .matches
            .iter()
            .map(|m| (m.filename().to_path_buf(), m.line_number(), m.rule_id()))
            .collect();
        assert_eq!(
            keys,
            vec![
                (a.join("init.sls"), 1, "201"),
                (a.join("init.sls"), 2, "203"),
                (b.clone(), 1, "201"),
                (b, 1, "203"),
            ]
        );
    }
}
