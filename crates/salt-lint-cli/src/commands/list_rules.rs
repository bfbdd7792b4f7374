//! List rules command implementation.

use salt_lint_core::RuleRegistry;

/// Prints every registered rule with its description, sorted by id.
pub fn run(registry: &RuleRegistry) {
    println!("{registry}");
}
