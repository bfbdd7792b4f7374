//! List tags command implementation.

use salt_lint_core::RuleRegistry;

/// Renders one line per tag, sorted by tag: `formatting [201, 203, 204]`.
#[must_use]
pub fn render(registry: &RuleRegistry) -> String {
    registry
        .tags()
        .iter()
        .map(|(tag, ids)| format!("{tag} [{}]", ids.join(", ")))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Prints the tag listing.
pub fn run(registry: &RuleRegistry) {
    println!("{}", render(registry));
}
