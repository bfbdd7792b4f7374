//! Command implementations.

pub mod check;
pub mod list_rules;
pub mod list_tags;
pub mod output;

use anyhow::{Context, Result};
use salt_lint_core::{Config, RuleRegistry};
use salt_lint_rules::default_rules;
use std::sync::Arc;

/// Builds the rule registry for a run.
///
/// Rules directories are loaded first, in the order given; the built-in
/// rules follow when no directory is configured or `-R` asks for them.
///
/// # Errors
///
/// Returns an error if a rules directory cannot be loaded.
pub fn build_registry(config: &Arc<Config>) -> Result<RuleRegistry> {
    let mut registry = RuleRegistry::new(Arc::clone(config));

    for dir in &config.rulesdirs {
        registry
            .load_directory(dir)
            .with_context(|| format!("Failed to load rules from {}", dir.display()))?;
    }

    if config.uses_builtin_rules() {
        registry.extend(default_rules());
    }

    tracing::debug!("Registered {} rules", registry.len());
    Ok(registry)
}
