//! TOML deserialization types (DTO layer).
//!
//! These types exist solely for serde deserialization.
//! They are converted to [`RegexRule`](super::rules::RegexRule)s by the loader.

use serde::Deserialize;

/// Raw contents of one rule file: a list of `[[rule]]` tables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RuleFileDto {
    /// Rule definitions, in file order.
    #[serde(rename = "rule", default)]
    pub rules: Vec<RegexRuleDto>,
}

/// TOML representation of a pattern-based rule.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegexRuleDto {
    /// Rule id, digits only (e.g. "901").
    pub id: String,
    /// One-line summary.
    pub shortdesc: String,
    /// Longer explanation.
    #[serde(default)]
    pub description: String,
    /// Severity name (default: "MEDIUM").
    #[serde(default = "default_severity_str")]
    pub severity: String,
    /// Tags the rule belongs to.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Release the rule first appeared in.
    #[serde(default)]
    pub version_added: Option<String>,
    /// Regular expression searched for.
    pub pattern: String,
    /// "line" (default) or "text".
    #[serde(default = "default_scope_str")]
    pub scope: String,
    /// Message reported instead of `shortdesc`.
    #[serde(default)]
    pub message: Option<String>,
    /// Replace `{{ ... }}` expressions before matching (line scope only).
    #[serde(default)]
    pub unjinja: bool,
}

fn default_severity_str() -> String {
    "MEDIUM".to_string()
}

fn default_scope_str() -> String {
    "line".to_string()
}
