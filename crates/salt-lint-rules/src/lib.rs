//! # salt-lint-rules
//!
//! Built-in lint rules for salt-lint.
//!
//! ## Available Rules
//!
//! | Id | Name | Description |
//! |----|------|-------------|
//! | 201 | `trailing-whitespace` | Forbids whitespace at the end of a line |
//! | 203 | `no-tabs` | Forbids tab characters |
//! | 204 | `line-too-long` | Limits lines to 160 characters |
//!
//! ## Usage
//!
//! ```ignore
//! use salt_lint_core::{Config, RuleRegistry};
//! use salt_lint_rules::default_rules;
//! use std::sync::Arc;
//!
//! let mut registry = RuleRegistry::new(Arc::new(Config::default()));
//! registry.extend(default_rules());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod line_too_long;
mod no_tabs;
mod presets;
mod trailing_whitespace;

pub use line_too_long::{LineTooLong, MAX_LINE_LENGTH};
pub use no_tabs::NoTabs;
pub use presets::default_rules;
pub use trailing_whitespace::TrailingWhitespace;

/// Re-export core types for convenience.
pub use salt_lint_core::{LineMatch, Rule, Severity, StateFile};
