//! # salt-lint-core
//!
//! Rule-execution engine for linting SaltStack state files.
//!
//! This crate provides the pieces every salt-lint front end needs:
//!
//! - [`Rule`] trait with per-line and whole-text matching capabilities
//! - [`RuleRegistry`] for holding rules and filtering them by tag, id and skip list
//! - [`Runner`] for expanding an input path into state files and checking each once
//! - [`Config`] and [`PathPatternSet`] for exclusions and per-rule ignore patterns
//! - [`Match`] and [`LintResult`] for collecting and ordering findings
//!
//! ## Example
//!
//! ```ignore
//! use salt_lint_core::{CheckedFiles, Config, LintResult, RuleRegistry, Runner};
//! use std::sync::Arc;
//!
//! let config = Arc::new(Config::default());
//! let mut registry = RuleRegistry::new(Arc::clone(&config));
//! registry.register(Box::new(MyRule));
//!
//! let checked = CheckedFiles::new();
//! let mut result = LintResult::new();
//! for input in ["top.sls", "webserver/"] {
//!     let runner = Runner::new(&registry, input, &config, checked.clone());
//!     result.extend(runner.run());
//! }
//! result.sort();
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod checked;
mod config;
mod patterns;
mod registry;
mod rule;
mod runner;
mod types;

/// Declarative rules loaded from TOML rule files.
pub mod declarative;

/// Utility modules for rule implementations.
pub mod utils;

pub use checked::CheckedFiles;
pub use config::{
    Config, ConfigError, ConfigFile, ConfigFormat, Options, RuleFileOptions, RuleOptions, Scalar,
    StringOrList,
};
pub use patterns::{PathPatternSet, PatternError};
pub use registry::RuleRegistry;
pub use rule::{match_full_text, match_lines, Rule, RuleBox, RuleRef};
pub use runner::{Runner, STATE_DIR_ENTRY};
pub use types::{
    sort_matches, FileKind, LineMatch, LintResult, Match, Severity, StateFile, TextMatch,
    UnknownSeverity,
};
