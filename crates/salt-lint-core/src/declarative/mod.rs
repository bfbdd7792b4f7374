//! Rules defined in TOML files instead of Rust code.
//!
//! A rules directory holds any number of `*.toml` files, each with one or
//! more `[[rule]]` tables:
//!
//! ```toml
//! [[rule]]
//! id = "901"
//! shortdesc = "Use of cmd.run"
//! tags = ["command"]
//! severity = "HIGH"
//! pattern = '\bcmd\.run\b'
//! ```
//!
//! # Architecture
//!
//! ```text
//! TOML text
//!   ↓ serde (DTO layer)
//! config_dto types
//!   ↓ validate + convert (loader)
//! RegexRule
//!   ↓ load_rules_from_toml() / load_rules_from_dir()
//! Vec<RuleBox>
//! ```

use crate::rule::RuleBox;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

pub mod config_dto;
pub mod loader;
pub mod rules;

pub use rules::{RegexRule, RuleScope};

/// Errors from reading, parsing and validating rule files.
#[derive(Debug, thiserror::Error)]
pub enum LoadRulesError {
    /// TOML deserialization failed.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Rule validation failed.
    #[error("{0}")]
    Load(#[from] loader::LoadError),

    /// The rules directory does not exist.
    #[error("rules directory {0} does not exist")]
    MissingDirectory(PathBuf),

    /// The rules directory could not be enumerated.
    #[error("invalid rules directory pattern: {0}")]
    Glob(#[from] glob::PatternError),

    /// A rule file could not be read.
    #[error("failed to read rule file {path}: {source}")]
    Io {
        /// The file that failed.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// A rule file failed to parse or validate.
    #[error("{path}: {source}")]
    InFile {
        /// The offending rule file.
        path: PathBuf,
        /// What went wrong.
        source: Box<LoadRulesError>,
    },

    /// Two rule files define the same id.
    #[error("duplicate rule id `{id}` in {path} (first defined in {first})")]
    DuplicateId {
        /// The repeated id.
        id: String,
        /// File with the second definition.
        path: PathBuf,
        /// File with the first definition.
        first: PathBuf,
    },
}

/// Parses one rule file's TOML content into rules.
///
/// Returns `Ok(vec![])` if the content has no `[[rule]]` tables.
///
/// # Errors
///
/// Returns an error if TOML parsing or rule validation fails.
pub fn load_rules_from_toml(content: &str) -> Result<Vec<RuleBox>, LoadRulesError> {
    let dto: config_dto::RuleFileDto = toml::from_str(content)?;
    let rules = loader::load(dto)?;
    Ok(rules
        .into_iter()
        .map(|rule| Box::new(rule) as RuleBox)
        .collect())
}

/// Loads every `*.toml` rule file in `dir`, in sorted path order.
///
/// Subdirectories are not searched.
///
/// # Errors
///
/// Returns an error if the directory is missing, any file cannot be read or
/// is invalid, or two files define the same rule id.
pub fn load_rules_from_dir(dir: &Path) -> Result<Vec<RuleBox>, LoadRulesError> {
    if !dir.is_dir() {
        return Err(LoadRulesError::MissingDirectory(dir.to_path_buf()));
    }

    let pattern = format!(
        "{}/*.toml",
        glob::Pattern::escape(&dir.to_string_lossy())
    );
    let mut paths = Vec::new();
    for entry in glob::glob(&pattern)? {
        let path = entry.map_err(|e| LoadRulesError::Io {
            path: e.path().to_path_buf(),
            source: std::io::Error::from(e),
        })?;
        if path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();

    let mut defined: HashMap<String, PathBuf> = HashMap::new();
    let mut all = Vec::new();
    for path in paths {
        debug!("Loading rule file {}", path.display());
        let content = std::fs::read_to_string(&path).map_err(|source| LoadRulesError::Io {
            path: path.clone(),
            source,
        })?;
        let rules = load_rules_from_toml(&content).map_err(|e| LoadRulesError::InFile {
            path: path.clone(),
            source: Box::new(e),
        })?;

        for rule in rules {
            if let Some(first) = defined.get(rule.id()) {
                return Err(LoadRulesError::DuplicateId {
                    id: rule.id().to_string(),
                    path,
                    first: first.clone(),
                });
            }
            defined.insert(rule.id().to_string(), path.clone());
            all.push(rule);
        }
    }

    Ok(all)
}
