//! Configuration types for salt-lint.
//!
//! A [`Config`] is resolved from two sources that are merged field by field:
//! command line [`Options`] and an optional [`ConfigFile`] (YAML `.salt-lint`
//! or `salt-lint.toml`). Lists are concatenated, booleans are OR-ed and
//! verbosity levels are added. Every path pattern is compiled during
//! resolution, so an invalid configuration never reaches the runner.

use crate::patterns::{PathPatternSet, PatternError};
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::{Path, PathBuf};

/// Configuration errors.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    #[diagnostic(code(salt_lint::config::io))]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("invalid config: {message}")]
    #[diagnostic(
        code(salt_lint::config::parse),
        help("check the YAML/TOML syntax and the value types of each key")
    )]
    Parse {
        /// Parse error message.
        message: String,
    },

    /// A path pattern could not be compiled.
    #[error("invalid pattern in `{key}`: {source}")]
    #[diagnostic(
        code(salt_lint::config::pattern),
        help("patterns use .gitignore syntax, e.g. `tests/**/*.jinja` or `build/`")
    )]
    Pattern {
        /// Where the pattern was configured (e.g. "exclude_paths").
        key: String,
        /// The compile error.
        source: PatternError,
    },
}

/// Format of a configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// YAML, the format of the classic `.salt-lint` file.
    Yaml,
    /// TOML.
    Toml,
}

impl ConfigFormat {
    /// Picks the format from the file name: `.toml` files are TOML, everything else YAML.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Self::Toml,
            _ => Self::Yaml,
        }
    }
}

/// A scalar that may be written as a number or a string (rule ids often are).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    /// Integer literal, e.g. `207`.
    Int(i64),
    /// String literal, e.g. `"formatting"`.
    Str(String),
}

impl std::fmt::Display for Scalar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{i}"),
            Self::Str(s) => f.write_str(s),
        }
    }
}

/// A value given either as one string or as a list of strings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum StringOrList {
    /// Single string; split by the caller (commas or lines).
    One(String),
    /// Explicit list.
    Many(Vec<Scalar>),
}

/// Raw configuration file contents.
///
/// Unknown keys are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    /// Extra verbosity, added to the command line level.
    #[serde(default)]
    pub verbosity: Option<u8>,

    /// Patterns of files no rule is applied to.
    #[serde(default)]
    pub exclude_paths: Vec<String>,

    /// Rule ids or tags to skip.
    #[serde(default)]
    pub skip_list: Vec<Scalar>,

    /// Rule ids or tags to restrict the run to.
    #[serde(default)]
    pub tags: Option<StringOrList>,

    /// Load the built-in rules in addition to any rules directories.
    #[serde(default)]
    pub use_default_rules: Option<bool>,

    /// Directories containing declarative rule files.
    #[serde(default)]
    pub rulesdir: Vec<PathBuf>,

    /// Emit JSON output.
    #[serde(default)]
    pub json: Option<bool>,

    /// Include the severity in plain output.
    #[serde(default)]
    pub severity: Option<bool>,

    /// Per rule-id or tag options.
    #[serde(default)]
    pub rules: BTreeMap<Scalar, RuleFileOptions>,
}

/// Per-rule section of the configuration file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RuleFileOptions {
    /// Files this rule (or tag) does not apply to, one pattern per line.
    #[serde(default)]
    pub ignore: Option<StringOrList>,
}

impl ConfigFile {
    /// Loads a configuration file, picking the format from its name.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content, ConfigFormat::from_path(path))
    }

    /// Parses configuration content.
    ///
    /// Empty documents (including YAML files holding only comments) yield
    /// the default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid for the format or a key
    /// has the wrong type.
    pub fn parse(content: &str, format: ConfigFormat) -> Result<Self, ConfigError> {
        match format {
            ConfigFormat::Toml => toml::from_str(content).map_err(|e| ConfigError::Parse {
                message: e.to_string(),
            }),
            ConfigFormat::Yaml => {
                let value: serde_yaml::Value =
                    serde_yaml::from_str(content).map_err(|e| ConfigError::Parse {
                        message: e.to_string(),
                    })?;
                if value.is_null() {
                    return Ok(Self::default());
                }
                serde_yaml::from_value(value).map_err(|e| ConfigError::Parse {
                    message: e.to_string(),
                })
            }
        }
    }
}

/// Options supplied on the command line.
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Verbosity level (`-v` count).
    pub verbosity: u8,
    /// Exclude patterns (`--exclude`).
    pub exclude_paths: Vec<String>,
    /// Skip list entries (`-x`), possibly comma separated.
    pub skip_list: Vec<String>,
    /// Tag filter entries (`-t`), possibly comma separated.
    pub tags: Vec<String>,
    /// Use the built-in rules as well as `rulesdirs` (`-R`).
    pub use_default_rules: bool,
    /// Rules directories (`-r`).
    pub rulesdirs: Vec<PathBuf>,
    /// JSON output (`--json`).
    pub json: bool,
    /// Severity in plain output (`--severity`).
    pub severity: bool,
    /// Colored output.
    pub colored: bool,
}

/// Per-rule options resolved from the configuration file.
#[derive(Debug, Clone, Default)]
pub struct RuleOptions {
    /// Files exempt from this rule or tag.
    pub ignore: Option<PathPatternSet>,
}

/// Resolved run configuration consumed by the engine.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Verbosity level; above zero the runner traces each examined file.
    pub verbosity: u8,
    /// Files no rule is applied to.
    pub exclude_paths: PathPatternSet,
    /// Rule ids or tags to skip.
    pub skip_list: BTreeSet<String>,
    /// Rule ids or tags to restrict the run to; empty means all rules.
    pub tags: BTreeSet<String>,
    /// Use the built-in rules in addition to `rulesdirs`.
    pub use_default_rules: bool,
    /// Directories containing declarative rule files.
    pub rulesdirs: Vec<PathBuf>,
    /// Emit JSON output.
    pub json: bool,
    /// Include the severity in plain output.
    pub severity: bool,
    /// Colored output.
    pub colored: bool,
    /// Per rule-id or tag options.
    pub rules: HashMap<String, RuleOptions>,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves a configuration from command line options alone.
    ///
    /// # Errors
    ///
    /// Returns an error if an exclude pattern is invalid.
    pub fn from_options(options: Options) -> Result<Self, ConfigError> {
        Self::resolve(options, ConfigFile::default())
    }

    /// Resolves a configuration from options and a configuration file on disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if any
    /// pattern is invalid.
    pub fn from_file(path: &Path, options: Options) -> Result<Self, ConfigError> {
        let file = ConfigFile::from_file(path)?;
        Self::resolve(options, file)
    }

    /// Merges command line options with configuration file contents.
    ///
    /// # Errors
    ///
    /// Returns an error if any pattern is invalid.
    pub fn resolve(options: Options, file: ConfigFile) -> Result<Self, ConfigError> {
        let verbosity = options
            .verbosity
            .saturating_add(file.verbosity.unwrap_or(0));

        let exclude_paths = PathPatternSet::new(
            options
                .exclude_paths
                .iter()
                .chain(file.exclude_paths.iter()),
        )
        .map_err(|source| ConfigError::Pattern {
            key: "exclude_paths".to_string(),
            source,
        })?;

        let skip_list = split_entries(
            options
                .skip_list
                .into_iter()
                .chain(file.skip_list.iter().map(ToString::to_string)),
        );

        let file_tags: Vec<String> = match file.tags {
            Some(StringOrList::One(s)) => vec![s],
            Some(StringOrList::Many(items)) => items.iter().map(ToString::to_string).collect(),
            None => Vec::new(),
        };
        let tags = split_entries(options.tags.into_iter().chain(file_tags));

        let mut rulesdirs = options.rulesdirs;
        rulesdirs.extend(file.rulesdir);

        let mut rules = HashMap::new();
        for (key, rule) in file.rules {
            let key = key.to_string();
            let ignore = match rule.ignore {
                Some(StringOrList::One(block)) => Some(PathPatternSet::from_multiline(&block)),
                Some(StringOrList::Many(items)) => {
                    Some(PathPatternSet::new(items.iter().map(ToString::to_string)))
                }
                None => None,
            }
            .transpose()
            .map_err(|source| ConfigError::Pattern {
                key: format!("rules.{key}.ignore"),
                source,
            })?;
            rules.insert(key, RuleOptions { ignore });
        }

        Ok(Self {
            verbosity,
            exclude_paths,
            skip_list,
            tags,
            use_default_rules: options.use_default_rules || file.use_default_rules.unwrap_or(false),
            rulesdirs,
            json: options.json || file.json.unwrap_or(false),
            severity: options.severity || file.severity.unwrap_or(false),
            colored: options.colored,
            rules,
        })
    }

    /// Checks whether `path` is exempt from the rule or tag named `key`.
    #[must_use]
    pub fn is_file_ignored(&self, path: &Path, key: &str) -> bool {
        self.rules
            .get(key)
            .and_then(|r| r.ignore.as_ref())
            .is_some_and(|patterns| patterns.matches(path))
    }

    /// Checks whether `path` is excluded from every rule.
    #[must_use]
    pub fn is_excluded(&self, path: &Path) -> bool {
        self.exclude_paths.matches(path)
    }

    /// Returns true when the built-in rules should be loaded.
    ///
    /// They are used when no rules directory is configured, or when
    /// explicitly requested alongside rules directories.
    #[must_use]
    pub fn uses_builtin_rules(&self) -> bool {
        self.use_default_rules || self.rulesdirs.is_empty()
    }
}

/// Splits comma separated entries, trimming whitespace and dropping empties.
fn split_entries(entries: impl IntoIterator<Item = String>) -> BTreeSet<String> {
    entries
        .into_iter()
        .flat_map(|entry| {
            entry
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect::<Vec<_>>()
        })
        .collect()
}
