//! Core types for state files, matches and results.

use crate::rule::RuleRef;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Severity category of a rule.
///
/// Informational only: the engine never filters on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    /// Purely informational.
    Info,
    /// Cosmetic issue.
    VeryLow,
    /// Minor issue.
    Low,
    /// Default category.
    Medium,
    /// Likely bug or bad practice.
    High,
    /// Almost certainly broken.
    VeryHigh,
}

impl Severity {
    /// Returns the canonical upper-case name (e.g. `VERY_LOW`).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::VeryLow => "VERY_LOW",
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::VeryHigh => "VERY_HIGH",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown severity name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown severity `{0}`, expected one of: INFO, VERY_LOW, LOW, MEDIUM, HIGH, VERY_HIGH")]
pub struct UnknownSeverity(pub String);

impl FromStr for Severity {
    type Err = UnknownSeverity;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().replace('-', "_").as_str() {
            "INFO" => Ok(Self::Info),
            "VERY_LOW" => Ok(Self::VeryLow),
            "LOW" => Ok(Self::Low),
            "MEDIUM" => Ok(Self::Medium),
            "HIGH" => Ok(Self::High),
            "VERY_HIGH" => Ok(Self::VeryHigh),
            _ => Err(UnknownSeverity(s.to_string())),
        }
    }
}

/// Result of a rule's line predicate.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LineMatch {
    /// The line is fine.
    #[default]
    NoMatch,
    /// The line violates the rule; report the rule's short description.
    Matched,
    /// The line violates the rule; report this message instead.
    MatchedWithMessage(String),
}

impl LineMatch {
    /// Converts a plain boolean predicate into a `LineMatch`.
    #[must_use]
    pub fn from_bool(matched: bool) -> Self {
        if matched {
            Self::Matched
        } else {
            Self::NoMatch
        }
    }

    /// Returns true unless this is [`LineMatch::NoMatch`].
    #[must_use]
    pub fn is_match(&self) -> bool {
        !matches!(self, Self::NoMatch)
    }
}

impl From<bool> for LineMatch {
    fn from(matched: bool) -> Self {
        Self::from_bool(matched)
    }
}

/// A single finding produced by a rule's whole-text capability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextMatch {
    /// Line number (1-indexed).
    pub line_number: usize,
    /// The offending text fragment.
    pub snippet: String,
    /// Custom message; `None` falls back to the rule's short description.
    pub message: Option<String>,
}

impl TextMatch {
    /// Creates a text match without a custom message.
    #[must_use]
    pub fn new(line_number: usize, snippet: impl Into<String>) -> Self {
        Self {
            line_number,
            snippet: snippet.into(),
            message: None,
        }
    }

    /// Sets a custom message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// How a state file was resolved from the user's input path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    /// The input path named the file directly.
    State,
    /// The input path named a directory; this is its `init.sls`.
    Init,
}

impl std::fmt::Display for FileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::State => f.write_str("state"),
            Self::Init => f.write_str("init"),
        }
    }
}

/// A file the rules are applied to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StateFile {
    /// Path as given by the user (or joined with `init.sls`).
    pub path: PathBuf,
    /// How the path was resolved.
    pub kind: FileKind,
}

impl StateFile {
    /// Creates a new state file entry.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, kind: FileKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }

    /// Returns the file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// A rule firing at a location.
///
/// Immutable once constructed; fields are read through accessors.
#[derive(Clone)]
pub struct Match {
    line_number: usize,
    line: String,
    filename: PathBuf,
    rule: RuleRef,
    message: String,
}

impl Match {
    /// Creates a match. A missing `message` falls back to the rule's short description.
    #[must_use]
    pub fn new(
        line_number: usize,
        line: impl Into<String>,
        filename: impl Into<PathBuf>,
        rule: RuleRef,
        message: Option<String>,
    ) -> Self {
        let message = message.unwrap_or_else(|| rule.shortdesc().to_string());
        Self {
            line_number,
            line: line.into(),
            filename: filename.into(),
            rule,
            message,
        }
    }

    /// Line number (1-indexed).
    #[must_use]
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// The offending text fragment.
    #[must_use]
    pub fn line(&self) -> &str {
        &self.line
    }

    /// Path of the file in which the match occurred.
    #[must_use]
    pub fn filename(&self) -> &Path {
        &self.filename
    }

    /// The rule that fired.
    #[must_use]
    pub fn rule(&self) -> &RuleRef {
        &self.rule
    }

    /// Id of the rule that fired.
    #[must_use]
    pub fn rule_id(&self) -> &str {
        self.rule.id()
    }

    /// Diagnostic message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Orders matches by filename, then line number, then rule id.
    ///
    /// Filenames compare byte-wise so the order does not depend on locale.
    #[must_use]
    pub fn cmp_key(&self, other: &Self) -> Ordering {
        self.filename
            .as_os_str()
            .cmp(other.filename.as_os_str())
            .then(self.line_number.cmp(&other.line_number))
            .then_with(|| self.rule.id().cmp(other.rule.id()))
    }
}

impl std::fmt::Debug for Match {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Match")
            .field("line_number", &self.line_number)
            .field("line", &self.line)
            .field("filename", &self.filename)
            .field("rule", &self.rule.id())
            .field("message", &self.message)
            .finish()
    }
}

impl std::fmt::Display for Match {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}] ({}) matched {}:{} {}",
            self.rule.id(),
            self.message,
            self.filename.display(),
            self.line_number,
            self.line
        )
    }
}

/// Sorts matches by filename, line number and rule id.
///
/// The sort is stable, so matches with equal keys keep their relative order.
pub fn sort_matches(matches: &mut [Match]) {
    matches.sort_by(Match::cmp_key);
}

/// Matches collected across one or more runner invocations.
#[derive(Debug, Default, Clone)]
pub struct LintResult {
    /// All matches found.
    pub matches: Vec<Match>,
}

impl LintResult {
    /// Creates a new empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds matches from a runner invocation.
    pub fn extend(&mut self, matches: impl IntoIterator<Item = Match>) {
        self.matches.extend(matches);
    }

    /// Sorts the collected matches for display.
    pub fn sort(&mut self) {
        sort_matches(&mut self.matches);
    }

    /// Returns true when no rule fired.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Number of matches.
    #[must_use]
    pub fn len(&self) -> usize {
        self.matches.len()
    }
}
