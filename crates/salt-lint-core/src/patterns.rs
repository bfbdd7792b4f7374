//! Path pattern sets with gitignore semantics.
//!
//! Used for `exclude_paths` (files skipped by every rule) and for the
//! per-rule `ignore` lists (files skipped by a single rule or tag).
//!
//! Patterns follow `.gitignore` rules:
//!
//! - `*` matches within one path segment, `**` across segments
//! - a trailing `/` only matches directories (and so everything below them)
//! - a pattern containing a `/` is anchored to the working directory
//! - `!pattern` re-includes a path excluded by an earlier pattern
//! - blank lines and `#` comments are ignored

use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::path::{Component, Path, PathBuf};
use tracing::trace;

/// Error compiling a path pattern.
#[derive(Debug, thiserror::Error)]
#[error("invalid path pattern `{pattern}`: {source}")]
pub struct PatternError {
    /// The offending pattern line.
    pub pattern: String,
    /// Underlying glob error.
    #[source]
    pub source: ignore::Error,
}

/// A compiled set of gitignore-style path patterns.
///
/// Patterns are compiled once at construction; malformed patterns are
/// rejected there, never at match time.
#[derive(Debug, Clone)]
pub struct PathPatternSet {
    patterns: Vec<String>,
    matcher: Gitignore,
    base: Option<PathBuf>,
}

impl Default for PathPatternSet {
    fn default() -> Self {
        Self::empty()
    }
}

impl PathPatternSet {
    /// Creates a set that matches nothing.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            patterns: Vec::new(),
            matcher: Gitignore::empty(),
            base: None,
        }
    }

    /// Compiles a list of pattern lines.
    ///
    /// Relative paths are matched as given; absolute paths are made relative
    /// to the current working directory first.
    ///
    /// # Errors
    ///
    /// Returns an error for the first pattern that is not a valid glob.
    pub fn new<I, S>(patterns: I) -> Result<Self, PatternError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let base = std::env::current_dir().ok();
        Self::with_base(patterns, base)
    }

    /// Compiles pattern lines, resolving absolute paths against `base`.
    ///
    /// # Errors
    ///
    /// Returns an error for the first pattern that is not a valid glob.
    pub fn with_base<I, S>(patterns: I, base: Option<PathBuf>) -> Result<Self, PatternError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = GitignoreBuilder::new(".");
        let mut kept = Vec::new();

        for pattern in patterns {
            let pattern = pattern.as_ref();
            let trimmed = pattern.trim_end();
            if trimmed.trim_start().is_empty() || trimmed.starts_with('#') {
                continue;
            }
            builder
                .add_line(None, trimmed)
                .map_err(|source| PatternError {
                    pattern: pattern.to_string(),
                    source,
                })?;
            kept.push(trimmed.to_string());
        }

        let matcher = builder.build().map_err(|source| PatternError {
            pattern: kept.join("\n"),
            source,
        })?;

        Ok(Self {
            patterns: kept,
            matcher,
            base,
        })
    }

    /// Compiles a multi-line block, one pattern per line.
    ///
    /// # Errors
    ///
    /// Returns an error for the first pattern that is not a valid glob.
    pub fn from_multiline(block: &str) -> Result<Self, PatternError> {
        Self::new(block.lines())
    }

    /// Returns the compiled pattern lines.
    #[must_use]
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Number of patterns in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Returns true when the set has no patterns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Checks whether `path`, or any directory containing it, matches.
    #[must_use]
    pub fn matches(&self, path: impl AsRef<Path>) -> bool {
        if self.is_empty() {
            return false;
        }

        let relative = self.relative_for_matching(path.as_ref());
        if relative.as_os_str().is_empty() {
            return false;
        }

        let matched = self
            .matcher
            .matched_path_or_any_parents(&relative, false)
            .is_ignore();
        trace!("pattern match {} -> {}", relative.display(), matched);
        matched
    }

    /// Produces a root-less path the gitignore matcher accepts.
    fn relative_for_matching(&self, path: &Path) -> PathBuf {
        let path = match &self.base {
            Some(base) if path.is_absolute() => path.strip_prefix(base).unwrap_or(path),
            _ => path,
        };

        path.components()
            .filter(|c| matches!(c, Component::Normal(_) | Component::ParentDir))
            .collect()
    }
}
