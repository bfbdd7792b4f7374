//! Inline skip directives.
//!
//! A line can opt out of specific rules with a trailing comment:
//! ```text
//! nginx: # noqa: 204 206
//! ```

/// Marker that introduces the list of skipped rule ids.
pub const NOQA_MARKER: &str = "# noqa:";

/// Parsed `# noqa:` directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkipDirective<'a> {
    /// Rule ids listed after the marker.
    pub rules: Vec<&'a str>,
}

impl<'a> SkipDirective<'a> {
    /// Parses the directive from a line, if one is present.
    ///
    /// The ids are the whitespace-separated words between the first marker
    /// and the next one (or the end of the line).
    #[must_use]
    pub fn parse(line: &'a str) -> Option<Self> {
        let start = line.find(NOQA_MARKER)? + NOQA_MARKER.len();
        let rest = &line[start..];
        let rest = rest.find(NOQA_MARKER).map_or(rest, |end| &rest[..end]);

        Some(Self {
            rules: rest.split_whitespace().collect(),
        })
    }

    /// Returns true if the directive lists `rule_id`.
    #[must_use]
    pub fn skips(&self, rule_id: &str) -> bool {
        self.rules.iter().any(|r| *r == rule_id)
    }
}

/// Returns the rule ids a line asks to skip; empty without a directive.
#[must_use]
pub fn rule_skips_from_line(line: &str) -> Vec<&str> {
    SkipDirective::parse(line).map(|d| d.rules).unwrap_or_default()
}
