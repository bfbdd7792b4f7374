//! Pattern-based rule implementation.

use crate::rule::Rule;
use crate::types::{LineMatch, Severity, StateFile, TextMatch};
use crate::utils::jinja::unjinja;
use regex::Regex;
use std::borrow::Cow;

/// Where a [`RegexRule`] looks for its pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleScope {
    /// Each line separately; comment and `# noqa` lines are skipped.
    Line,
    /// The whole file text at once; patterns may span lines.
    Text,
}

/// A rule defined by a regular expression in a rule file.
#[derive(Debug, Clone)]
pub struct RegexRule {
    pub(crate) id: String,
    pub(crate) shortdesc: String,
    pub(crate) description: String,
    pub(crate) severity: Severity,
    pub(crate) tags: Vec<String>,
    pub(crate) version_added: Option<String>,
    pub(crate) regex: Regex,
    pub(crate) scope: RuleScope,
    pub(crate) message: Option<String>,
    pub(crate) unjinja: bool,
}

impl RegexRule {
    /// The compiled pattern.
    #[must_use]
    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Where the pattern is applied.
    #[must_use]
    pub fn scope(&self) -> RuleScope {
        self.scope
    }
}

impl Rule for RegexRule {
    fn id(&self) -> &str {
        &self.id
    }

    fn shortdesc(&self) -> &str {
        &self.shortdesc
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn severity(&self) -> Severity {
        self.severity
    }

    fn tags(&self) -> Vec<&str> {
        self.tags.iter().map(String::as_str).collect()
    }

    fn version_added(&self) -> Option<&str> {
        self.version_added.as_deref()
    }

    fn match_line(&self, _file: &StateFile, line: &str) -> LineMatch {
        if self.scope != RuleScope::Line {
            return LineMatch::NoMatch;
        }

        let line: Cow<'_, str> = if self.unjinja {
            unjinja(line)
        } else {
            Cow::Borrowed(line)
        };

        if !self.regex.is_match(&line) {
            return LineMatch::NoMatch;
        }
        match &self.message {
            Some(message) => LineMatch::MatchedWithMessage(message.clone()),
            None => LineMatch::Matched,
        }
    }

    fn match_text(&self, _file: &StateFile, text: &str) -> Vec<TextMatch> {
        if self.scope != RuleScope::Text {
            return Vec::new();
        }

        self.regex
            .find_iter(text)
            .map(|m| {
                let before = &text[..m.start()];
                let line_number = before.matches('\n').count() + 1;
                let line_start = before.rfind('\n').map_or(0, |i| i + 1);
                let line_end = text[m.start()..]
                    .find('\n')
                    .map_or(text.len(), |i| m.start() + i);

                let found = TextMatch::new(line_number, &text[line_start..line_end]);
                match &self.message {
                    Some(message) => found.with_message(message.clone()),
                    None => found,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FileKind;

    fn rule(pattern: &str, scope: RuleScope) -> RegexRule {
        RegexRule {
            id: "901".to_string(),
            shortdesc: "Found pattern".to_string(),
            description: String::new(),
            severity: Severity::Medium,
            tags: vec!["custom".to_string()],
            version_added: None,
            regex: Regex::new(pattern).unwrap(),
            scope,
            message: None,
            unjinja: false,
        }
    }

    fn state() -> StateFile {
        StateFile::new("init.sls", FileKind::State)
    }

    #[test]
    fn line_scope_matches_lines_only() {
        let r = rule(r"\bcmd\.run\b", RuleScope::Line);
        assert_eq!(r.match_line(&state(), "  cmd.run:"), LineMatch::Matched);
        assert_eq!(r.match_line(&state(), "  cmd.script:"), LineMatch::NoMatch);
        assert!(r.match_text(&state(), "cmd.run").is_empty());
    }

    #[test]
    fn custom_message_is_reported() {
        let mut r = rule("latest", RuleScope::Line);
        r.message = Some("Pin the version".to_string());
        assert_eq!(
            r.match_line(&state(), "version: latest"),
            LineMatch::MatchedWithMessage("Pin the version".to_string())
        );
    }

    #[test]
    fn unjinja_hides_template_expressions() {
        let mut r = rule(r"\s:", RuleScope::Line);
        assert!(r.match_line(&state(), "{{ a :b }}").is_match());
        r.unjinja = true;
        assert!(!r.match_line(&state(), "{{ a :b }}").is_match());
    }

    #[test]
    fn text_scope_reports_line_of_match_start() {
        let r = rule(r"(?m)^\s*-\s*require:\s*\n\s*-\s*pkg:", RuleScope::Text);
        let text = "nginx:\n  service.running:\n    - require:\n      - pkg: nginx\n";
        let matches = r.match_text(&state(), text);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].line_number, 3);
        assert_eq!(matches[0].snippet, "    - require:");
        assert_eq!(r.match_line(&state(), "    - require:"), LineMatch::NoMatch);
    }

    #[test]
    fn text_scope_reports_every_match() {
        let r = rule("TODO", RuleScope::Text);
        let matches = r.match_text(&state(), "a TODO\nb\nTODO TODO");
        let lines: Vec<usize> = matches.iter().map(|m| m.line_number).collect();
        assert_eq!(lines, vec![1, 3, 3]);
    }
}
