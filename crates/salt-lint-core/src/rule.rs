//! Rule trait for defining lint rules.

use crate::types::{LineMatch, Match, Severity, StateFile, TextMatch};
use crate::utils::skips::rule_skips_from_line;
use std::collections::BTreeSet;
use std::sync::Arc;

/// A lint rule applied to the raw text of a state file.
///
/// A rule has two optional capabilities, both defaulting to "never fires":
///
/// - [`Rule::match_line`] is called once per physical line. Comment lines and
///   lines carrying a `# noqa: <id>` directive for this rule are skipped by
///   the engine before the predicate runs.
/// - [`Rule::match_text`] is called once per file with the whole text. No
///   suppression is applied to its results.
///
/// # Example
///
/// ```ignore
/// use salt_lint_core::{LineMatch, Rule, StateFile};
///
/// pub struct NoTabs;
///
/// impl Rule for NoTabs {
///     fn id(&self) -> &str { "203" }
///     fn shortdesc(&self) -> &str { "Most files should not contain tabs" }
///     fn tags(&self) -> Vec<&str> { vec!["formatting"] }
///
///     fn match_line(&self, _file: &StateFile, line: &str) -> LineMatch {
///         LineMatch::from_bool(line.contains('\t'))
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the rule id, a short string of digits (e.g. "204").
    fn id(&self) -> &str;

    /// Returns a one-line summary, used as the default match message.
    fn shortdesc(&self) -> &str;

    /// Returns a longer explanation of what this rule checks.
    fn description(&self) -> &str {
        ""
    }

    /// Returns the severity category of this rule.
    fn severity(&self) -> Severity {
        Severity::Medium
    }

    /// Returns the tags this rule belongs to.
    fn tags(&self) -> Vec<&str> {
        Vec::new()
    }

    /// Returns the release the rule first appeared in, if known.
    fn version_added(&self) -> Option<&str> {
        None
    }

    /// Checks a single line.
    fn match_line(&self, _file: &StateFile, _line: &str) -> LineMatch {
        LineMatch::NoMatch
    }

    /// Checks the complete file text.
    fn match_text(&self, _file: &StateFile, _text: &str) -> Vec<TextMatch> {
        Vec::new()
    }

    /// Returns the rule's tags together with its own id.
    ///
    /// Tag filters, skip lists and per-rule ignores all operate on this set.
    fn definition(&self) -> BTreeSet<&str> {
        let mut definition: BTreeSet<&str> = self.tags().into_iter().collect();
        definition.insert(self.id());
        definition
    }

    /// Formats the rule for a verbose listing.
    fn verbose(&self) -> String {
        format!("{}: {}\n {}", self.id(), self.shortdesc(), self.description())
    }
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;

/// Shared handle to a registered rule, held by every [`Match`] it produces.
pub type RuleRef = Arc<dyn Rule>;

/// Applies the line capability of `rule` to every line of `text`.
///
/// Lines are split on `\n` and numbered from 1; a trailing `\r` stays part
/// of the line.
#[must_use]
pub fn match_lines(rule: &RuleRef, file: &StateFile, text: &str) -> Vec<Match> {
    let mut matches = Vec::new();

    for (index, line) in text.split('\n').enumerate() {
        if line.trim_start().starts_with('#') {
            continue;
        }

        if rule_skips_from_line(line).contains(&rule.id()) {
            continue;
        }

        let message = match rule.match_line(file, line) {
            LineMatch::NoMatch => continue,
            LineMatch::Matched => None,
            LineMatch::MatchedWithMessage(message) => Some(message),
        };

        matches.push(Match::new(
            index + 1,
            line,
            file.path.clone(),
            Arc::clone(rule),
            message,
        ));
    }

    matches
}

/// Applies the whole-text capability of `rule` to `text`.
#[must_use]
pub fn match_full_text(rule: &RuleRef, file: &StateFile, text: &str) -> Vec<Match> {
    rule.match_text(file, text)
        .into_iter()
        .map(|m| {
            Match::new(
                m.line_number,
                m.snippet,
                file.path.clone(),
                Arc::clone(rule),
                m.message,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FileKind;

    struct Inert;

    impl Rule for Inert {
        fn id(&self) -> &str {
            "100"
        }
        fn shortdesc(&self) -> &str {
            "Never fires"
        }
    }

    struct ContainsFoo;

    impl Rule for ContainsFoo {
        fn id(&self) -> &str {
            "101"
        }
        fn shortdesc(&self) -> &str {
            "Line contains foo"
        }
        fn tags(&self) -> Vec<&str> {
            vec!["formatting", "test"]
        }
        fn match_line(&self, _file: &StateFile, line: &str) -> LineMatch {
            if line.contains("foo!") {
                LineMatch::MatchedWithMessage("shouting foo".to_string())
            } else {
                LineMatch::from_bool(line.contains("foo"))
            }
        }
    }

    struct WholeText;

    impl Rule for WholeText {
        fn id(&self) -> &str {
            "102"
        }
        fn shortdesc(&self) -> &str {
            "Whole text"
        }
        fn match_text(&self, _file: &StateFile, text: &str) -> Vec<TextMatch> {
            text.split('\n')
                .enumerate()
                .filter(|(_, l)| l.contains("bar"))
                .map(|(i, l)| TextMatch::new(i + 1, l))
                .collect()
        }
    }

    fn state() -> StateFile {
        StateFile::new("init.sls", FileKind::State)
    }

    fn rule<R: Rule + 'static>(r: R) -> RuleRef {
        Arc::new(r)
    }

    #[test]
    fn inert_rule_never_matches() {
        let r = rule(Inert);
        for text in ["", "foo", "a\nb\n\tc  \n# comment"] {
            assert!(match_lines(&r, &state(), text).is_empty());
            assert!(match_full_text(&r, &state(), text).is_empty());
        }
    }

    #[test]
    fn line_matches_are_one_based() {
        let r = rule(ContainsFoo);
        let matches = match_lines(&r, &state(), "ok\nfoo\nok\nfoo!");
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].line_number(), 2);
        assert_eq!(matches[0].message(), "Line contains foo");
        assert_eq!(matches[1].line_number(), 4);
        assert_eq!(matches[1].message(), "shouting foo");
        assert_eq!(matches[1].filename(), std::path::Path::new("init.sls"));
    }

    #[test]
    fn comment_lines_never_match() {
        let r = rule(ContainsFoo);
        let text = "# foo\n   # foo indented\n\t#foo";
        assert!(match_lines(&r, &state(), text).is_empty());
    }

    #[test]
    fn noqa_directive_suppresses_only_named_rule() {
        let r = rule(ContainsFoo);
        let text = "foo: bar # noqa: 101\nfoo: baz # noqa: 204 206\nfoo # noqa: 1011";
        let matches = match_lines(&r, &state(), text);
        let lines: Vec<usize> = matches.iter().map(Match::line_number).collect();
        assert_eq!(lines, vec![2, 3]);
    }

    #[test]
    fn empty_text_produces_no_matches() {
        let r = rule(ContainsFoo);
        assert!(match_lines(&r, &state(), "").is_empty());
    }

    #[test]
    fn full_text_matches_are_not_suppressed() {
        let r = rule(WholeText);
        let text = "# bar\nbar # noqa: 102\nbaz";
        let matches = match_full_text(&r, &state(), text);
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].line_number(), 1);
        assert_eq!(matches[1].message(), "Whole text");
    }

    #[test]
    fn definition_includes_id_and_tags() {
        let r = ContainsFoo;
        let definition: Vec<&str> = r.definition().into_iter().collect();
        assert_eq!(definition, vec!["101", "formatting", "test"]);
    }

    #[test]
    fn verbose_includes_description_line() {
        assert_eq!(Inert.verbose(), "100: Never fires\n ");
    }
}
