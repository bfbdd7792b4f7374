//! Jinja helpers for rules that inspect rendered-looking text.

use regex::Regex;
use std::borrow::Cow;
use std::sync::OnceLock;

/// Placeholder substituted for every `{{ ... }}` expression.
pub const JINJA_PLACEHOLDER: &str = "JINJA_VAR";

fn expression_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        #[allow(clippy::expect_used)] // Literal pattern, covered by tests
        Regex::new(r"\{\{[^}]*\}\}").expect("valid jinja expression regex")
    })
}

/// Replaces Jinja `{{ ... }}` expressions with [`JINJA_PLACEHOLDER`].
///
/// Lets line predicates ignore whitespace or punctuation that only appears
/// inside template expressions.
#[must_use]
pub fn unjinja(text: &str) -> Cow<'_, str> {
    expression_regex().replace_all(text, JINJA_PLACEHOLDER)
}
