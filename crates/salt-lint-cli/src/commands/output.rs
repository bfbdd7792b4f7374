//! Shared output formatting for lint results.

use anyhow::Result;
use salt_lint_core::{Config, LintResult, Match, Severity};
use serde::Serialize;

const RED: &str = "\x1b[0;31m";
const LIGHT_RED: &str = "\x1b[1;31m";
const YELLOW: &str = "\x1b[0;33m";
const BLUE: &str = "\x1b[0;34m";
const MAGENTA: &str = "\x1b[0;35m";
const CYAN: &str = "\x1b[0;36m";
const ENDC: &str = "\x1b[0m";

/// Output format for lint results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// `[id] message`, location, offending line.
    #[default]
    Plain,
    /// Like `Plain` with the rule severity after the id.
    Severity,
    /// JSON array of matches.
    Json,
}

impl OutputFormat {
    /// Picks the format requested by the configuration; JSON wins over severity.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        if config.json {
            Self::Json
        } else if config.severity {
            Self::Severity
        } else {
            Self::Plain
        }
    }
}

/// JSON representation of a match.
#[derive(Debug, Serialize)]
struct JsonMatch<'a> {
    id: &'a str,
    message: &'a str,
    filename: String,
    linenumber: usize,
    line: &'a str,
    severity: Severity,
}

impl<'a> From<&'a Match> for JsonMatch<'a> {
    fn from(m: &'a Match) -> Self {
        Self {
            id: m.rule_id(),
            message: m.message(),
            filename: m.filename().display().to_string(),
            linenumber: m.line_number(),
            line: m.line(),
            severity: m.rule().severity(),
        }
    }
}

/// Renders lint results in the specified format.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn render(result: &LintResult, format: OutputFormat, colored: bool) -> Result<String> {
    match format {
        OutputFormat::Json => render_json(result),
        OutputFormat::Plain | OutputFormat::Severity => Ok(result
            .matches
            .iter()
            .map(|m| format_match(m, format == OutputFormat::Severity, colored))
            .collect()),
    }
}

/// Prints lint results in the specified format.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn print(result: &LintResult, format: OutputFormat, colored: bool) -> Result<()> {
    print!("{}", render(result, format, colored)?);
    Ok(())
}

fn paint(text: &str, color: &str, colored: bool) -> String {
    if colored {
        format!("{color}{text}{ENDC}")
    } else {
        text.to_string()
    }
}

fn format_match(m: &Match, with_severity: bool, colored: bool) -> String {
    let severity = if with_severity {
        paint(&format!("[{}]", m.rule().severity()), YELLOW, colored)
    } else {
        String::new()
    };

    format!(
        "{}{severity} {}\n{}:{}\n{}\n\n",
        paint(&format!("[{}]", m.rule_id()), RED, colored),
        paint(m.message(), LIGHT_RED, colored),
        paint(&m.filename().display().to_string(), BLUE, colored),
        paint(&m.line_number().to_string(), CYAN, colored),
        paint(m.line(), MAGENTA, colored),
    )
}

fn render_json(result: &LintResult) -> Result<String> {
    let items: Vec<JsonMatch<'_>> = result.matches.iter().map(JsonMatch::from).collect();
    let mut json = serde_json::to_string_pretty(&items)?;
    json.push('\n');
    Ok(json)
}
