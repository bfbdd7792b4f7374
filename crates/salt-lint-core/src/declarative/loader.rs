//! DTO → rule conversion with validation.

use super::config_dto::{RegexRuleDto, RuleFileDto};
use super::rules::{RegexRule, RuleScope};
use crate::types::Severity;
use regex::Regex;
use std::collections::HashSet;

/// Errors during DTO → rule conversion.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// A field-level validation error.
    #[error("{context}: {message}")]
    Validation {
        /// Where the error occurred (e.g., "rule[0].id").
        context: String,
        /// What is wrong with the value.
        message: String,
    },

    /// Unknown severity string.
    #[error(
        "{context}: unknown severity `{value}`, expected: INFO, VERY_LOW, LOW, MEDIUM, HIGH, VERY_HIGH"
    )]
    UnknownSeverity {
        /// Where the error occurred.
        context: String,
        /// The invalid value.
        value: String,
    },

    /// The pattern is not a valid regular expression.
    #[error("{context}: invalid pattern: {source}")]
    InvalidPattern {
        /// Where the error occurred.
        context: String,
        /// The regex compile error.
        source: regex::Error,
    },

    /// Two rules in the same file share an id.
    #[error("duplicate rule id `{id}`")]
    DuplicateId {
        /// The repeated id.
        id: String,
    },
}

/// Converts a parsed rule file into validated rules.
///
/// # Errors
///
/// Returns the first error encountered during conversion.
pub fn load(dto: RuleFileDto) -> Result<Vec<RegexRule>, LoadError> {
    let mut seen = HashSet::new();
    dto.rules
        .into_iter()
        .enumerate()
        .map(|(i, rule)| {
            let rule = convert_rule(rule, i)?;
            if !seen.insert(rule.id.clone()) {
                return Err(LoadError::DuplicateId { id: rule.id });
            }
            Ok(rule)
        })
        .collect()
}

fn convert_rule(dto: RegexRuleDto, index: usize) -> Result<RegexRule, LoadError> {
    let ctx = format!("rule[{index}]");

    if dto.id.is_empty() || !dto.id.chars().all(|c| c.is_ascii_digit()) {
        return Err(LoadError::Validation {
            context: format!("{ctx}.id"),
            message: format!("rule id must be digits, got `{}`", dto.id),
        });
    }
    let ctx = format!("rule {}", dto.id);

    if dto.shortdesc.trim().is_empty() {
        return Err(LoadError::Validation {
            context: format!("{ctx}.shortdesc"),
            message: "must not be empty".to_string(),
        });
    }

    let severity: Severity = dto.severity.parse().map_err(|_| LoadError::UnknownSeverity {
        context: format!("{ctx}.severity"),
        value: dto.severity.clone(),
    })?;

    let scope = match dto.scope.as_str() {
        "line" => RuleScope::Line,
        "text" => RuleScope::Text,
        other => {
            return Err(LoadError::Validation {
                context: format!("{ctx}.scope"),
                message: format!("unknown scope `{other}`, expected: line, text"),
            })
        }
    };

    if dto.unjinja && scope == RuleScope::Text {
        return Err(LoadError::Validation {
            context: format!("{ctx}.unjinja"),
            message: "only supported for line scope".to_string(),
        });
    }

    let regex = Regex::new(&dto.pattern).map_err(|source| LoadError::InvalidPattern {
        context: format!("{ctx}.pattern"),
        source,
    })?;

    Ok(RegexRule {
        id: dto.id,
        shortdesc: dto.shortdesc,
        description: dto.description,
        severity,
        tags: dto.tags,
        version_added: dto.version_added,
        regex,
        scope,
        message: dto.message,
        unjinja: dto.unjinja,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto(id: &str, pattern: &str) -> RegexRuleDto {
        RegexRuleDto {
            id: id.to_string(),
            shortdesc: "Something".to_string(),
            description: String::new(),
            severity: "MEDIUM".to_string(),
            tags: Vec::new(),
            version_added: None,
            pattern: pattern.to_string(),
            scope: "line".to_string(),
            message: None,
            unjinja: false,
        }
    }

    fn file(rules: Vec<RegexRuleDto>) -> RuleFileDto {
        RuleFileDto { rules }
    }

    #[test]
    fn valid_rule_converts() {
        let mut rule = dto("901", "foo");
        rule.severity = "very_high".to_string();
        let rules = load(file(vec![rule])).unwrap();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].severity, Severity::VeryHigh);
        assert_eq!(rules[0].scope(), RuleScope::Line);
    }

    #[test]
    fn non_digit_id_is_rejected() {
        let err = load(file(vec![dto("E901", "foo")])).unwrap_err();
        assert!(err.to_string().contains("rule[0].id"));
    }

    #[test]
    fn empty_shortdesc_is_rejected() {
        let mut rule = dto("901", "foo");
        rule.shortdesc = "  ".to_string();
        assert!(matches!(
            load(file(vec![rule])),
            Err(LoadError::Validation { .. })
        ));
    }

    #[test]
    fn bad_regex_is_rejected() {
        let err = load(file(vec![dto("901", "(unclosed")])).unwrap_err();
        assert!(matches!(err, LoadError::InvalidPattern { .. }));
        assert!(err.to_string().starts_with("rule 901.pattern"));
    }

    #[test]
    fn unknown_severity_and_scope_are_rejected() {
        let mut rule = dto("901", "foo");
        rule.severity = "CRITICAL".to_string();
        assert!(matches!(
            load(file(vec![rule])),
            Err(LoadError::UnknownSeverity { .. })
        ));

        let mut rule = dto("901", "foo");
        rule.scope = "block".to_string();
        assert!(load(file(vec![rule])).is_err());
    }

    #[test]
    fn unjinja_requires_line_scope() {
        let mut rule = dto("901", "foo");
        rule.scope = "text".to_string();
        rule.unjinja = true;
        assert!(load(file(vec![rule])).is_err());
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = load(file(vec![dto("901", "a"), dto("901", "b")])).unwrap_err();
        assert_eq!(err.to_string(), "duplicate rule id `901`");
    }
}
