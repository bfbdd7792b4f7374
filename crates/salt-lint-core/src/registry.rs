//! Ordered collection of rules and the per-file filter algebra.

use crate::config::Config;
use crate::declarative::{self, LoadRulesError};
use crate::rule::{match_full_text, match_lines, RuleBox, RuleRef};
use crate::types::{Match, StateFile};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

/// Rules in registration order, plus the configuration they run under.
///
/// Rules come from an explicit registration step: built-in presets and
/// declarative rule directories are both added through [`RuleRegistry::register`]
/// or [`RuleRegistry::extend`].
pub struct RuleRegistry {
    rules: Vec<RuleRef>,
    config: Arc<Config>,
}

impl RuleRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new(config: Arc<Config>) -> Self {
        Self {
            rules: Vec::new(),
            config,
        }
    }

    /// Creates a registry holding the declarative rules found in `dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be read or a rule file is invalid.
    pub fn from_directory(dir: &Path, config: Arc<Config>) -> Result<Self, LoadRulesError> {
        let mut registry = Self::new(config);
        registry.load_directory(dir)?;
        Ok(registry)
    }

    /// Registers the declarative rules found in `dir`, returning how many were added.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be read or a rule file is invalid.
    pub fn load_directory(&mut self, dir: &Path) -> Result<usize, LoadRulesError> {
        let rules = declarative::load_rules_from_dir(dir)?;
        debug!("Loaded {} rules from {}", rules.len(), dir.display());
        Ok(self.extend(rules))
    }

    /// Adds a rule after all previously registered ones.
    ///
    /// A rule whose id is already registered is dropped with a warning;
    /// returns whether the rule was added.
    pub fn register(&mut self, rule: RuleBox) -> bool {
        if self.rules.iter().any(|r| r.id() == rule.id()) {
            warn!("Rule {} is already registered, skipping duplicate", rule.id());
            return false;
        }
        self.rules.push(Arc::from(rule));
        true
    }

    /// Registers several rules in order, returning how many were added.
    pub fn extend(&mut self, rules: impl IntoIterator<Item = RuleBox>) -> usize {
        rules
            .into_iter()
            .fold(0, |added, rule| added + usize::from(self.register(rule)))
    }

    /// The configuration the rules run under.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Number of registered rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if no rule is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Iterates over the rules in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &RuleRef> {
        self.rules.iter()
    }

    /// Returns the rules sorted by id.
    #[must_use]
    pub fn sorted_rules(&self) -> Vec<&RuleRef> {
        let mut rules: Vec<&RuleRef> = self.rules.iter().collect();
        rules.sort_by(|a, b| a.id().cmp(b.id()));
        rules
    }

    /// Maps every tag to the ids of the rules carrying it.
    ///
    /// Tags are sorted; ids keep registration order.
    #[must_use]
    pub fn tags(&self) -> BTreeMap<String, Vec<String>> {
        let mut tags: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for rule in &self.rules {
            for tag in rule.tags() {
                tags.entry(tag.to_string())
                    .or_default()
                    .push(rule.id().to_string());
            }
        }
        tags
    }

    /// Applies the selected rules to one file.
    ///
    /// A rule runs when it is selected by `tags` (or `tags` is empty), none of
    /// its id or tags has an ignore pattern matching the file, and none of its
    /// id or tags is in `skip_list`. An unreadable file is reported as a
    /// warning and yields no matches.
    #[must_use]
    pub fn run(
        &self,
        file: &StateFile,
        tags: &BTreeSet<String>,
        skip_list: &BTreeSet<String>,
    ) -> Vec<Match> {
        let text = match std::fs::read_to_string(file.path()) {
            Ok(text) => text,
            Err(e) => {
                warn!("Couldn't open {} - {}", file.path().display(), e);
                return Vec::new();
            }
        };

        let mut matches = Vec::new();
        for rule in &self.rules {
            let definition = rule.definition();

            if !tags.is_empty() && !definition.iter().any(|key| tags.contains(*key)) {
                continue;
            }

            if let Some(key) = definition
                .iter()
                .find(|key| self.config.is_file_ignored(file.path(), key))
            {
                debug!(
                    "Rule {} ignored for {} via `{}`",
                    rule.id(),
                    file.path().display(),
                    key
                );
                continue;
            }

            if definition.iter().any(|key| skip_list.contains(*key)) {
                continue;
            }

            matches.extend(match_lines(rule, file, &text));
            matches.extend(match_full_text(rule, file, &text));
        }

        matches
    }
}

impl fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleRegistry")
            .field("rules", &self.rules.iter().map(|r| r.id()).collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

/// Verbose listing of all rules, sorted by id.
impl fmt::Display for RuleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let listing: Vec<String> = self.sorted_rules().iter().map(|r| r.verbose()).collect();
        f.write_str(&listing.join("\n"))
    }
}

impl<'a> IntoIterator for &'a RuleRegistry {
    type Item = &'a RuleRef;
    type IntoIter = std::slice::Iter<'a, RuleRef>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RuleOptions;
    use crate::patterns::PathPatternSet;
    use crate::rule::Rule;
    use crate::types::{FileKind, LineMatch};
    use tempfile::TempDir;

    /// Fires on every line containing a tab.
    struct Tabs;

    impl Rule for Tabs {
        fn id(&self) -> &str {
            "203"
        }
        fn shortdesc(&self) -> &str {
            "Most files should not contain tabs"
        }
        fn tags(&self) -> Vec<&str> {
            vec!["formatting"]
        }
        fn match_line(&self, _file: &StateFile, line: &str) -> LineMatch {
            line.contains('\t').into()
        }
    }

    /// Fires on every line containing `latest`.
    struct Latest;

    impl Rule for Latest {
        fn id(&self) -> &str {
            "103"
        }
        fn shortdesc(&self) -> &str {
            "Pinned version"
        }
        fn tags(&self) -> Vec<&str> {
            vec!["idempotency", "formatting"]
        }
        fn match_line(&self, _file: &StateFile, line: &str) -> LineMatch {
            line.contains("latest").into()
        }
    }

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(ToString::to_string).collect()
    }

    fn registry(config: Config) -> RuleRegistry {
        let mut registry = RuleRegistry::new(Arc::new(config));
        registry.register(Box::new(Tabs));
        registry.register(Box::new(Latest));
        registry
    }

    fn write(dir: &TempDir, name: &str, content: &str) -> StateFile {
        let path = dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, content).unwrap();
        StateFile::new(path, FileKind::State)
    }

    fn ids(matches: &[Match]) -> Vec<&str> {
        matches.iter().map(Match::rule_id).collect()
    }

    #[test]
    fn runs_all_rules_in_registration_order() {
        let dir = TempDir::new().unwrap();
        let file = write(&dir, "init.sls", "pkg:\n\tversion: latest\n");
        let matches = registry(Config::default()).run(&file, &set(&[]), &set(&[]));
        assert_eq!(ids(&matches), vec!["203", "103"]);
        assert_eq!(matches[0].line_number(), 2);
    }

    #[test]
    fn tags_select_by_tag_or_id() {
        let dir = TempDir::new().unwrap();
        let file = write(&dir, "init.sls", "\tlatest\n");
        let registry = registry(Config::default());

        assert_eq!(ids(&registry.run(&file, &set(&["idempotency"]), &set(&[]))), vec!["103"]);
        assert_eq!(ids(&registry.run(&file, &set(&["203"]), &set(&[]))), vec!["203"]);
        assert!(registry.run(&file, &set(&["security"]), &set(&[])).is_empty());
    }

    #[test]
    fn skip_list_excludes_by_tag_or_id() {
        let dir = TempDir::new().unwrap();
        let file = write(&dir, "init.sls", "\tlatest\n");
        let registry = registry(Config::default());

        assert!(registry.run(&file, &set(&[]), &set(&["formatting"])).is_empty());
        assert_eq!(ids(&registry.run(&file, &set(&[]), &set(&["203"]))), vec!["103"]);
        assert_eq!(
            ids(&registry.run(&file, &set(&["formatting"]), &set(&["idempotency"]))),
            vec!["203"]
        );
    }

    #[test]
    fn per_rule_ignore_patterns_apply_to_tags() {
        let dir = TempDir::new().unwrap();
        let ignored = write(&dir, "tests/other/test.jinja", "\tlatest\n");
        let checked = write(&dir, "test.jinja", "\tlatest\n");

        let patterns =
            PathPatternSet::with_base(["tests/**/*.jinja"], Some(dir.path().to_path_buf()))
                .unwrap();
        let mut config = Config::default();
        config.rules.insert(
            "formatting".to_string(),
            RuleOptions {
                ignore: Some(patterns),
            },
        );
        let registry = registry(config);

        assert!(registry.run(&ignored, &set(&[]), &set(&[])).is_empty());
        assert_eq!(ids(&registry.run(&checked, &set(&[]), &set(&[]))), vec!["203", "103"]);
    }

    #[test]
    fn per_rule_ignore_by_id_only_skips_that_rule() {
        let dir = TempDir::new().unwrap();
        let file = write(&dir, "legacy/init.sls", "\tlatest\n");

        let patterns =
            PathPatternSet::with_base(["legacy/"], Some(dir.path().to_path_buf())).unwrap();
        let mut config = Config::default();
        config.rules.insert(
            "103".to_string(),
            RuleOptions {
                ignore: Some(patterns),
            },
        );

        assert_eq!(ids(&registry(config).run(&file, &set(&[]), &set(&[]))), vec!["203"]);
    }

    #[test]
    fn unreadable_file_yields_no_matches() {
        let dir = TempDir::new().unwrap();
        let missing = StateFile::new(dir.path().join("missing.sls"), FileKind::State);
        assert!(registry(Config::default())
            .run(&missing, &set(&[]), &set(&[]))
            .is_empty());
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut registry = registry(Config::default());
        assert!(!registry.register(Box::new(Tabs)));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn listings_are_sorted() {
        let registry = registry(Config::default());
        let sorted: Vec<&str> = registry.sorted_rules().iter().map(|r| r.id()).collect();
        assert_eq!(sorted, vec!["103", "203"]);

        let tags = registry.tags();
        let keys: Vec<&str> = tags.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["formatting", "idempotency"]);
        assert_eq!(tags["formatting"], vec!["203", "103"]);

        assert!(registry.to_string().starts_with("103: Pinned version\n \n203:"));
    }
}
