//! Runner: turns one input path into state files and checks each once.

use crate::checked::CheckedFiles;
use crate::config::Config;
use crate::registry::RuleRegistry;
use crate::types::{FileKind, Match, StateFile};
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info};

/// File checked when the input path names a directory.
pub const STATE_DIR_ENTRY: &str = "init.sls";

/// Checks the state files behind a single input path.
///
/// The [`CheckedFiles`] handle is owned by the whole execution and shared by
/// every runner created in it; a file already claimed by an earlier runner is
/// skipped and contributes no matches here.
#[derive(Debug)]
pub struct Runner<'a> {
    registry: &'a RuleRegistry,
    config: &'a Config,
    files: Vec<StateFile>,
    checked: CheckedFiles,
}

impl<'a> Runner<'a> {
    /// Resolves `input` into the files to check.
    ///
    /// A directory resolves to its [`STATE_DIR_ENTRY`]; any other path is
    /// checked as given. Files matching `config.exclude_paths` are dropped.
    pub fn new(
        registry: &'a RuleRegistry,
        input: impl AsRef<Path>,
        config: &'a Config,
        checked: CheckedFiles,
    ) -> Self {
        let input = input.as_ref();
        let file = if input.is_dir() {
            StateFile::new(input.join(STATE_DIR_ENTRY), FileKind::Init)
        } else {
            StateFile::new(input, FileKind::State)
        };

        let files = if config.is_excluded(file.path()) {
            debug!("Excluding {}", file.path().display());
            Vec::new()
        } else {
            vec![file]
        };

        Self {
            registry,
            config,
            files,
            checked,
        }
    }

    /// The files this runner will check, before deduplication.
    #[must_use]
    pub fn files(&self) -> &[StateFile] {
        &self.files
    }

    /// Checks every file not yet claimed and returns the matches found.
    #[must_use]
    pub fn run(&self) -> Vec<Match> {
        let mut seen = HashSet::new();
        let mut matches = Vec::new();

        for file in &self.files {
            if !seen.insert(file) {
                continue;
            }
            if !self.checked.claim(file.path()) {
                debug!("Already checked {}", file.path().display());
                continue;
            }

            if self.config.verbosity > 0 {
                info!("Examining {} of type {}", file.path().display(), file.kind);
            }

            matches.extend(
                self.registry
                    .run(file, &self.config.tags, &self.config.skip_list),
            );
        }

        matches
    }
}
