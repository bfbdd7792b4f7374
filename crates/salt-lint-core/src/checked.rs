//! Set of state files already processed during one execution.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

/// Shared handle to the files checked so far.
///
/// Every [`Runner`](crate::Runner) of one execution receives a clone of the
/// same handle, so a file passed several times (directly, through its
/// directory, or under a different relative spelling) contributes matches
/// at most once. The set only grows.
///
/// Paths are keyed by their canonical absolute form when the file exists,
/// and by the path joined onto the working directory otherwise.
#[derive(Debug, Clone, Default)]
pub struct CheckedFiles {
    inner: Arc<Mutex<HashSet<PathBuf>>>,
}

impl CheckedFiles {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if `path` was already checked.
    #[must_use]
    pub fn contains(&self, path: &Path) -> bool {
        let key = key_for(path);
        self.lock().contains(&key)
    }

    /// Marks `path` as checked.
    ///
    /// Returns `true` if the caller is the first to claim it; the lookup and
    /// insertion happen under one lock.
    pub fn claim(&self, path: &Path) -> bool {
        let key = key_for(path);
        self.lock().insert(key)
    }

    /// Number of distinct files checked.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns true if nothing was checked yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashSet<PathBuf>> {
        // The set is only ever inserted into, so a poisoned guard is still consistent.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn key_for(path: &Path) -> PathBuf {
    if let Ok(canonical) = path.canonicalize() {
        return canonical;
    }
    match std::env::current_dir() {
        Ok(cwd) if path.is_relative() => cwd.join(path),
        _ => path.to_path_buf(),
    }
}
