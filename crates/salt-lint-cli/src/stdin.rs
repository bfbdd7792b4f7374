//! Materialising piped standard input as a state file.

use anyhow::{Context, Result};
use std::io::{IsTerminal, Read, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Piped input written to a temporary `.sls` file.
///
/// The file is deleted when this value is dropped, on every exit path.
#[derive(Debug)]
pub struct StdinState {
    file: NamedTempFile,
}

impl StdinState {
    /// Writes `content` to a new temporary state file.
    ///
    /// # Errors
    ///
    /// Returns an error if the temporary file cannot be created or written.
    pub fn new(content: &str) -> Result<Self> {
        let mut file = tempfile::Builder::new()
            .prefix("salt-lint-")
            .suffix(".sls")
            .tempfile()
            .context("Failed to create temporary file for stdin")?;
        file.write_all(content.as_bytes())
            .and_then(|()| file.flush())
            .context("Failed to write stdin to temporary file")?;
        Ok(Self { file })
    }

    /// Path of the temporary file.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

/// Reads piped standard input, if any.
///
/// Returns `None` when stdin is a terminal or nothing was piped.
///
/// # Errors
///
/// Returns an error if stdin cannot be read or the temporary file cannot be written.
pub fn capture() -> Result<Option<StdinState>> {
    let stdin = std::io::stdin();
    if stdin.is_terminal() {
        return Ok(None);
    }

    let mut content = String::new();
    stdin
        .lock()
        .read_to_string(&mut content)
        .context("Failed to read stdin")?;
    if content.is_empty() {
        return Ok(None);
    }

    StdinState::new(&content).map(Some)
}
