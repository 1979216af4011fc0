//! Append-only log of fatal errors.

use std::io::Write as _;
use std::path::{Path, PathBuf};

use crate::foundation::error::{StillframeError, StillframeResult};

/// `error.log`: one timestamped line per fatal error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ErrorLog {
    path: PathBuf,
}

impl ErrorLog {
    /// Default log file name.
    pub const FILE_NAME: &'static str = "error.log";

    /// Log at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Log named [`ErrorLog::FILE_NAME`] inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(Self::FILE_NAME))
    }

    /// Log file location.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the file empty if it does not exist yet. Existing contents are kept.
    pub fn ensure(&self) -> StillframeResult<()> {
        std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map(drop)
            .map_err(|e| StillframeError::io(&self.path, e))
    }

    /// Append one entry stamped with the current time.
    pub fn append(&self, message: &str) -> StillframeResult<()> {
        let line = format_entry(jiff::Timestamp::now(), message);
        let mut f = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| StillframeError::io(&self.path, e))?;
        f.write_all(line.as_bytes())
            .map_err(|e| StillframeError::io(&self.path, e))
    }
}

/// `<RFC 3339 UTC timestamp>: <message>\n`, with the message folded onto one line.
pub fn format_entry(at: jiff::Timestamp, message: &str) -> String {
    let flat = message
        .lines()
        .map(str::trim_end)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" | ");
    format!("{at}: {flat}\n")
}

#[cfg(test)]
#[path = "../tests/unit/errlog.rs"]
mod tests;
