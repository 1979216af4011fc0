use std::path::{Path, PathBuf};

/// Convenience result type used across stillframe.
pub type StillframeResult<T> = Result<T, StillframeError>;

/// Top-level error taxonomy used by the library.
#[derive(thiserror::Error, Debug)]
pub enum StillframeError {
    /// Invalid user-provided values (watermark text, sizes, encode settings).
    #[error("validation error: {0}")]
    Validation(String),

    /// Configuration file could not be created, read or understood.
    #[error("config error: {0}")]
    Config(String),

    /// Errors while decoding the background or drawing the watermark.
    #[error("render error: {0}")]
    Render(String),

    /// Errors reported by the external encoder.
    #[error("encode error: {0}")]
    Encode(String),

    /// Filesystem failure tied to a specific path.
    #[error("io error at '{}': {source}", path.display())]
    Io {
        /// Path that was being accessed.
        path: PathBuf,
        /// Underlying OS error.
        #[source]
        source: std::io::Error,
    },

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StillframeError {
    /// Build a [`StillframeError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`StillframeError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`StillframeError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`StillframeError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`StillframeError::Io`] value for `path`.
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
