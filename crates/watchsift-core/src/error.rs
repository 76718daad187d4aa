use std::path::PathBuf;

use thiserror::Error;

/// Validation errors for domain values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("symbol cannot be empty")]
    EmptySymbol,
}

/// Run-level failures surfaced by `watchsift-core`.
///
/// Per-file read failures and source deletion failures are not represented
/// here; they are recovered locally and reported as warnings.
#[derive(Debug, Error)]
pub enum SiftError {
    #[error("folder does not exist: {}", path.display())]
    FolderNotFound { path: PathBuf },

    #[error("not a directory: {}", path.display())]
    NotADirectory { path: PathBuf },

    #[error("invalid glob pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("failed to scan {}: {source}", path.display())]
    Scan {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("output {} would overwrite a selected watchlist", path.display())]
    OutputIsSelected { path: PathBuf },
}

impl SiftError {
    /// Configuration problems detected before any file is processed.
    pub const fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::FolderNotFound { .. }
                | Self::NotADirectory { .. }
                | Self::InvalidPattern { .. }
                | Self::OutputIsSelected { .. }
        )
    }
}
