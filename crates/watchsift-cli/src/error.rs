use thiserror::Error;
use watchsift_core::SiftError;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Sift(#[from] SiftError),

    #[error("logging setup failed: {0}")]
    Logging(String),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error("timestamp formatting failed: {0}")]
    Timestamp(#[from] time::error::Format),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Sift(error) if error.is_configuration() => 2,
            Self::Sift(_) => 10,
            Self::Logging(_) => 2,
            Self::Serialization(_) | Self::Timestamp(_) => 4,
            Self::Io(_) => 10,
        }
    }
}
