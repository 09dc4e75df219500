//! Error types for clipilot.

use thiserror::Error;

/// Primary error type for all clipilot operations.
#[derive(Debug, Error)]
pub enum ClipilotError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("authentication error: {0}")]
    Auth(#[from] crate::auth::AuthError),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl ClipilotError {
    /// Remedial hint the CLI prints under the error text.
    pub fn remedy(&self) -> &'static str {
        match self {
            Self::Auth(err) => err.remedy(),
            Self::Configuration(_) => "check ~/.clipilot/config.json, or pass --config",
            Self::Network(_) => "check your network connection and retry",
            Self::InvalidArgument(_) => "run `clipilot --help` for usage",
            _ => "re-run with --verbose for details",
        }
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, ClipilotError>;
