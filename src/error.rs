//! Error types for opencast.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for opencast.
#[derive(Error, Debug)]
pub enum Error {
    // File system errors
    #[error("Path not found: {0}")]
    PathNotFound(String),

    #[error("Not a directory: {0}")]
    NotADirectory(String),

    // Parse errors
    #[error("Failed to parse filename: {0}")]
    ParseError(String),

    // Registry errors
    #[error("Unknown catalog type: {0}")]
    UnknownCatalogType(String),

    #[error("Unknown display: {0}")]
    UnknownDisplay(String),

    #[error("No displays configured. Add a [[displays]] entry to the config file")]
    NoDisplays,

    // Casting errors
    #[error("Cast command failed: {0}")]
    CastCommandFailed(String),

    #[error("Cast command timed out after {secs}s: {command}")]
    CastTimeout { command: String, secs: u64 },

    // Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // HTTP errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    // Generic errors
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a generic error from a string.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }

    /// Whether this error came from the casting capability.
    pub fn is_cast_failure(&self) -> bool {
        matches!(
            self,
            Error::CastCommandFailed(_) | Error::CastTimeout { .. } | Error::Http(_)
        )
    }
}
