//! Error types for callsig

use thiserror::Error;

/// Core error type for routine resolution and invocation
#[derive(Error, Debug)]
pub enum CallsigError {
    /// A metadata row carried a direction code that is not valid for the routine kind
    #[error("unknown parameter type {code} for parameter '{parameter}' of routine '{routine}'")]
    UnrecognizedParameterDirection {
        routine: String,
        parameter: String,
        code: i16,
    },

    #[error("Metadata error: {0}")]
    Metadata(String),

    #[error("Execution error: {0}")]
    Execution(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid fingerprint: {0}")]
    InvalidFingerprint(String),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Result type alias for callsig operations
pub type Result<T> = std::result::Result<T, CallsigError>;
