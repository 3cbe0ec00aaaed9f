//! Error types for the iapr-core library.
//!
//! The extraction engine itself never fails; these errors cover the
//! surrounding I/O: configuration files and inbound mail records.

use thiserror::Error;

/// Main error type for the iapr library.
#[derive(Error, Debug)]
pub enum IaprError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// An inbound mail record could not be built.
    #[error("invalid record: {0}")]
    Record(String),
}

impl From<mailparse::MailParseError> for IaprError {
    fn from(err: mailparse::MailParseError) -> Self {
        Self::Record(err.to_string())
    }
}

/// Result type for the iapr library.
pub type Result<T> = std::result::Result<T, IaprError>;
