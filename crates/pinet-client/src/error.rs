//! Error types for the PiNet client

use thiserror::Error;

/// Errors that can occur when using the PiNet client
///
/// Every variant carries a human-readable message and displays exactly that
/// message, so callers can surface `to_string()` without further formatting.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// The API rejected the credentials (HTTP 401)
    #[error("{0}")]
    Authentication(String),

    /// The API rejected the input (HTTP 400)
    #[error("{0}")]
    Validation(String),

    /// Timeout, refused connection or any other transport failure
    #[error("{0}")]
    Network(String),

    /// Any other error status, or a success response that is not a JSON object
    #[error("{0}")]
    Api(String),
}

impl ClientError {
    /// The message carried by this error
    pub fn message(&self) -> &str {
        match self {
            Self::Authentication(message)
            | Self::Validation(message)
            | Self::Network(message)
            | Self::Api(message) => message,
        }
    }
}

/// Result type for client operations
pub type Result<T> = std::result::Result<T, ClientError>;
