//! Error taxonomy for media server operations.

use crate::transport::TransportError;
use thiserror::Error;

/// Errors that can occur when talking to a media server.
///
/// This is the only error type that leaves the session client: transport and
/// decoding failures are classified into one of these kinds first. The
/// `Display` text is suitable to show to a user as-is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Server address could not be parsed into an http(s) URL with a host
    #[error("Invalid server URL: {0}")]
    InvalidEndpoint(String),

    /// Credential exchange rejected, or the session token was refused (401)
    #[error("Invalid username or password")]
    Unauthorized,

    /// The server denied access to the resource (403)
    #[error("Access denied")]
    Forbidden,

    /// The requested resource does not exist (404)
    #[error("Resource not found")]
    NotFound,

    /// Server failed with a 5xx status
    #[error("Server error: {status}")]
    ServerError { status: u16 },

    /// Request failed before or without a server response
    #[error("Network error: {0}")]
    Network(String),

    /// Response body was not structurally parseable
    #[error("Failed to parse response: {0}")]
    Decoding(String),

    /// Server version is older than the minimum this client supports
    #[error("Server version {version} is not supported. Minimum required: {minimum}")]
    UnsupportedServerVersion { version: String, minimum: String },

    /// An authenticated-only operation was called without a session
    #[error("Not authenticated. Please sign in.")]
    NotAuthenticated,

    /// Anything that does not fit the kinds above
    #[error("{0}")]
    Generic(String),
}

impl ApiError {
    /// Classify a non-success HTTP status.
    pub fn from_status(status: u16) -> Self {
        match status {
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            500..=599 => Self::ServerError { status },
            _ => Self::Generic(format!("HTTP error: {}", status)),
        }
    }

    /// Create an invalid endpoint error
    pub fn invalid_endpoint(msg: impl Into<String>) -> Self {
        Self::InvalidEndpoint(msg.into())
    }

    /// Create a decoding error
    pub fn decoding(msg: impl Into<String>) -> Self {
        Self::Decoding(msg.into())
    }
}

impl From<TransportError> for ApiError {
    fn from(err: TransportError) -> Self {
        Self::Network(err.to_string())
    }
}

/// Result type for media server operations.
pub type Result<T> = std::result::Result<T, ApiError>;
