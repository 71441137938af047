//! Error types for the GoodJob client

use thiserror::Error;

/// Fallback message when the upload provider gives no reason of its own
pub const UPLOAD_FAILED: &str = "Failed to upload file to cloud storage";

/// Message used when the upload provider answers without a `secure_url`
pub const INVALID_UPLOAD_RESPONSE: &str = "Invalid response from cloud storage";

/// Main error type for client operations
#[derive(Error, Debug)]
pub enum ClientError {
    /// Network or transport failure before a response was received
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Backend answered with a non-success status
    #[error("API error: {status} - {message}")]
    Http { status: u16, message: String },

    /// Response body did not have the expected shape
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// A required file was not supplied
    #[error("No file provided")]
    NoFileProvided,

    /// Upload provider rejected the file or could not be reached
    #[error("{0}")]
    Upload(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Type alias for client results
pub type Result<T> = std::result::Result<T, ClientError>;

impl ClientError {
    /// Create a new HTTP status error
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }

    /// Create a new malformed response error
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse(message.into())
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Status code of the backend response, when there was one
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Http { status, .. } => Some(*status),
            ClientError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Check if error is a 404 Not Found
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Check if error is authentication related
    pub fn is_auth_error(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }
}
