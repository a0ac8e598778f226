use thiserror::Error;

use crate::http::{HttpError, HttpResponse};

/// Errors that can occur when talking to a forge's REST API.
#[derive(Debug, Error)]
pub enum PlatformError {
    /// Non-success status returned by the platform.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Authentication required or rejected.
    #[error("Authentication failed ({status}): {message}")]
    Auth { status: u16, message: String },

    /// Resource not found (project, issue, etc.).
    #[error("Not found: {resource}")]
    NotFound { resource: String },

    /// Network or connection error.
    #[error("Network error: {message}")]
    Network { message: String },

    /// The response body could not be decoded.
    #[error("Decode error: {message}")]
    Decode { message: String },

    /// The request could not be built from the given input.
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },
}

impl PlatformError {
    /// Create a not found error.
    #[inline]
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Create a network error.
    #[inline]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Create an invalid input error.
    #[inline]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Classify a non-success response into a typed error.
    pub fn from_response(response: &HttpResponse, resource: &str) -> Self {
        let message = first_line(&response.text());
        match response.status {
            401 | 403 => Self::Auth {
                status: response.status,
                message,
            },
            404 => Self::not_found(resource),
            status => Self::Api { status, message },
        }
    }

    /// HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } | Self::Auth { status, .. } => Some(*status),
            Self::NotFound { .. } => Some(404),
            _ => None,
        }
    }

    #[inline]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<HttpError> for PlatformError {
    fn from(err: HttpError) -> Self {
        Self::network(err.to_string())
    }
}

impl From<serde_json::Error> for PlatformError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode {
            message: err.to_string(),
        }
    }
}

fn first_line(text: &str) -> String {
    text.lines().next().unwrap_or_default().to_string()
}

/// Extract a short error message suitable for display.
///
/// Takes the first line of an error message, which is useful for errors
/// that include multi-line response bodies.
#[inline]
pub fn short_error_message(e: &impl std::error::Error) -> String {
    let full = e.to_string();
    full.lines().next().unwrap_or(&full).to_string()
}

/// Result type for platform operations.
pub type Result<T> = std::result::Result<T, PlatformError>;
