//! Error handling and custom error types
//!
//! Provides unified error handling across the application using thiserror.
//! Each pipeline stage has its own error kind; [`Error`] wraps them so the
//! service and the HTTP boundary can match once over everything that can go
//! wrong.

use thiserror::Error;

/// Upload policy violations, raised before any network work.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("No file selected for upload.")]
    EmptyFile,

    #[error("File size of {actual_mb:.2}MB exceeds the {limit_mb}MB limit.")]
    SizeLimitExceeded { actual_mb: f64, limit_mb: u64 },

    #[error("Invalid file type: '{provided}'. Allowed types are JPEG, PNG, GIF, WEBP.")]
    UnsupportedType { provided: String },
}

/// Failures talking to the generation provider.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Gemini API request timed out: {0}")]
    TransportTimeout(#[source] reqwest::Error),

    #[error("Error communicating with Gemini API: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Error from Gemini API ({status}): {body}")]
    ClientError { status: u16, body: String },

    #[error("Gemini API Server Error ({status}): {body}")]
    ServerError { status: u16, body: String },

    #[error("No response body received from Gemini API (status {status})")]
    EmptyResponseBody { status: u16 },

    #[error("Failed to parse Gemini response: {0}")]
    Decode(String),
}

impl ProviderError {
    /// Upstream HTTP status, when the failure carried one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ClientError { status, .. }
            | Self::ServerError { status, .. }
            | Self::EmptyResponseBody { status } => Some(*status),
            Self::TransportTimeout(_) | Self::Transport(_) | Self::Decode(_) => None,
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::TransportTimeout(err)
        } else {
            Self::Transport(err)
        }
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Failed to read or process image file: {0}")]
    AssetRead(#[source] std::io::Error),

    #[error("Error processing image with Gemini: {0}")]
    Provider(#[from] ProviderError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_limit_message_uses_two_decimals() {
        let err = ValidationError::SizeLimitExceeded {
            actual_mb: 5.0,
            limit_mb: 4,
        };
        assert_eq!(err.to_string(), "File size of 5.00MB exceeds the 4MB limit.");
    }

    #[test]
    fn test_provider_error_is_wrapped_with_status_and_body() {
        let err = Error::from(ProviderError::ServerError {
            status: 503,
            body: "overloaded".to_string(),
        });
        let message = err.to_string();
        assert!(message.starts_with("Error processing image with Gemini"));
        assert!(message.contains("503"));
        assert!(message.contains("overloaded"));
    }

    #[test]
    fn test_provider_error_status() {
        let err = ProviderError::ClientError {
            status: 403,
            body: "forbidden".to_string(),
        };
        assert_eq!(err.status(), Some(403));
        assert_eq!(ProviderError::Decode("bad".to_string()).status(), None);
    }
}
