//! Error types for backend requests.

use fieldmap_session::ServiceError;
use thiserror::Error;

/// Errors that can occur while talking to the backend.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ClientError {
    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),

    /// The backend answered with a non-success status.
    #[error("backend returned {status}: {message}")]
    Status { status: u16, message: String },

    /// The response body did not have the expected shape.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Reading the file to upload failed.
    #[error("I/O error: {0}")]
    Io(String),

    /// A configuration value could not be used.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ClientError {
    /// Returns a user-friendly error message suitable for display.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::Network(_) => "Could not reach the merge service. Is it running?",
            Self::Status { status, .. } if *status >= 500 => {
                "The merge service failed to process the request."
            }
            Self::Status { .. } => "The merge service rejected the request.",
            Self::InvalidResponse(_) => "The merge service sent an unexpected response.",
            Self::Io(_) => "Could not read the file to upload.",
            Self::Config(_) => "The client configuration is invalid.",
        }
    }

    /// Returns whether this error is potentially recoverable with a retry.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) => true,
            Self::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::InvalidResponse(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidResponse(err.to_string())
    }
}

impl From<ClientError> for ServiceError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Network(message) => Self::Network(message),
            ClientError::Status { status, message } => Self::Status { status, message },
            ClientError::InvalidResponse(message) => Self::InvalidResponse(message),
            ClientError::Io(message) | ClientError::Config(message) => Self::Io(message),
        }
    }
}

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages() {
        let err = ClientError::Network("connection refused".to_string());
        assert!(err.user_message().contains("Is it running"));

        let err = ClientError::Status {
            status: 503,
            message: "down".to_string(),
        };
        assert!(err.user_message().contains("failed to process"));

        let err = ClientError::Status {
            status: 422,
            message: "bad mapping".to_string(),
        };
        assert!(err.user_message().contains("rejected"));
    }

    #[test]
    fn test_retryable() {
        assert!(ClientError::Network("timeout".to_string()).is_retryable());
        assert!(
            ClientError::Status {
                status: 502,
                message: String::new()
            }
            .is_retryable()
        );
        assert!(
            !ClientError::Status {
                status: 400,
                message: String::new()
            }
            .is_retryable()
        );
        assert!(!ClientError::InvalidResponse("x".to_string()).is_retryable());
    }

    #[test]
    fn converts_into_service_error() {
        let err: ServiceError = ClientError::Status {
            status: 500,
            message: "boom".to_string(),
        }
        .into();
        assert_eq!(
            err,
            ServiceError::Status {
                status: 500,
                message: "boom".to_string()
            }
        );
        assert!(err.is_retryable());

        let err: ServiceError = ClientError::Config("bad url".to_string()).into();
        assert_eq!(err, ServiceError::Io("bad url".to_string()));
    }
}
