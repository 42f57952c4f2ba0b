//! Commerce API errors.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur when talking to the commerce API.
#[derive(Debug, Error)]
pub enum CommerceApiError {
    /// The requested resource does not exist (HTTP 404).
    #[error("resource not found")]
    NotFound,

    /// The credential was missing, invalid or lacked permission (HTTP 401/403).
    #[error("request was not authorised (status {0})")]
    Unauthorized(u16),

    /// The API refused the request (any other 4xx).
    #[error("request rejected with status {status}: {message}")]
    Rejected {
        /// HTTP status code
        status: u16,

        /// Response body
        message: String,
    },

    /// The API failed to handle the request (5xx).
    #[error("commerce api failed with status {status}: {message}")]
    Server {
        /// HTTP status code
        status: u16,

        /// Response body
        message: String,
    },

    /// An HTTP transport error occurred.
    #[error("http error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API answered with a body that could not be understood.
    #[error("unexpected response from commerce api: {0}")]
    InvalidResponse(String),
}

impl CommerceApiError {
    /// Classify a non-success response.
    pub fn from_status(status: StatusCode, message: String) -> Self {
        match status {
            StatusCode::NOT_FOUND => Self::NotFound,
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Self::Unauthorized(status.as_u16())
            }
            status if status.is_server_error() => Self::Server {
                status: status.as_u16(),
                message,
            },
            status => Self::Rejected {
                status: status.as_u16(),
                message,
            },
        }
    }

    /// Whether the resource simply does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }

    /// Whether retrying the same request later could succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Server { .. } | Self::Transport(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_is_classified() {
        let error = CommerceApiError::from_status(StatusCode::NOT_FOUND, String::new());

        assert!(error.is_not_found(), "404 must map to NotFound");
        assert!(!error.is_transient(), "404 is not worth retrying");
    }

    #[test]
    fn auth_failures_are_classified() {
        for status in [StatusCode::UNAUTHORIZED, StatusCode::FORBIDDEN] {
            let error = CommerceApiError::from_status(status, String::new());

            assert!(
                matches!(error, CommerceApiError::Unauthorized(code) if code == status.as_u16()),
                "expected Unauthorized for {status}, got {error:?}"
            );
        }
    }

    #[test]
    fn server_errors_are_transient() {
        let error = CommerceApiError::from_status(
            StatusCode::INTERNAL_SERVER_ERROR,
            "boom".to_string(),
        );

        assert!(error.is_transient(), "5xx should be retryable");
        assert_eq!(
            error.to_string(),
            "commerce api failed with status 500: boom"
        );
    }

    #[test]
    fn other_client_errors_are_rejections() {
        let error =
            CommerceApiError::from_status(StatusCode::UNPROCESSABLE_ENTITY, "out of stock".into());

        assert!(
            matches!(
                &error,
                CommerceApiError::Rejected { status: 422, message } if message == "out of stock"
            ),
            "expected Rejected, got {error:?}"
        );
        assert!(!error.is_transient(), "4xx is not retryable");
    }
}
