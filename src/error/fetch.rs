//! Page fetch error types.
//!
//! This module defines the errors a page source can report back to the list
//! controller, plus the conversions from the transport and decoding layers.

use std::fmt;

use crate::traits::HttpError;

/// Errors produced while fetching one page of a listing.
///
/// The list controller never propagates these; it turns them into the
/// list's `error` field so the view can render an inline message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Connection to the server failed.
    ConnectionFailed { url: String, message: String },

    /// Request timed out.
    Timeout { message: String },

    /// HTTP status error (non-2xx response).
    HttpStatus { status: u16, message: String },

    /// Response body could not be decoded.
    InvalidResponse { message: String },

    /// Request was cancelled by the collaborator.
    Cancelled,

    /// Any other failure, carrying whatever message the source supplied.
    Other { message: String },
}

impl FetchError {
    /// Build an `Other` error from a free-form message.
    pub fn other(message: impl Into<String>) -> Self {
        FetchError::Other {
            message: message.into(),
        }
    }

    /// Check if this error is likely transient and worth retrying.
    pub fn is_retryable(&self) -> bool {
        match self {
            FetchError::ConnectionFailed { .. } => true,
            FetchError::Timeout { .. } => true,
            FetchError::HttpStatus { status, .. } => {
                *status >= 500 || *status == 429 || *status == 408
            }
            FetchError::InvalidResponse { .. } => false,
            FetchError::Cancelled => false,
            FetchError::Other { .. } => false,
        }
    }

    /// Get a user-friendly error message.
    ///
    /// `Other` returns its message verbatim, which may be empty.
    pub fn user_message(&self) -> String {
        match self {
            FetchError::ConnectionFailed { .. } => {
                "Unable to connect to the server. Please check your internet connection.".to_string()
            }
            FetchError::Timeout { .. } => {
                "The server took too long to respond. Please try again.".to_string()
            }
            FetchError::HttpStatus { status, .. } => match *status {
                400 => "The request was invalid. Please try again.".to_string(),
                401 => "Authentication required. Please sign in again.".to_string(),
                403 => "Access denied. You don't have permission for this action.".to_string(),
                404 => "The requested resource was not found.".to_string(),
                429 => "Too many requests. Please wait a moment and try again.".to_string(),
                500..=599 => "The server is experiencing issues. Please try again later.".to_string(),
                _ => format!("The server returned an error (HTTP {}). Please try again.", status),
            },
            FetchError::InvalidResponse { .. } => {
                "Received an invalid response from the server. Please try again.".to_string()
            }
            FetchError::Cancelled => "The request was cancelled.".to_string(),
            FetchError::Other { message } => message.clone(),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            FetchError::ConnectionFailed { .. } => "E_FETCH_CONN",
            FetchError::Timeout { .. } => "E_FETCH_TIMEOUT",
            FetchError::HttpStatus { .. } => "E_FETCH_HTTP",
            FetchError::InvalidResponse { .. } => "E_FETCH_INVALID",
            FetchError::Cancelled => "E_FETCH_CANCEL",
            FetchError::Other { .. } => "E_FETCH_OTHER",
        }
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::ConnectionFailed { url, message } => {
                write!(f, "Connection failed to '{}': {}", url, message)
            }
            FetchError::Timeout { message } => write!(f, "Request timed out: {}", message),
            FetchError::HttpStatus { status, message } => {
                write!(f, "HTTP {} error: {}", status, message)
            }
            FetchError::InvalidResponse { message } => write!(f, "Invalid response: {}", message),
            FetchError::Cancelled => write!(f, "Request cancelled"),
            FetchError::Other { message } => write!(f, "Fetch failed: {}", message),
        }
    }
}

impl std::error::Error for FetchError {}

impl From<HttpError> for FetchError {
    fn from(err: HttpError) -> Self {
        match err {
            HttpError::ConnectionFailed(message) => FetchError::ConnectionFailed {
                url: String::new(),
                message,
            },
            HttpError::Timeout(message) => FetchError::Timeout { message },
            HttpError::ServerError { status, message } => FetchError::HttpStatus { status, message },
            HttpError::Cancelled => FetchError::Cancelled,
            HttpError::InvalidUrl(message) => FetchError::Other {
                message: format!("invalid URL: {}", message),
            },
            HttpError::Io(message) | HttpError::Other(message) => FetchError::Other { message },
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::InvalidResponse {
            message: err.to_string(),
        }
    }
}

/// Attach the request URL to connection failures coming from the transport.
pub fn classify_http_error(err: HttpError, url: &str) -> FetchError {
    match FetchError::from(err) {
        FetchError::ConnectionFailed { message, .. } => FetchError::ConnectionFailed {
            url: url.to_string(),
            message,
        },
        other => other,
    }
}
