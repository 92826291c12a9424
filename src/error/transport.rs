//! Errors raised while opening a chat stream.

use std::fmt;

use crate::traits::HttpError;

/// Request setup or non-success response status.
///
/// Fatal to the exchange it belongs to; never retried automatically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// Connection to the server failed.
    ConnectionFailed { url: String, message: String },

    /// Request timed out before the stream began.
    Timeout { operation: String },

    /// HTTP status error (non-2xx response).
    HttpStatus { status: u16, message: String },

    /// The endpoint URL could not be used.
    InvalidUrl { url: String },

    /// Request body could not be serialized.
    Serialize { message: String },

    /// Generic transport error.
    Other { message: String },
}

impl TransportError {
    /// Map an adapter-level error for a request to `url`.
    pub fn from_http(err: HttpError, url: &str) -> Self {
        match err {
            HttpError::ConnectionFailed(message) => TransportError::ConnectionFailed {
                url: url.to_string(),
                message,
            },
            HttpError::Timeout(_) => TransportError::Timeout {
                operation: format!("POST {}", url),
            },
            HttpError::ServerError { status, message } => {
                TransportError::HttpStatus { status, message }
            }
            HttpError::InvalidUrl(_) => TransportError::InvalidUrl {
                url: url.to_string(),
            },
            HttpError::Io(message) | HttpError::Other(message) => {
                TransportError::Other { message }
            }
        }
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            TransportError::ConnectionFailed { .. } => {
                "Unable to connect to the chat service. Please try again.".to_string()
            }
            TransportError::Timeout { .. } => {
                "The chat service did not respond in time. Please try again.".to_string()
            }
            TransportError::HttpStatus { status, .. } => match *status {
                404 => "The conversation was not found. Please try again.".to_string(),
                429 => "Too many requests. Please wait a moment and try again.".to_string(),
                500..=599 => "An error occurred. Please try again.".to_string(),
                _ => format!("The service returned an error (HTTP {}). Please try again.", status),
            },
            TransportError::InvalidUrl { url } => {
                format!("The service address '{}' is not valid.", url)
            }
            TransportError::Serialize { .. } | TransportError::Other { .. } => {
                "An error occurred. Please try again.".to_string()
            }
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            TransportError::ConnectionFailed { .. } => "E_NET_CONN",
            TransportError::Timeout { .. } => "E_NET_TIMEOUT",
            TransportError::HttpStatus { .. } => "E_NET_HTTP",
            TransportError::InvalidUrl { .. } => "E_NET_URL",
            TransportError::Serialize { .. } => "E_NET_BODY",
            TransportError::Other { .. } => "E_NET_OTHER",
        }
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::ConnectionFailed { url, message } => {
                write!(f, "Connection to {} failed: {}", url, message)
            }
            TransportError::Timeout { operation } => write!(f, "{} timed out", operation),
            TransportError::HttpStatus { status, message } => {
                write!(f, "HTTP {}: {}", status, message)
            }
            TransportError::InvalidUrl { url } => write!(f, "Invalid URL: {}", url),
            TransportError::Serialize { message } => {
                write!(f, "Failed to serialize request: {}", message)
            }
            TransportError::Other { message } => write!(f, "Transport error: {}", message),
        }
    }
}

impl std::error::Error for TransportError {}
