//! Errors raised while reading an already-open chat stream.

use std::fmt;

use crate::traits::HttpError;

/// Failure while pulling chunks mid-stream.
///
/// Same user-visible handling as a transport error: the exchange fails and
/// text received so far stays in the transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamError {
    /// Stream connection was lost unexpectedly.
    ConnectionLost { message: String },

    /// The transport gave up waiting for the next chunk.
    Timeout { message: String },

    /// Generic stream error.
    Other { message: String },
}

impl StreamError {
    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            StreamError::ConnectionLost { .. } => {
                "Connection to the chat service was lost. Please try again.".to_string()
            }
            StreamError::Timeout { .. } => {
                "The chat service stopped responding. Please try again.".to_string()
            }
            StreamError::Other { .. } => "An error occurred. Please try again.".to_string(),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            StreamError::ConnectionLost { .. } => "E_STREAM_CONN",
            StreamError::Timeout { .. } => "E_STREAM_TIMEOUT",
            StreamError::Other { .. } => "E_STREAM_OTHER",
        }
    }
}

impl From<HttpError> for StreamError {
    fn from(err: HttpError) -> Self {
        match err {
            HttpError::Timeout(message) => StreamError::Timeout { message },
            HttpError::Io(message) | HttpError::ConnectionFailed(message) => {
                StreamError::ConnectionLost { message }
            }
            other => StreamError::Other {
                message: other.to_string(),
            },
        }
    }
}

impl fmt::Display for StreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamError::ConnectionLost { message } => {
                write!(f, "Stream connection lost: {}", message)
            }
            StreamError::Timeout { message } => write!(f, "Stream timeout: {}", message),
            StreamError::Other { message } => write!(f, "Stream error: {}", message),
        }
    }
}

impl std::error::Error for StreamError {}
