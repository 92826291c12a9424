//! Unified error type for the crate.

use thiserror::Error;

use super::stream::StreamError;
use super::transport::TransportError;

/// Session-level failure.
#[derive(Debug, Error)]
pub enum ChatError {
    /// Opening the stream failed
    #[error("{0}")]
    Transport(#[from] TransportError),

    /// Reading the stream failed
    #[error("{0}")]
    Stream(#[from] StreamError),

    /// A JSON body could not be produced or read
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ChatError {
    /// Text for the `error`-role transcript message
    pub fn user_message(&self) -> String {
        match self {
            ChatError::Transport(err) => err.user_message(),
            ChatError::Stream(err) => err.user_message(),
            ChatError::Json(_) => "An error occurred. Please try again.".to_string(),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            ChatError::Transport(err) => err.error_code(),
            ChatError::Stream(err) => err.error_code(),
            ChatError::Json(_) => "E_JSON",
        }
    }
}

/// Type alias for Results using ChatError.
pub type ChatResult<T> = Result<T, ChatError>;
