//! Typed stream events and record-level decode failures.

use std::fmt;

/// One decoded record from the chat stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// Text chunk for the open assistant message
    Content { text: String },
    /// The model started a function call
    FunctionCall { name: String },
    /// Raw payload returned by the called function
    FunctionResponse { text: String },
    /// Error reported in-band by the service
    Error { text: String },
    /// Identity of the server-side conversation
    ConversationId { id: String },
    /// Record with a discriminant this client does not know
    Unknown { event_type: String, raw: String },
}

impl StreamEvent {
    /// Wire discriminant this event was decoded from
    pub fn event_type(&self) -> &str {
        match self {
            StreamEvent::Content { .. } => "content",
            StreamEvent::FunctionCall { .. } => "function_call",
            StreamEvent::FunctionResponse { .. } => "function_response",
            StreamEvent::Error { .. } => "error",
            StreamEvent::ConversationId { .. } => "conversation_id",
            StreamEvent::Unknown { event_type, .. } => event_type,
        }
    }
}

/// Why a record could not be decoded
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeCause {
    /// Not a JSON object of the expected shape
    InvalidJson(String),
    /// `type` field absent
    MissingType,
    /// Valid record whose type requires a field that is absent
    MissingField(&'static str),
}

impl fmt::Display for DecodeCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeCause::InvalidJson(msg) => write!(f, "invalid JSON: {}", msg),
            DecodeCause::MissingType => write!(f, "missing 'type' field"),
            DecodeCause::MissingField(name) => write!(f, "missing '{}' field", name),
        }
    }
}

/// A record that failed to decode.
///
/// Never fatal: the pipeline logs it and moves on to the next record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeFailure {
    pub raw_record: String,
    pub cause: DecodeCause,
}

impl DecodeFailure {
    pub fn new(raw_record: impl Into<String>, cause: DecodeCause) -> Self {
        Self {
            raw_record: raw_record.into(),
            cause,
        }
    }

    /// Short error code for logging
    pub fn error_code(&self) -> &'static str {
        match self.cause {
            DecodeCause::InvalidJson(_) => "E_DECODE_JSON",
            DecodeCause::MissingType => "E_DECODE_TYPE",
            DecodeCause::MissingField(_) => "E_DECODE_FIELD",
        }
    }
}

impl fmt::Display for DecodeFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Failed to decode record ({}): {}", self.cause, self.raw_record)
    }
}

impl std::error::Error for DecodeFailure {}
