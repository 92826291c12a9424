//! Record decoder: one text record in, one typed event (or failure) out.

use super::events::{DecodeCause, DecodeFailure, StreamEvent};
use super::payloads::RecordPayload;

/// Decode a single record.
///
/// Structural failures come back as `Err(DecodeFailure)` so the caller can
/// log and skip them. An unrecognized `type` is not a failure: it decodes to
/// [`StreamEvent::Unknown`] carrying the raw record.
pub fn decode_record(record: &str) -> Result<StreamEvent, DecodeFailure> {
    let payload: RecordPayload = serde_json::from_str(record)
        .map_err(|e| DecodeFailure::new(record, DecodeCause::InvalidJson(e.to_string())))?;

    let Some(event_type) = payload.event_type else {
        return Err(DecodeFailure::new(record, DecodeCause::MissingType));
    };

    let event = match event_type.as_str() {
        "content" => StreamEvent::Content {
            text: payload.content.unwrap_or_default(),
        },
        "function_call" => StreamEvent::FunctionCall {
            name: payload.function.unwrap_or_default(),
        },
        "function_response" => StreamEvent::FunctionResponse {
            text: payload.content.unwrap_or_default(),
        },
        "error" => StreamEvent::Error {
            text: payload.content.unwrap_or_default(),
        },
        "conversation_id" => match payload.id {
            Some(id) => StreamEvent::ConversationId { id },
            None => return Err(DecodeFailure::new(record, DecodeCause::MissingField("id"))),
        },
        _ => StreamEvent::Unknown {
            event_type,
            raw: record.to_string(),
        },
    };

    Ok(event)
}
