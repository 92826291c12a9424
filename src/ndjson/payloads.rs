//! Wire-level payload struct for one newline-delimited record.

use serde::{Deserialize, Deserializer};

/// Accepts the conversation id as either a string or an integer
fn deserialize_opt_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Str(String),
        Int(i64),
    }

    Ok(Option::<RawId>::deserialize(deserializer)?.map(|id| match id {
        RawId::Str(s) => s,
        RawId::Int(n) => n.to_string(),
    }))
}

/// Accepts text as a JSON string, or keeps any other JSON value as its
/// serialized form (function responses are sometimes sent as objects)
fn deserialize_opt_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<serde_json::Value>::deserialize(deserializer)? {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

/// `{"type": ..., "content"?: ..., "function"?: ..., "id"?: ...}`
///
/// Payload fields are all optional at this level; the decoder picks the
/// one its discriminant needs and defaults the rest.
#[derive(Debug, Deserialize)]
pub(crate) struct RecordPayload {
    #[serde(rename = "type")]
    pub event_type: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_text")]
    pub content: Option<String>,
    #[serde(default)]
    pub function: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_id")]
    pub id: Option<String>,
}
