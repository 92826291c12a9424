//! Newline-delimited JSON stream decoding
//!
//! The chat service streams one JSON object per line:
//! `{"type": "content"|"function_call"|"function_response"|"error"|"conversation_id", ...}`
//!
//! # Module structure
//! - `splitter` - Byte chunks to text records (FrameSplitter, split_records)
//! - `payloads` - Internal wire payload struct
//! - `events` - StreamEvent and DecodeFailure
//! - `decoder` - Record to event (decode_record)

mod decoder;
mod events;
mod payloads;
mod splitter;

pub use decoder::decode_record;
pub use events::{DecodeCause, DecodeFailure, StreamEvent};
pub use splitter::{split_records, FrameSplitter, TailPolicy};
