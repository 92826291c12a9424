//! Error handling for the chat client.
//!
//! Two levels, handled differently:
//!
//! | Level | Types | Handling |
//! |-------|-------|----------|
//! | Record | [`crate::ndjson::DecodeFailure`], truncated tails | Logged, stream continues |
//! | Session | [`TransportError`], [`StreamError`] | One `error` message in the transcript, exchange ends |
//!
//! [`ChatError`] unifies the session-level errors; [`ChatResult`] is the
//! matching `Result` alias.

mod chat_error;
mod stream;
mod transport;

pub use chat_error::{ChatError, ChatResult};
pub use stream::StreamError;
pub use transport::TransportError;
