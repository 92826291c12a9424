//! Common test utilities for integration tests.
//!
//! # Example
//!
//! ```ignore
//! let mock = MockHttpConfig::new()
//!     .with_stream(NEW_CHAT_URL, &[content_line("Hi").as_str()])
//!     .build();
//! let session = test_session(&mock);
//! ```

#![allow(dead_code)]

pub mod mocks;

pub use mocks::*;

use chatstream::client::ChatClient;
use chatstream::session::{SessionController, SessionUpdate};
use tokio::sync::mpsc;

pub const BASE_URL: &str = "http://chat.test";
pub const NEW_CHAT_URL: &str = "http://chat.test/api/chat";

/// URL of the continue-conversation endpoint for `id`
pub fn conversation_url(id: &str) -> String {
    format!("{}/api/chat/{}", BASE_URL, id)
}

/// Session over the given mock, rooted at [`BASE_URL`]
pub fn test_session(mock: &MockHttpClient) -> SessionController<MockHttpClient> {
    SessionController::new(ChatClient::new(mock.clone(), BASE_URL))
}

pub fn content_line(text: &str) -> String {
    format!("{}\n", serde_json::json!({"type": "content", "content": text}))
}

pub fn function_call_line(name: &str) -> String {
    format!("{}\n", serde_json::json!({"type": "function_call", "function": name}))
}

pub fn function_response_line(payload: &str) -> String {
    format!(
        "{}\n",
        serde_json::json!({"type": "function_response", "content": payload})
    )
}

pub fn error_line(text: &str) -> String {
    format!("{}\n", serde_json::json!({"type": "error", "content": text}))
}

pub fn conversation_id_line(id: &str) -> String {
    format!("{}\n", serde_json::json!({"type": "conversation_id", "id": id}))
}

/// Everything currently queued on an update receiver
pub fn drain(rx: &mut mpsc::UnboundedReceiver<SessionUpdate>) -> Vec<SessionUpdate> {
    let mut updates = Vec::new();
    while let Ok(update) = rx.try_recv() {
        updates.push(update);
    }
    updates
}
