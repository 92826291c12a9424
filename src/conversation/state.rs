//! Conversation state owned by one session.

use crate::models::{Message, Role};

/// Transcript plus side-channel state, mutated only by the reducer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationState {
    transcript: Vec<Message>,
    conversation_id: Option<String>,
    pending_function_call: Option<String>,
    /// Index of the assistant message currently being streamed into
    open: Option<usize>,
}

impl ConversationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    /// Owned copy of the transcript for the presentation layer
    pub fn snapshot(&self) -> Vec<Message> {
        self.transcript.clone()
    }

    pub fn conversation_id(&self) -> Option<&str> {
        self.conversation_id.as_deref()
    }

    pub fn pending_function_call(&self) -> Option<&str> {
        self.pending_function_call.as_deref()
    }

    pub fn open_message(&self) -> Option<&Message> {
        self.open.and_then(|idx| self.transcript.get(idx))
    }

    pub fn has_open_message(&self) -> bool {
        self.open.is_some()
    }

    /// Append a user message. Closes any open assistant message.
    pub fn push_user(&mut self, content: impl Into<String>) {
        self.open = None;
        self.transcript.push(Message::user(content));
    }

    /// Append an empty assistant message and make it the open one.
    pub fn open_assistant(&mut self) {
        self.transcript.push(Message::assistant());
        self.open = Some(self.transcript.len() - 1);
    }

    /// Append a session-level error message, distinct from assistant output.
    pub fn push_error(&mut self, content: impl Into<String>) {
        self.open = None;
        self.transcript.push(Message::error(content));
    }

    /// End the current exchange: nothing is open and no call is pending.
    pub fn close(&mut self) {
        self.open = None;
        self.pending_function_call = None;
    }

    /// Mutable access to the open message, opening one if needed
    pub(super) fn open_message_mut(&mut self) -> &mut Message {
        let idx = match self.open {
            Some(idx) => idx,
            None => {
                self.open_assistant();
                self.transcript.len() - 1
            }
        };
        &mut self.transcript[idx]
    }

    pub(super) fn set_pending_function_call(&mut self, name: Option<String>) {
        self.pending_function_call = name;
    }

    /// First write wins. Returns whether the id was stored.
    pub(super) fn assign_conversation_id(&mut self, id: &str) -> bool {
        if self.conversation_id.is_some() {
            return false;
        }
        self.conversation_id = Some(id.to_string());
        true
    }

    /// Count of messages with the given role
    pub fn count_role(&self, role: Role) -> usize {
        self.transcript.iter().filter(|m| m.role == role).count()
    }
}
