//! Messages between the session and the presentation layer.

use super::phase::SessionPhase;
use crate::models::Message;

/// Emitted by the session as its state changes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionUpdate {
    /// Phase transition
    Phase(SessionPhase),
    /// Full ordered transcript after a mutation
    Transcript(Vec<Message>),
    /// Loading indicator (true from submit until the exchange ends)
    Loading(bool),
    /// "AI is thinking" indicator (stream open, no content yet)
    Thinking(bool),
    /// Name of the function currently being called, if any
    FunctionCall(Option<String>),
    /// Conversation identity learned from the stream
    ConversationId(String),
    /// A submit arrived while an exchange was in flight
    SubmitIgnored,
}

/// Sent to a running session (see [`super::SessionController::run`])
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    /// Submit user input
    Submit(String),
    /// Tear down the in-flight exchange, if any
    Cancel,
    /// Stop the session loop
    Shutdown,
}

/// Result of one submit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Input was empty or whitespace-only; nothing happened
    EmptyInput,
    /// An exchange was already in flight; nothing happened
    Busy,
    /// The exchange ran and ended in this terminal phase
    Finished(SessionPhase),
}
