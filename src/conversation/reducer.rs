//! Conversation reducer: folds stream events into the conversation state.

use super::state::ConversationState;
use crate::ndjson::StreamEvent;

/// Observable result of applying one event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReduceEffect {
    /// The open message's text changed; a transcript snapshot is due
    TranscriptUpdated,
    /// The conversation identity was set for the first time
    IdentityAssigned(String),
    /// Nothing changed
    Unchanged,
}

impl ReduceEffect {
    pub fn mutates_transcript(&self) -> bool {
        matches!(self, ReduceEffect::TranscriptUpdated)
    }
}

pub fn function_call_annotation(name: &str) -> String {
    format!("\n\n*Calling function: {}*\n\n", name)
}

pub fn function_response_annotation(payload: &str) -> String {
    format!("\n\n*Function response:*\n```json\n{}\n```\n\n", payload)
}

pub fn error_annotation(text: &str) -> String {
    format!("\n\n*Error:*\n{}\n\n", text)
}

impl ConversationState {
    /// Apply one event in place.
    pub fn apply(&mut self, event: &StreamEvent) -> ReduceEffect {
        match event {
            StreamEvent::Content { text } => {
                self.open_message_mut().append_token(text);
                ReduceEffect::TranscriptUpdated
            }
            StreamEvent::FunctionCall { name } => {
                self.set_pending_function_call(Some(name.clone()));
                self.open_message_mut()
                    .append_token(&function_call_annotation(name));
                ReduceEffect::TranscriptUpdated
            }
            StreamEvent::FunctionResponse { text } => {
                self.open_message_mut()
                    .append_token(&function_response_annotation(text));
                self.set_pending_function_call(None);
                ReduceEffect::TranscriptUpdated
            }
            StreamEvent::Error { text } => {
                self.open_message_mut().append_token(&error_annotation(text));
                self.set_pending_function_call(None);
                ReduceEffect::TranscriptUpdated
            }
            StreamEvent::ConversationId { id } => {
                if self.assign_conversation_id(id) {
                    tracing::info!(conversation_id = %id, "Conversation id assigned");
                    ReduceEffect::IdentityAssigned(id.clone())
                } else {
                    if self.conversation_id() != Some(id.as_str()) {
                        tracing::debug!(
                            ignored = %id,
                            "Conversation id already set, keeping the first one"
                        );
                    }
                    ReduceEffect::Unchanged
                }
            }
            StreamEvent::Unknown { event_type, raw } => {
                tracing::warn!(event_type = %event_type, raw = %raw, "Ignoring unknown record type");
                ReduceEffect::Unchanged
            }
        }
    }
}

/// Pure fold step: `(state, event) -> (state', effect)`.
pub fn reduce(mut state: ConversationState, event: &StreamEvent) -> (ConversationState, ReduceEffect) {
    let effect = state.apply(event);
    (state, effect)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    fn streaming_state() -> ConversationState {
        let mut state = ConversationState::new();
        state.push_user("hi");
        state.open_assistant();
        state
    }

    fn content(text: &str) -> StreamEvent {
        StreamEvent::Content { text: text.to_string() }
    }

    #[test]
    fn test_content_appends_to_open_message() {
        let mut state = streaming_state();
        assert_eq!(state.apply(&content("Hi")), ReduceEffect::TranscriptUpdated);
        assert_eq!(state.apply(&content(" there")), ReduceEffect::TranscriptUpdated);
        assert_eq!(state.open_message().unwrap().content, "Hi there");
        assert_eq!(state.transcript().len(), 2);
    }

    #[test]
    fn test_function_call_then_response() {
        let mut state = streaming_state();
        state.apply(&StreamEvent::FunctionCall { name: "lookup".to_string() });
        assert_eq!(state.pending_function_call(), Some("lookup"));

        state.apply(&StreamEvent::FunctionResponse { text: "{}".to_string() });
        assert!(state.pending_function_call().is_none());

        let text = &state.open_message().unwrap().content;
        let call_at = text.find("*Calling function: lookup*").unwrap();
        let response_at = text.find("*Function response:*\n```json\n{}\n```").unwrap();
        assert!(call_at < response_at);
    }

    #[test]
    fn test_error_annotation_clears_pending_call() {
        let mut state = streaming_state();
        state.apply(&StreamEvent::FunctionCall { name: "search".to_string() });
        state.apply(&StreamEvent::Error { text: "quota exceeded".to_string() });
        assert!(state.pending_function_call().is_none());
        assert_eq!(
            state.open_message().unwrap().content,
            format!("{}{}", function_call_annotation("search"), error_annotation("quota exceeded"))
        );
        // In-band errors stay inside the assistant message
        assert_eq!(state.count_role(Role::Error), 0);
    }

    #[test]
    fn test_conversation_id_first_write_wins() {
        let mut state = streaming_state();
        assert_eq!(
            state.apply(&StreamEvent::ConversationId { id: "c1".to_string() }),
            ReduceEffect::IdentityAssigned("c1".to_string())
        );
        assert_eq!(
            state.apply(&StreamEvent::ConversationId { id: "c2".to_string() }),
            ReduceEffect::Unchanged
        );
        assert_eq!(state.conversation_id(), Some("c1"));
    }

    #[test]
    fn test_conversation_id_does_not_touch_transcript() {
        let mut state = streaming_state();
        let before = state.snapshot();
        state.apply(&StreamEvent::ConversationId { id: "c1".to_string() });
        assert_eq!(state.snapshot(), before);
    }

    #[test]
    fn test_unknown_event_is_ignored() {
        let mut state = streaming_state();
        let before = state.clone();
        let effect = state.apply(&StreamEvent::Unknown {
            event_type: "usage".to_string(),
            raw: r#"{"type":"usage"}"#.to_string(),
        });
        assert_eq!(effect, ReduceEffect::Unchanged);
        assert_eq!(state, before);
    }

    #[test]
    fn test_content_without_open_message_opens_one() {
        let mut state = ConversationState::new();
        state.apply(&content("orphan"));
        assert_eq!(state.transcript().len(), 1);
        assert_eq!(state.transcript()[0].role, Role::Assistant);
    }

    #[test]
    fn test_function_response_without_pending_call_still_annotates() {
        let mut state = streaming_state();
        state.apply(&StreamEvent::FunctionResponse { text: "42".to_string() });
        assert_eq!(state.open_message().unwrap().content, function_response_annotation("42"));
    }

    #[test]
    fn test_reduce_is_a_fold() {
        let events = vec![
            content("a"),
            StreamEvent::ConversationId { id: "c".to_string() },
            content("b"),
        ];
        let (state, effects) = events.iter().fold(
            (streaming_state(), Vec::new()),
            |(state, mut effects), event| {
                let (state, effect) = reduce(state, event);
                effects.push(effect);
                (state, effects)
            },
        );
        assert_eq!(state.open_message().unwrap().content, "ab");
        assert_eq!(effects.iter().filter(|e| e.mutates_transcript()).count(), 2);
    }

    #[test]
    fn test_pending_call_lifetime_is_bounded() {
        let mut state = streaming_state();
        let events = [
            content("x"),
            StreamEvent::FunctionCall { name: "f".to_string() },
            content("y"),
            StreamEvent::FunctionResponse { text: "r".to_string() },
            content("z"),
        ];
        let pending: Vec<bool> = events
            .iter()
            .map(|e| {
                state.apply(e);
                state.pending_function_call().is_some()
            })
            .collect();
        assert_eq!(pending, vec![false, true, true, false, false]);
    }
}
