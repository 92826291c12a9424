//! Conversation state and the reducer that folds stream events into it.

mod reducer;
mod state;

pub use reducer::{
    error_annotation, function_call_annotation, function_response_annotation, reduce,
    ReduceEffect,
};
pub use state::ConversationState;
