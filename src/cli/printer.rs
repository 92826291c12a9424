//! Incremental transcript printing for the interactive CLI.
//!
//! The session emits the whole transcript after every mutation. The printer
//! remembers how much of each message it has already written and only
//! produces the new suffix.

use crate::models::{Message, Role};
use crate::session::{SessionPhase, SessionUpdate};

#[derive(Debug, Default)]
pub struct TranscriptPrinter {
    /// Bytes already written, per transcript index
    written: Vec<usize>,
}

impl TranscriptPrinter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text to write for this transcript snapshot
    pub fn delta(&mut self, transcript: &[Message]) -> String {
        let mut out = String::new();

        for (index, message) in transcript.iter().enumerate() {
            match self.written.get(index).copied() {
                None => {
                    self.written.push(message.content.len());
                    match message.role {
                        // Typed by the user, already on screen
                        Role::User => {}
                        Role::Assistant => {
                            out.push_str("\nassistant> ");
                            out.push_str(&message.content);
                        }
                        Role::Error => {
                            out.push_str("\nerror> ");
                            out.push_str(&message.content);
                        }
                    }
                }
                Some(written) if message.content.len() > written => {
                    out.push_str(message.content.get(written..).unwrap_or_default());
                    self.written[index] = message.content.len();
                }
                Some(_) => {}
            }
        }

        out
    }

    /// Text to write for one session update, if any
    pub fn render(&mut self, update: &SessionUpdate) -> Option<String> {
        match update {
            SessionUpdate::Transcript(transcript) => {
                let text = self.delta(transcript);
                (!text.is_empty()).then_some(text)
            }
            SessionUpdate::Phase(phase) if phase.is_terminal() => Some(match phase {
                SessionPhase::Cancelled => "\n[cancelled]\n\n> ".to_string(),
                _ => "\n\n> ".to_string(),
            }),
            SessionUpdate::SubmitIgnored => {
                Some("\n[still waiting for the previous reply]\n".to_string())
            }
            _ => None,
        }
    }
}
