//! Session controller: drives one request/response exchange at a time.
//!
//! Each submit appends the user message, opens the stream on the endpoint
//! chosen from the conversation identity known at that moment, then pulls
//! chunks through splitter → decoder → reducer until the stream ends, fails,
//! or is cancelled. Cleanup (loading off, pending call cleared, open message
//! closed) runs on every exit path, including the submit future being
//! dropped.

use futures_util::StreamExt;
use tokio::sync::{mpsc, watch};

use super::cancel::{cancelled, CancelHandle};
use super::phase::SessionPhase;
use super::update::{SessionCommand, SessionUpdate, SubmitOutcome};
use crate::adapters::ReqwestHttpClient;
use crate::client::{ChatClient, Endpoint};
use crate::conversation::{ConversationState, ReduceEffect};
use crate::error::{ChatError, StreamError};
use crate::models::{ChatRequest, Message};
use crate::ndjson::{decode_record, split_records, StreamEvent, TailPolicy};
use crate::traits::HttpClient;

/// How an exchange ended without error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExchangeEnd {
    Completed,
    Cancelled,
}

pub struct SessionController<H = ReqwestHttpClient> {
    client: ChatClient<H>,
    tail_policy: TailPolicy,
    state: ConversationState,
    phase: SessionPhase,
    input: String,
    loading: bool,
    thinking: bool,
    updates: Option<mpsc::UnboundedSender<SessionUpdate>>,
    cancel: CancelHandle,
    cancel_rx: watch::Receiver<bool>,
}

impl<H> SessionController<H> {
    pub fn new(client: ChatClient<H>) -> Self {
        let (cancel, cancel_rx) = CancelHandle::new();
        Self {
            client,
            tail_policy: TailPolicy::default(),
            state: ConversationState::new(),
            phase: SessionPhase::Idle,
            input: String::new(),
            loading: false,
            thinking: false,
            updates: None,
            cancel,
            cancel_rx,
        }
    }

    pub fn with_tail_policy(mut self, policy: TailPolicy) -> Self {
        self.tail_policy = policy;
        self
    }

    /// Start receiving [`SessionUpdate`]s. Replaces any earlier subscriber.
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<SessionUpdate> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.updates = Some(tx);
        rx
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn state(&self) -> &ConversationState {
        &self.state
    }

    pub fn transcript(&self) -> &[Message] {
        self.state.transcript()
    }

    pub fn conversation_id(&self) -> Option<&str> {
        self.state.conversation_id()
    }

    pub fn pending_function_call(&self) -> Option<&str> {
        self.state.pending_function_call()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_thinking(&self) -> bool {
        self.thinking
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
    }

    /// Endpoint the next submit would target
    pub fn next_endpoint(&self) -> Endpoint {
        Endpoint::for_conversation(self.state.conversation_id())
    }

    fn emit(&self, update: SessionUpdate) {
        if let Some(tx) = &self.updates {
            let _ = tx.send(update);
        }
    }

    fn emit_transcript(&self) {
        self.emit(SessionUpdate::Transcript(self.state.snapshot()));
    }

    fn set_phase(&mut self, phase: SessionPhase) {
        if self.phase != phase {
            tracing::info!(from = %self.phase, to = %phase, "Session phase");
            self.phase = phase;
            self.emit(SessionUpdate::Phase(phase));
        }
    }

    fn set_loading(&mut self, loading: bool) {
        if self.loading != loading {
            self.loading = loading;
            self.emit(SessionUpdate::Loading(loading));
        }
    }

    fn set_thinking(&mut self, thinking: bool) {
        if self.thinking != thinking {
            self.thinking = thinking;
            self.emit(SessionUpdate::Thinking(thinking));
        }
    }

    /// Terminal cleanup shared by every exit path
    fn settle(&mut self, phase: SessionPhase) -> SubmitOutcome {
        let had_pending = self.state.pending_function_call().is_some();
        self.state.close();
        if had_pending {
            self.emit(SessionUpdate::FunctionCall(None));
        }
        self.set_thinking(false);
        self.set_loading(false);
        self.set_phase(phase);
        SubmitOutcome::Finished(phase)
    }

    fn finish(&mut self, result: Result<ExchangeEnd, ChatError>) -> SubmitOutcome {
        match result {
            Ok(ExchangeEnd::Completed) => {
                tracing::info!("Exchange completed");
                self.settle(SessionPhase::Completed)
            }
            Ok(ExchangeEnd::Cancelled) => {
                tracing::info!("Exchange cancelled");
                self.settle(SessionPhase::Cancelled)
            }
            Err(err) => {
                tracing::error!(code = err.error_code(), error = %err, "Exchange failed");
                self.state.push_error(err.user_message());
                self.emit_transcript();
                self.settle(SessionPhase::Failed)
            }
        }
    }

    /// Cleanup for an exchange whose future was dropped mid-flight
    fn abandon(&mut self) {
        tracing::info!(phase = %self.phase, "Exchange abandoned");
        self.settle(SessionPhase::Cancelled);
    }

    /// Decode one record and fold it into the state
    fn handle_record(&mut self, record: &str) {
        let event = match decode_record(record) {
            Ok(event) => event,
            Err(failure) => {
                tracing::warn!(
                    code = failure.error_code(),
                    cause = %failure.cause,
                    record = %failure.raw_record,
                    "Skipping undecodable record"
                );
                return;
            }
        };

        tracing::debug!(event_type = event.event_type(), "Record decoded");

        if matches!(event, StreamEvent::Content { .. }) {
            self.set_thinking(false);
        }

        let pending_before = self.state.pending_function_call().map(str::to_string);
        let effect = self.state.apply(&event);
        let pending_after = self.state.pending_function_call();
        if pending_before.as_deref() != pending_after {
            self.emit(SessionUpdate::FunctionCall(pending_after.map(str::to_string)));
        }

        match effect {
            ReduceEffect::TranscriptUpdated => self.emit_transcript(),
            ReduceEffect::IdentityAssigned(id) => self.emit(SessionUpdate::ConversationId(id)),
            ReduceEffect::Unchanged => {}
        }
    }
}

/// Runs `abandon` if the exchange is dropped before it finishes
struct ExchangeGuard<'a, H> {
    session: &'a mut SessionController<H>,
    finished: bool,
}

impl<H> Drop for ExchangeGuard<'_, H> {
    fn drop(&mut self) {
        if !self.finished {
            self.session.abandon();
        }
    }
}

impl SessionController<ReqwestHttpClient> {
    /// Reqwest-backed session for the given configuration
    pub fn from_config(config: &crate::config::ClientConfig) -> Result<Self, ChatError> {
        let client = ChatClient::from_config(config)?;
        Ok(Self::new(client).with_tail_policy(config.tail_policy))
    }
}

impl<H: HttpClient> SessionController<H> {
    /// Submit the buffered input.
    ///
    /// Ignored while an exchange is in flight or when the input is blank.
    /// Otherwise runs the whole exchange and returns its terminal phase.
    pub async fn submit(&mut self) -> SubmitOutcome {
        if self.phase.is_busy() {
            tracing::debug!(phase = %self.phase, "Submit ignored while busy");
            self.emit(SessionUpdate::SubmitIgnored);
            return SubmitOutcome::Busy;
        }
        if self.input.trim().is_empty() {
            return SubmitOutcome::EmptyInput;
        }

        let message = std::mem::take(&mut self.input);
        let endpoint = self.next_endpoint();
        self.cancel.reset();

        self.state.push_user(message.clone());
        self.emit_transcript();
        self.set_loading(true);
        self.set_phase(SessionPhase::Sending);

        let mut guard = ExchangeGuard {
            session: self,
            finished: false,
        };
        let result = guard
            .session
            .exchange(&endpoint, &ChatRequest::new(message))
            .await;
        guard.finished = true;
        guard.session.finish(result)
    }

    /// Set the input and submit it
    pub async fn submit_message(&mut self, message: impl Into<String>) -> SubmitOutcome {
        self.set_input(message);
        self.submit().await
    }

    async fn exchange(
        &mut self,
        endpoint: &Endpoint,
        request: &ChatRequest,
    ) -> Result<ExchangeEnd, ChatError> {
        let mut cancel_rx = self.cancel_rx.clone();

        let chunks = tokio::select! {
            biased;
            _ = cancelled(&mut cancel_rx) => return Ok(ExchangeEnd::Cancelled),
            opened = self.client.open_stream(endpoint, request) => opened?,
        };

        self.state.open_assistant();
        self.emit_transcript();
        self.set_phase(SessionPhase::Streaming);
        self.set_thinking(true);

        let records = split_records(chunks, self.tail_policy);
        tokio::pin!(records);

        loop {
            let next = tokio::select! {
                biased;
                _ = cancelled(&mut cancel_rx) => return Ok(ExchangeEnd::Cancelled),
                next = records.next() => next,
            };

            match next {
                Some(Ok(record)) => self.handle_record(&record),
                Some(Err(err)) => return Err(StreamError::from(err).into()),
                None => return Ok(ExchangeEnd::Completed),
            }
        }
    }

    /// Drive the session from a command channel until `Shutdown` or the
    /// channel closes.
    ///
    /// Commands that arrive mid-exchange are handled without waiting for it:
    /// `Cancel` tears it down, `Submit` is ignored.
    pub async fn run(mut self, mut commands: mpsc::UnboundedReceiver<SessionCommand>) -> Self {
        while let Some(command) = commands.recv().await {
            match command {
                SessionCommand::Submit(text) => {
                    let cancel = self.cancel.clone();
                    let updates = self.updates.clone();
                    let mut shutdown = false;
                    self.set_input(text);

                    {
                        let exchange = self.submit();
                        tokio::pin!(exchange);

                        loop {
                            tokio::select! {
                                biased;
                                _ = &mut exchange => break,
                                command = commands.recv() => match command {
                                    Some(SessionCommand::Submit(_)) => {
                                        tracing::debug!("Submit ignored while busy");
                                        if let Some(tx) = &updates {
                                            let _ = tx.send(SessionUpdate::SubmitIgnored);
                                        }
                                    }
                                    Some(SessionCommand::Cancel) => cancel.cancel(),
                                    Some(SessionCommand::Shutdown) | None => {
                                        // Dropping the exchange runs its cleanup
                                        shutdown = true;
                                        break;
                                    }
                                },
                            }
                        }
                    }

                    if shutdown {
                        break;
                    }
                }
                SessionCommand::Cancel => {}
                SessionCommand::Shutdown => break,
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::MockHttpClient;

    fn session(mock: &MockHttpClient) -> SessionController<MockHttpClient> {
        SessionController::new(ChatClient::new(mock.clone(), "http://svc"))
    }

    #[test]
    fn test_new_session_is_idle() {
        let session = session(&MockHttpClient::new());
        assert_eq!(session.phase(), SessionPhase::Idle);
        assert!(session.transcript().is_empty());
        assert!(!session.is_loading());
        assert_eq!(session.next_endpoint(), Endpoint::NewConversation);
    }

    #[tokio::test]
    async fn test_submit_while_busy_is_ignored() {
        let mock = MockHttpClient::new();
        let mut session = session(&mock);
        let mut updates = session.subscribe();
        session.phase = SessionPhase::Streaming;

        let outcome = session.submit_message("second").await;

        assert_eq!(outcome, SubmitOutcome::Busy);
        assert!(session.transcript().is_empty());
        assert!(mock.get_requests().is_empty());
        assert_eq!(updates.try_recv(), Ok(SessionUpdate::SubmitIgnored));
    }

    #[test]
    fn test_settle_clears_pending_call_and_flags() {
        let mut session = session(&MockHttpClient::new());
        let mut updates = session.subscribe();
        session.state.push_user("hi");
        session.state.open_assistant();
        session.handle_record(r#"{"type":"function_call","function":"lookup"}"#);
        session.loading = true;

        let outcome = session.settle(SessionPhase::Completed);

        assert_eq!(outcome, SubmitOutcome::Finished(SessionPhase::Completed));
        assert_eq!(session.pending_function_call(), None);
        assert!(!session.state.has_open_message());
        let seen: Vec<_> = std::iter::from_fn(|| updates.try_recv().ok()).collect();
        assert!(seen.contains(&SessionUpdate::FunctionCall(Some("lookup".to_string()))));
        assert!(seen.contains(&SessionUpdate::FunctionCall(None)));
        assert_eq!(seen.last(), Some(&SessionUpdate::Phase(SessionPhase::Completed)));
    }

    #[test]
    fn test_undecodable_record_leaves_state_alone() {
        let mut session = session(&MockHttpClient::new());
        session.state.open_assistant();
        let before = session.state.clone();

        session.handle_record("{oops");

        assert_eq!(session.state, before);
    }

    #[test]
    fn test_failure_appends_user_message_of_error() {
        let mut session = session(&MockHttpClient::new());
        session.state.push_user("hi");

        let err = ChatError::from(StreamError::ConnectionLost {
            message: "reset".to_string(),
        });
        session.finish(Err(err));

        assert_eq!(session.phase(), SessionPhase::Failed);
        assert_eq!(
            session.transcript().last(),
            Some(&Message::error(
                "Connection to the chat service was lost. Please try again."
            ))
        );
    }
}
