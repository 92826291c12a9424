/// Lifecycle of one request/response exchange.
///
/// `Idle → Sending → Streaming → {Completed, Failed, Cancelled}`; `Sending`
/// may also go straight to `Failed` or `Cancelled`. Terminal phases accept
/// the next submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    #[default]
    Idle,
    /// Request sent, response stream not yet open
    Sending,
    /// Response stream open, records being folded in
    Streaming,
    Completed,
    Failed,
    Cancelled,
}

impl SessionPhase {
    /// An exchange is in flight; new submits are ignored
    pub fn is_busy(&self) -> bool {
        matches!(self, SessionPhase::Sending | SessionPhase::Streaming)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SessionPhase::Completed | SessionPhase::Failed | SessionPhase::Cancelled
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SessionPhase::Idle => "idle",
            SessionPhase::Sending => "sending",
            SessionPhase::Streaming => "streaming",
            SessionPhase::Completed => "completed",
            SessionPhase::Failed => "failed",
            SessionPhase::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
