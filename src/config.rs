//! Client configuration.
//!
//! Use the builder pattern to customize, or read from the environment:
//!
//! ```
//! use chatstream::config::{ClientConfig, TailPolicy};
//!
//! let config = ClientConfig::default()
//!     .with_base_url("http://chat.internal:8000/")
//!     .with_tail_policy(TailPolicy::Decode);
//! assert_eq!(config.base_url, "http://chat.internal:8000");
//! ```

use std::time::Duration;

pub use crate::ndjson::TailPolicy;

/// Default service location when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

pub const ENV_BASE_URL: &str = "CHATSTREAM_BASE_URL";
pub const ENV_TIMEOUT_SECS: &str = "CHATSTREAM_TIMEOUT_SECS";
pub const ENV_DECODE_TAIL: &str = "CHATSTREAM_DECODE_UNTERMINATED_TAIL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Service root, without trailing slash
    pub base_url: String,
    /// Transport limit on connecting, response headers and each gap between
    /// stream chunks (none by default). A stream that keeps delivering data
    /// is never cut off.
    pub request_timeout: Option<Duration>,
    /// Handling of an unterminated record at end of stream
    pub tail_policy: TailPolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: None,
            tail_policy: TailPolicy::Discard,
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the service root. A trailing slash is dropped.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    pub fn with_tail_policy(mut self, policy: TailPolicy) -> Self {
        self.tail_policy = policy;
        self
    }

    /// Create config from `CHATSTREAM_*` environment variables.
    ///
    /// Unparseable values are logged and ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var(ENV_BASE_URL) {
            if !url.trim().is_empty() {
                config = config.with_base_url(url.trim());
            }
        }

        if let Ok(raw) = std::env::var(ENV_TIMEOUT_SECS) {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => {
                    config = config.with_request_timeout(Duration::from_secs(secs));
                }
                _ => tracing::warn!(value = %raw, "Ignoring invalid {}", ENV_TIMEOUT_SECS),
            }
        }

        if let Ok(raw) = std::env::var(ENV_DECODE_TAIL) {
            match raw.trim() {
                "1" | "true" | "yes" => config = config.with_tail_policy(TailPolicy::Decode),
                "0" | "false" | "no" | "" => {}
                other => tracing::warn!(value = %other, "Ignoring invalid {}", ENV_DECODE_TAIL),
            }
        }

        config
    }
}
