//! Chat service client.
//!
//! Thin layer over [`HttpClient`] that knows the service's routes:
//! `POST /api/chat` starts a conversation, `POST /api/chat/{id}` continues
//! one, `GET /health` and `GET /` describe the service.

use crate::adapters::ReqwestHttpClient;
use crate::config::ClientConfig;
use crate::error::{ChatError, ChatResult, TransportError};
use crate::models::{ChatRequest, ServiceInfo};
use crate::traits::{ByteStream, Headers, HttpClient};

/// Target of one outgoing chat request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    NewConversation,
    Conversation(String),
}

impl Endpoint {
    /// Route for the identity known at submit time
    pub fn for_conversation(conversation_id: Option<&str>) -> Self {
        match conversation_id {
            Some(id) => Endpoint::Conversation(id.to_string()),
            None => Endpoint::NewConversation,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Endpoint::NewConversation => "/api/chat".to_string(),
            Endpoint::Conversation(id) => format!("/api/chat/{}", urlencoding::encode(id)),
        }
    }
}

/// Client for the chat service API.
pub struct ChatClient<H = ReqwestHttpClient> {
    /// Base URL for the service
    pub base_url: String,
    http: H,
}

impl ChatClient<ReqwestHttpClient> {
    /// Create a reqwest-backed client from configuration.
    pub fn from_config(config: &ClientConfig) -> Result<Self, TransportError> {
        let http = ReqwestHttpClient::from_config(config)
            .map_err(|e| TransportError::from_http(e, &config.base_url))?;
        Ok(Self::new(http, &config.base_url))
    }
}

impl<H: HttpClient> ChatClient<H> {
    pub fn new(http: H, base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        }
    }

    pub fn http(&self) -> &H {
        &self.http
    }

    pub fn url_for(&self, endpoint: &Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path())
    }

    fn stream_headers() -> Headers {
        let mut headers = Headers::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers.insert("Accept".to_string(), "text/event-stream".to_string());
        headers
    }

    /// Send `request` to `endpoint` and return the response body as chunks.
    ///
    /// Fails before producing any chunk on connection errors and non-2xx
    /// statuses.
    pub async fn open_stream(
        &self,
        endpoint: &Endpoint,
        request: &ChatRequest,
    ) -> Result<ByteStream, TransportError> {
        let url = self.url_for(endpoint);
        let body = serde_json::to_string(request).map_err(|e| TransportError::Serialize {
            message: e.to_string(),
        })?;

        tracing::debug!(url = %url, "Opening chat stream");

        self.http
            .post_stream(&url, &body, &Self::stream_headers())
            .await
            .map_err(|e| TransportError::from_http(e, &url))
    }

    /// Check if the service is healthy and reachable.
    ///
    /// `Ok(true)` on a 2xx from `/health`; `Ok(false)` on any other status.
    pub async fn health_check(&self) -> Result<bool, TransportError> {
        let url = format!("{}/health", self.base_url);
        let response = self
            .http
            .get(&url, &Headers::new())
            .await
            .map_err(|e| TransportError::from_http(e, &url))?;
        Ok(response.is_success())
    }

    /// Fetch the service's welcome message from `/`.
    pub async fn service_info(&self) -> ChatResult<ServiceInfo> {
        let url = format!("{}/", self.base_url);
        let response = self
            .http
            .get(&url, &Headers::new())
            .await
            .map_err(|e| TransportError::from_http(e, &url))?;

        if !response.is_success() {
            return Err(ChatError::Transport(TransportError::HttpStatus {
                status: response.status,
                message: response.text().unwrap_or_default(),
            }));
        }

        Ok(response.json()?)
    }
}
