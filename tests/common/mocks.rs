//! Mock implementations for test fixtures.
//!
//! Re-exports the mock implementations from `chatstream::adapters::mock`
//! and provides stream-oriented mock configurations.

pub use chatstream::adapters::mock::{MockHttpClient, MockResponse, RecordedRequest};
pub use chatstream::traits::{HttpError, Response};

use bytes::Bytes;

/// Configuration for setting up mock HTTP responses.
pub struct MockHttpConfig {
    client: MockHttpClient,
}

impl MockHttpConfig {
    /// Creates a new mock HTTP configuration.
    pub fn new() -> Self {
        Self {
            client: MockHttpClient::new(),
        }
    }

    /// Configures a streamed body delivered in exactly these chunks.
    pub fn with_stream(self, url: &str, chunks: &[&str]) -> Self {
        self.client
            .set_response(url, MockResponse::Stream(to_chunks(chunks)));
        self
    }

    /// Configures a streamed body that fails after these chunks.
    pub fn with_stream_then_error(self, url: &str, chunks: &[&str], err: HttpError) -> Self {
        self.client
            .set_response(url, MockResponse::StreamThenError(to_chunks(chunks), err));
        self
    }

    /// Configures a streamed body that stalls after these chunks.
    pub fn with_stalled_stream(self, url: &str, chunks: &[&str]) -> Self {
        self.client
            .set_response(url, MockResponse::StreamThenPending(to_chunks(chunks)));
        self
    }

    /// Configures a request that fails before any body is produced.
    pub fn with_error(self, url: &str, err: HttpError) -> Self {
        self.client.set_response(url, MockResponse::Error(err));
        self
    }

    /// Configures a successful JSON response.
    #[allow(dead_code)]
    pub fn with_json_response(self, url: &str, status: u16, json: &str) -> Self {
        self.client.set_response(
            url,
            MockResponse::Success(Response::new(status, Bytes::from(json.to_string()))),
        );
        self
    }

    /// Builds the configured MockHttpClient.
    pub fn build(self) -> MockHttpClient {
        self.client
    }
}

impl Default for MockHttpConfig {
    fn default() -> Self {
        Self::new()
    }
}

pub fn to_chunks(chunks: &[&str]) -> Vec<Bytes> {
    chunks.iter().map(|c| Bytes::from(c.to_string())).collect()
}
