//! Chatstream - streaming client core for a newline-delimited JSON chat service
//!
//! The pipeline is `ndjson` (bytes → records → events), `conversation`
//! (events → transcript) and `session` (one exchange at a time over a
//! [`client::ChatClient`]). This library exposes modules for use in
//! integration tests and the `chatstream` binary.

pub mod adapters;
pub mod cli;
pub mod client;
pub mod config;
pub mod conversation;
pub mod error;
pub mod health_check;
pub mod models;
pub mod ndjson;
pub mod session;
pub mod traits;
