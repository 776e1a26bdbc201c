//! WebSocket connection to the trading agent service.
//!
//! Provides:
//! - [`Connection`] handle for queueing outbound commands
//! - [`ConnectionEvent`] stream of inbound frames and lifecycle changes
//! - [`decode_payload`] for extracting the reply text from an inbound frame

mod client;
mod payload;

pub use client::{spawn, Connection, ConnectionEvent};
pub use payload::decode_payload;

/// Endpoint used when none is given on the command line.
pub const DEFAULT_ENDPOINT: &str = "ws://localhost:8000/ws";

/// Connection errors.
#[derive(Debug, thiserror::Error)]
pub enum ConnectionError {
    #[error("Connection closed")]
    Closed,
    #[error("Inbound payload is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("Inbound payload has no `message` field")]
    MissingMessage,
}
