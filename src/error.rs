//! ShareSentry error types

use crate::types::AgentId;
use thiserror::Error;

/// ShareSentry error type
#[derive(Error, Debug)]
pub enum Error {
    /// Agent configuration error (e.g. enabled HTTP agent without a base URL)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Failed agent call: non-2xx response or unusable response body
    #[error("Transport error for agent '{agent}' (status {status}): {message}")]
    Transport {
        agent: AgentId,
        status: u16,
        message: String,
    },

    /// Configuration store problem; recovered locally, never fatal to a scan
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// PII pattern compilation error
    #[error("PII error: {0}")]
    Pii(String),

    /// A scan was requested while another scan is still in flight
    #[error("A scan is already in flight")]
    ScanInFlight,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for ShareSentry operations
pub type Result<T> = std::result::Result<T, Error>;
