//! Error types for the MCP adapter.
//!
//! Only failures of the channel itself live here; protocol-level problems
//! (bad JSON from the peer, unknown methods, missing tools) are answered
//! in-band as JSON-RPC error responses and never abort the server loop.

/// Errors that end or interrupt the server loop.
#[derive(Debug, thiserror::Error)]
pub enum McpError {
    /// Failed to serialize an outgoing message.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Transport I/O failure.
    #[error("Transport error: {0}")]
    Transport(#[from] std::io::Error),
}
