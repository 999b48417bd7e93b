//! MCP (Model Context Protocol) adapter for the Athena connector.
//!
//! Implements the server side of MCP over JSON-RPC 2.0 with
//! newline-delimited JSON messages: `initialize`, `tools/list`, and
//! `tools/call` over a pluggable transport (stdio in production, in-memory
//! channels in tests).
//!
//! # Usage
//!
//! ```no_run
//! use athena_mcp::server::McpServer;
//! use athena_mcp::transport::StdioTransport;
//! use athena_tools::ToolRegistry;
//!
//! # async fn example() {
//! let registry = ToolRegistry::new();
//! let mut server = McpServer::new(registry);
//! let mut transport = StdioTransport::new();
//! server.run(&mut transport).await.unwrap();
//! # }
//! ```

pub mod error;
pub mod server;
pub mod transport;
pub mod types;

pub use error::McpError;
pub use server::McpServer;
pub use transport::{ChannelTransport, McpTransport, StdioTransport};
pub use types::*;
