//! Tool layer for the Athena connector.
//!
//! Defines the [`Tool`] trait and [`ToolRegistry`], plus the three Athena
//! tools with their argument contracts. The registry is the static tool
//! catalog the MCP server exposes: built once at startup, read-only after.

pub mod athena;
pub mod registry;
pub mod tool;

pub use athena::{
    register_athena_tools, DescribeDataStructureTool, ListDatabasesTool, QueryAthenaTool,
};
pub use registry::{RegistryError, ToolRegistry};
pub use tool::{Tool, ToolDefinition, ToolError, ToolResult};
