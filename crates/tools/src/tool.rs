use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Describes a tool's interface for protocol clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Unique tool name (e.g. "query_athena").
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// JSON Schema describing the expected arguments.
    pub input_schema: Value,
}

/// Result of executing a tool: a single text payload plus an error flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    pub content: String,
    pub is_error: bool,
}

impl ToolResult {
    /// Successful response.
    pub fn ok(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            is_error: false,
        }
    }

    /// Error response. The `Error:` prefix keeps it visually distinct from
    /// success output; callers must not parse it.
    pub fn error(message: impl fmt::Display) -> Self {
        Self {
            content: format!("Error: {message}"),
            is_error: true,
        }
    }
}

/// The extension point all tools implement.
///
/// Tools are object-safe, Send + Sync, and async. Domain failures are
/// returned as error-flagged [`ToolResult`]s; `ToolError` is reserved for
/// caller-side contract violations.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Returns the tool's definition (name, description, JSON Schema).
    fn definition(&self) -> ToolDefinition;

    /// Execute the tool with the given JSON arguments.
    async fn execute(&self, input: Value) -> Result<ToolResult, ToolError>;
}

/// Caller-side contract violations, detected before any remote call.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("Missing required argument '{0}'")]
    MissingArgument(String),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Execution failed: {0}")]
    ExecutionFailed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_definition_roundtrip() {
        let def = ToolDefinition {
            name: "list_databases".to_string(),
            description: "List databases".to_string(),
            input_schema: serde_json::json!({"type": "object", "properties": {}}),
        };
        let json = serde_json::to_string(&def).unwrap();
        let parsed: ToolDefinition = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.name, "list_databases");
    }

    #[test]
    fn error_results_are_prefixed() {
        let result = ToolResult::error("something broke");
        assert!(result.is_error);
        assert_eq!(result.content, "Error: something broke");

        let result = ToolResult::ok("fine");
        assert!(!result.is_error);
        assert_eq!(result.content, "fine");
    }

    #[test]
    fn tool_error_messages() {
        let err = ToolError::MissingArgument("query".to_string());
        assert_eq!(err.to_string(), "Missing required argument 'query'");
    }
}
