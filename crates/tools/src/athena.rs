//! Athena tool implementations and their argument contracts.
//!
//! Each tool validates its own arguments before touching the service, and
//! converts every service error into an error-flagged response, so nothing
//! propagates past the tool boundary as a fault.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::warn;

use athena_service::{AthenaConfig, AthenaService};

use crate::registry::{RegistryError, ToolRegistry};
use crate::tool::{Tool, ToolDefinition, ToolError, ToolResult};

/// Fixed response when the service never initialised (no usable credentials).
const NOT_CONFIGURED_MESSAGE: &str =
    "Error: Athena service is not configured. Check AWS credentials.";

fn not_configured() -> ToolResult {
    warn!("Athena service is not available, answering with configuration error");
    ToolResult {
        content: NOT_CONFIGURED_MESSAGE.to_string(),
        is_error: true,
    }
}

/// Register the three Athena tools on a registry.
///
/// `service` is shared by every tool; pass `None` to register them in the
/// degraded mode where each call answers with the configuration-error
/// message.
pub fn register_athena_tools(
    registry: &mut ToolRegistry,
    service: Option<Arc<AthenaService>>,
    config: &AthenaConfig,
) -> Result<(), RegistryError> {
    registry.register(ListDatabasesTool::new(service.clone()))?;
    registry.register(QueryAthenaTool::new(
        service.clone(),
        config.default_database.clone(),
    ))?;
    registry.register(DescribeDataStructureTool::new(
        service,
        config.default_database.clone(),
    ))?;
    Ok(())
}

// ── list_databases ──────────────────────────────────────────────────

/// Lists all databases in the configured data catalog.
pub struct ListDatabasesTool {
    service: Option<Arc<AthenaService>>,
}

impl ListDatabasesTool {
    pub fn new(service: Option<Arc<AthenaService>>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Tool for ListDatabasesTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: "list_databases".to_string(),
            description: "List all available databases in AWS Athena".to_string(),
            input_schema: json!({"type": "object", "properties": {}}),
        }
    }

    async fn execute(&self, _input: Value) -> Result<ToolResult, ToolError> {
        let Some(service) = &self.service else {
            return Ok(not_configured());
        };

        match service.list_databases().await {
            Ok(text) => Ok(ToolResult::ok(text)),
            Err(e) => Ok(ToolResult::error(e)),
        }
    }
}

// ── query_athena ────────────────────────────────────────────────────

/// Executes a SQL query and returns the formatted result table.
pub struct QueryAthenaTool {
    service: Option<Arc<AthenaService>>,
    default_database: String,
}

impl QueryAthenaTool {
    pub fn new(service: Option<Arc<AthenaService>>, default_database: impl Into<String>) -> Self {
        Self {
            service,
            default_database: default_database.into(),
        }
    }
}

#[async_trait]
impl Tool for QueryAthenaTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: "query_athena".to_string(),
            description: "Execute SQL queries on AWS Athena for semi-structured data".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "SQL query to execute"
                    },
                    "database": {
                        "type": "string",
                        "description": "Athena database name",
                        "default": self.default_database
                    }
                },
                "required": ["query"]
            }),
        }
    }

    async fn execute(&self, input: Value) -> Result<ToolResult, ToolError> {
        let Some(service) = &self.service else {
            return Ok(not_configured());
        };

        // Argument contract first: nothing is submitted on a bad call.
        let query = input
            .get("query")
            .and_then(Value::as_str)
            .ok_or_else(|| ToolError::MissingArgument("query".to_string()))?;

        let database = input
            .get("database")
            .and_then(Value::as_str)
            .unwrap_or(&self.default_database);

        match service.execute_query(query, database).await {
            Ok(text) => Ok(ToolResult::ok(text)),
            Err(e) => Ok(ToolResult::error(e)),
        }
    }
}

// ── describe_data_structure ─────────────────────────────────────────

/// Describes a database by listing its tables.
pub struct DescribeDataStructureTool {
    service: Option<Arc<AthenaService>>,
    default_database: String,
}

impl DescribeDataStructureTool {
    pub fn new(service: Option<Arc<AthenaService>>, default_database: impl Into<String>) -> Self {
        Self {
            service,
            default_database: default_database.into(),
        }
    }
}

#[async_trait]
impl Tool for DescribeDataStructureTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: "describe_data_structure".to_string(),
            description: "Get information about available tables and their structure".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "database": {
                        "type": "string",
                        "description": "Database to explore",
                        "default": self.default_database
                    }
                }
            }),
        }
    }

    async fn execute(&self, input: Value) -> Result<ToolResult, ToolError> {
        let Some(service) = &self.service else {
            return Ok(not_configured());
        };

        let database = input
            .get("database")
            .and_then(Value::as_str)
            .unwrap_or(&self.default_database);

        match service.describe_structure(database).await {
            Ok(text) => Ok(ToolResult::ok(text)),
            Err(e) => Ok(ToolResult::error(e)),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests — call-counting stub service, no AWS calls
// ---------------------------------------------------------------------------
