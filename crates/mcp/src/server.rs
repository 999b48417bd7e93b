//! MCP server loop.
//!
//! Bridges the tool registry to MCP clients over a line-oriented JSON-RPC
//! transport. Every handler failure is converted into a response, so one bad
//! tool call never ends the session or the process.

use serde::Serialize;
use serde_json::Value;

use athena_tools::ToolRegistry;

use crate::error::McpError;
use crate::transport::McpTransport;
use crate::types::*;

/// MCP server serving a fixed tool registry.
pub struct McpServer {
    registry: ToolRegistry,
    server_name: String,
    server_version: String,
}

impl McpServer {
    /// Create a server wrapping the given tool registry.
    pub fn new(registry: ToolRegistry) -> Self {
        Self {
            registry,
            server_name: "athena-connector".to_string(),
            server_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Override the advertised server name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.server_name = name.into();
        self
    }

    /// Serve requests until the transport closes.
    pub async fn run<T: McpTransport>(&mut self, transport: &mut T) -> Result<(), McpError> {
        tracing::info!(server = %self.server_name, "MCP server starting");

        while let Some(line) = transport.receive().await? {
            tracing::debug!(message = %line, "received message");

            let raw: Value = match serde_json::from_str(&line) {
                Ok(v) => v,
                Err(e) => {
                    tracing::warn!(error = %e, "failed to parse JSON");
                    let resp = JsonRpcResponse::error(
                        RpcId::Number(0),
                        error_codes::PARSE_ERROR,
                        format!("JSON parse error: {e}"),
                    );
                    transport.send(&serde_json::to_string(&resp)?).await?;
                    continue;
                }
            };

            // Messages without an id are notifications; nothing to answer.
            if raw.get("id").is_none() {
                if let Some(method) = raw.get("method").and_then(Value::as_str) {
                    self.handle_notification(method);
                }
                continue;
            }

            let request: JsonRpcRequest = match serde_json::from_value(raw) {
                Ok(req) => req,
                Err(e) => {
                    tracing::warn!(error = %e, "malformed JSON-RPC request");
                    let resp = JsonRpcResponse::error(
                        RpcId::Number(0),
                        error_codes::INVALID_REQUEST,
                        format!("Invalid request: {e}"),
                    );
                    transport.send(&serde_json::to_string(&resp)?).await?;
                    continue;
                }
            };

            let response = self.handle_request(&request).await;
            let json = serde_json::to_string(&response)?;
            tracing::debug!(response = %json, "sending response");
            transport.send(&json).await?;
        }

        tracing::info!("transport closed, shutting down");
        Ok(())
    }

    /// Handle a single request and produce its response.
    pub async fn handle_request(&mut self, request: &JsonRpcRequest) -> JsonRpcResponse {
        let id = request.id.clone();

        match request.method.as_str() {
            "initialize" => self.handle_initialize(id),
            "tools/list" => self.handle_list_tools(id),
            "tools/call" => self.handle_call_tool(id, &request.params).await,
            method => {
                tracing::warn!(method = %method, "unknown method");
                JsonRpcResponse::error(
                    id,
                    error_codes::METHOD_NOT_FOUND,
                    format!("Method not found: {method}"),
                )
            }
        }
    }

    fn handle_notification(&mut self, method: &str) {
        match method {
            "notifications/initialized" => {
                tracing::info!("client confirmed initialization");
            }
            other => {
                tracing::debug!(method = %other, "ignoring notification");
            }
        }
    }

    fn handle_initialize(&mut self, id: RpcId) -> JsonRpcResponse {
        tracing::info!("handling initialize");

        respond_with(
            id,
            InitializeResult {
                protocol_version: PROTOCOL_VERSION.to_string(),
                capabilities: ServerCapabilities {
                    tools: Some(ToolsCapability {
                        list_changed: false,
                    }),
                },
                server_info: ServerInfo {
                    name: self.server_name.clone(),
                    version: Some(self.server_version.clone()),
                },
            },
        )
    }

    fn handle_list_tools(&self, id: RpcId) -> JsonRpcResponse {
        tracing::debug!("handling tools/list");

        let tools: Vec<ToolInfo> = self
            .registry
            .definitions()
            .into_iter()
            .map(ToolInfo::from)
            .collect();

        respond_with(id, ListToolsResult { tools })
    }

    async fn handle_call_tool(&self, id: RpcId, params: &Option<Value>) -> JsonRpcResponse {
        let params: CallToolParams = match params.as_ref().map(|p| serde_json::from_value(p.clone()))
        {
            Some(Ok(p)) => p,
            Some(Err(e)) => {
                return JsonRpcResponse::error(
                    id,
                    error_codes::INVALID_PARAMS,
                    format!("Invalid params: {e}"),
                );
            }
            None => {
                return JsonRpcResponse::error(
                    id,
                    error_codes::INVALID_PARAMS,
                    "Invalid params: missing params",
                );
            }
        };

        tracing::debug!(tool = %params.name, "handling tools/call");

        let Some(tool) = self.registry.get(&params.name) else {
            tracing::warn!(tool = %params.name, "tool not found");
            return JsonRpcResponse::error(
                id,
                error_codes::INVALID_PARAMS,
                format!("Tool '{}' not found", params.name),
            );
        };

        let result = match tool.execute(params.arguments).await {
            Ok(outcome) => CallToolResult {
                content: vec![ToolContent::Text {
                    text: outcome.content,
                }],
                is_error: outcome.is_error,
            },
            // Argument-contract violations surface as error-flagged results;
            // the session keeps serving subsequent calls.
            Err(e) => CallToolResult {
                content: vec![ToolContent::Text {
                    text: format!("Error: {e}"),
                }],
                is_error: true,
            },
        };

        respond_with(id, result)
    }
}

fn respond_with<T: Serialize>(id: RpcId, result: T) -> JsonRpcResponse {
    match serde_json::to_value(result) {
        Ok(val) => JsonRpcResponse::success(id, val),
        Err(e) => JsonRpcResponse::error(
            id,
            error_codes::INTERNAL_ERROR,
            format!("JSON serialize error: {e}"),
        ),
    }
}
