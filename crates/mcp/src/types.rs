//! JSON-RPC 2.0 and MCP wire types.
//!
//! The server-side subset of the Model Context Protocol: request/response
//! envelopes plus the payloads for `initialize`, `tools/list`, and
//! `tools/call`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use athena_tools::ToolDefinition;

/// The MCP protocol version this crate implements.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

// ── JSON-RPC 2.0 envelopes ──────────────────────────────────────────

/// A JSON-RPC 2.0 request message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub id: RpcId,
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

impl JsonRpcRequest {
    pub fn new(id: RpcId, method: impl Into<String>, params: Option<Value>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            method: method.into(),
            params,
        }
    }
}

/// A JSON-RPC 2.0 response message, success or error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    pub id: RpcId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    pub fn success(id: RpcId, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn error(id: RpcId, code: i64, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
                data: None,
            }),
        }
    }
}

/// A JSON-RPC 2.0 error object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i64,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// Request id: number or string per the JSON-RPC spec.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum RpcId {
    Number(i64),
    String(String),
}

/// Standard JSON-RPC 2.0 error codes.
pub mod error_codes {
    pub const PARSE_ERROR: i64 = -32700;
    pub const INVALID_REQUEST: i64 = -32600;
    pub const METHOD_NOT_FOUND: i64 = -32601;
    pub const INVALID_PARAMS: i64 = -32602;
    pub const INTERNAL_ERROR: i64 = -32603;
}

// ── initialize ──────────────────────────────────────────────────────

/// Result returned from the `initialize` method.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeResult {
    pub protocol_version: String,
    pub capabilities: ServerCapabilities,
    pub server_info: ServerInfo,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerCapabilities {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<ToolsCapability>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolsCapability {
    #[serde(default)]
    pub list_changed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerInfo {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

// ── tools/list ──────────────────────────────────────────────────────

/// Result of `tools/list`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListToolsResult {
    pub tools: Vec<ToolInfo>,
}

/// One tool in MCP wire format.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolInfo {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}

impl From<ToolDefinition> for ToolInfo {
    fn from(def: ToolDefinition) -> Self {
        Self {
            name: def.name,
            description: def.description,
            input_schema: def.input_schema,
        }
    }
}

// ── tools/call ──────────────────────────────────────────────────────

/// Parameters for `tools/call`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallToolParams {
    pub name: String,
    #[serde(default)]
    pub arguments: Value,
}

/// Result of `tools/call`: one or more content blocks plus an error flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallToolResult {
    pub content: Vec<ToolContent>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_error: bool,
}

/// Content block within a tool call result.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ToolContent {
    Text { text: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_roundtrip() {
        let req = JsonRpcRequest::new(
            RpcId::Number(1),
            "tools/call",
            Some(serde_json::json!({"name": "list_databases", "arguments": {}})),
        );
        let json = serde_json::to_string(&req).unwrap();
        let parsed: JsonRpcRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.jsonrpc, "2.0");
        assert_eq!(parsed.method, "tools/call");
        assert_eq!(parsed.id, RpcId::Number(1));
    }

    #[test]
    fn response_success_and_error_are_exclusive() {
        let ok = JsonRpcResponse::success(RpcId::Number(1), serde_json::json!({"ok": true}));
        assert!(ok.result.is_some());
        assert!(ok.error.is_none());

        let err = JsonRpcResponse::error(
            RpcId::String("r1".into()),
            error_codes::METHOD_NOT_FOUND,
            "Method not found: ping",
        );
        assert!(err.result.is_none());
        assert_eq!(err.error.unwrap().code, error_codes::METHOD_NOT_FOUND);
    }

    #[test]
    fn rpc_id_accepts_numbers_and_strings() {
        let id: RpcId = serde_json::from_str("42").unwrap();
        assert_eq!(id, RpcId::Number(42));

        let id: RpcId = serde_json::from_str("\"req-7\"").unwrap();
        assert_eq!(id, RpcId::String("req-7".into()));
    }

    #[test]
    fn tool_info_from_definition() {
        let def = ToolDefinition {
            name: "query_athena".to_string(),
            description: "Run SQL".to_string(),
            input_schema: serde_json::json!({"type": "object"}),
        };
        let info: ToolInfo = def.into();
        assert_eq!(info.name, "query_athena");

        // Wire format uses camelCase for the schema key.
        let json = serde_json::to_string(&info).unwrap();
        assert!(json.contains("inputSchema"));
    }

    #[test]
    fn is_error_flag_omitted_when_false() {
        let ok = CallToolResult {
            content: vec![ToolContent::Text {
                text: "fine".into(),
            }],
            is_error: false,
        };
        let json = serde_json::to_string(&ok).unwrap();
        assert!(!json.contains("isError"));

        let err = CallToolResult {
            content: vec![ToolContent::Text {
                text: "broken".into(),
            }],
            is_error: true,
        };
        let json = serde_json::to_string(&err).unwrap();
        assert!(json.contains("isError"));
    }

    #[test]
    fn call_params_default_arguments_to_null() {
        let params: CallToolParams =
            serde_json::from_str(r#"{"name": "list_databases"}"#).unwrap();
        assert_eq!(params.name, "list_databases");
        assert!(params.arguments.is_null());
    }
}
