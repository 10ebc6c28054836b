//! MCP protocol server — exposes the documentation tools via JSON-RPC.

use crate::registry::{ToolContext, ToolDescriptor, ToolRegistry};
use crate::tools::ToolOutput;
use crate::McpError;
use qd_search::SearchOptions;
use qd_store::ContentStore;
use serde::{Deserialize, Deserializer, Serialize};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

pub const PROTOCOL_VERSION: &str = "2024-11-05";

pub const PARSE_ERROR: i64 = -32700;
pub const INVALID_REQUEST: i64 = -32600;
pub const METHOD_NOT_FOUND: i64 = -32601;
pub const INVALID_PARAMS: i64 = -32602;

/// MCP Server over a shared, read-only content store.
pub struct McpServer {
    store: Arc<ContentStore>,
    registry: ToolRegistry,
    search: SearchOptions,
    name: String,
    version: String,
}

impl McpServer {
    pub fn new(store: Arc<ContentStore>) -> Self {
        Self::with_options(store, SearchOptions::default())
    }

    /// Server whose `search_docs` tool uses the given default limit and window.
    pub fn with_options(store: Arc<ContentStore>, search: SearchOptions) -> Self {
        Self {
            store,
            registry: ToolRegistry::builtin(search.limit),
            search,
            name: "quivly-docs".into(),
            version: env!("CARGO_PKG_VERSION").into(),
        }
    }

    /// Override the name and version reported by `initialize`.
    pub fn with_server_info(mut self, name: &str, version: &str) -> Self {
        self.name = name.into();
        self.version = version.into();
        self
    }

    /// Add a tool, or replace the one with the same name.
    pub fn with_tool(mut self, tool: ToolDescriptor) -> Self {
        self.registry.register(tool);
        self
    }

    /// Handle an incoming JSON-RPC message. Notifications get no response.
    pub fn handle_request(&self, request: &McpRequest) -> Option<McpResponse> {
        let id = request.id.clone().unwrap_or(serde_json::Value::Null);

        if request.is_notification() {
            tracing::debug!("notification: {}", request.method);
            return None;
        }

        if id.is_null() {
            return Some(McpResponse::error(
                id,
                INVALID_REQUEST,
                "Invalid request: id must not be null".into(),
            ));
        }

        tracing::debug!("request {id}: {}", request.method);

        let response = match request.method.as_str() {
            "initialize" => {
                let result = serde_json::json!({
                    "protocolVersion": PROTOCOL_VERSION,
                    "capabilities": {
                        "tools": { "listChanged": false }
                    },
                    "serverInfo": {
                        "name": self.name,
                        "version": self.version,
                    }
                });
                McpResponse::success(id, result)
            }
            "ping" => McpResponse::success(id, serde_json::json!({})),
            "tools/list" => {
                let tools: Vec<serde_json::Value> =
                    self.registry.list().iter().map(|t| t.to_json()).collect();
                McpResponse::success(id, serde_json::json!({ "tools": tools }))
            }
            "tools/call" => {
                let Some(tool_name) = request.params.get("name").and_then(|v| v.as_str()) else {
                    return Some(McpResponse::error(
                        id,
                        INVALID_PARAMS,
                        "Missing tool name".into(),
                    ));
                };
                let args = request
                    .params
                    .get("arguments")
                    .cloned()
                    .unwrap_or(serde_json::Value::Null);
                McpResponse::success(id, self.call_tool(tool_name, &args).to_json())
            }
            other => McpResponse::error(id, METHOD_NOT_FOUND, format!("Method not found: {other}")),
        };
        Some(response)
    }

    /// Invoke a tool by name. Never panics and never returns a bare failure:
    /// every error, including a panic inside a handler, becomes an error output.
    pub fn call_tool(&self, name: &str, args: &serde_json::Value) -> ToolOutput {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.dispatch(name, args)));

        match outcome {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                tracing::debug!("tool {name} failed: {e}");
                e.into()
            }
            Err(payload) => {
                let message = payload
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| payload.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "internal failure".into());
                tracing::error!("tool {name} panicked: {message}");
                McpError::Internal(message).into()
            }
        }
    }

    fn dispatch(&self, name: &str, args: &serde_json::Value) -> Result<ToolOutput, McpError> {
        let tool = self
            .registry
            .get(name)
            .ok_or_else(|| McpError::ToolNotFound(name.into()))?;
        let ctx = ToolContext {
            store: &self.store,
            search: self.search,
        };
        (tool.handler)(&ctx, args)
    }

    /// Number of advertised tools.
    pub fn tool_count(&self) -> usize {
        self.registry.len()
    }
}

/// MCP JSON-RPC request. Messages without an id are notifications; an
/// explicit `"id": null` is kept as `Some(Null)` and rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpRequest {
    pub jsonrpc: String,
    #[serde(
        default,
        deserialize_with = "present_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<serde_json::Value>,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

impl McpRequest {
    pub fn new(id: i64, method: &str, params: serde_json::Value) -> Self {
        Self {
            jsonrpc: "2.0".into(),
            id: Some(id.into()),
            method: method.into(),
            params,
        }
    }

    pub fn is_notification(&self) -> bool {
        self.id.is_none() || self.method.starts_with("notifications/")
    }
}

fn present_id<'de, D>(deserializer: D) -> Result<Option<serde_json::Value>, D::Error>
where
    D: Deserializer<'de>,
{
    serde_json::Value::deserialize(deserializer).map(Some)
}

/// MCP JSON-RPC response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpResponse {
    pub jsonrpc: String,
    pub id: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
}

impl McpResponse {
    pub fn success(id: serde_json::Value, result: serde_json::Value) -> Self {
        Self {
            jsonrpc: "2.0".into(),
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn error(id: serde_json::Value, code: i64, message: String) -> Self {
        Self {
            jsonrpc: "2.0".into(),
            id,
            result: None,
            error: Some(RpcError { code, message }),
        }
    }
}
