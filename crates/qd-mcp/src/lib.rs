//! qd-mcp: MCP tool plane — exposes the docs corpus to external agents.

pub mod registry;
pub mod server;
pub mod tools;
pub mod transport;

pub use registry::{ToolContext, ToolDescriptor, ToolHandler, ToolRegistry};
pub use server::{McpRequest, McpResponse, McpServer};
pub use tools::ToolOutput;

use thiserror::Error;

/// Tool and transport failures. Tool-level variants render as the
/// human-readable text of an `isError` result.
#[derive(Debug, Error)]
pub enum McpError {
    #[error("Unknown tool: {0}")]
    ToolNotFound(String),
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
    #[error("{0}")]
    NotFound(String),
    #[error("Error: {0}")]
    Internal(String),
    #[error("transport error: {0}")]
    Transport(String),
}
