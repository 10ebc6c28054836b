//! stdio transport — newline-delimited JSON-RPC.
//!
//! stdout carries protocol messages only; diagnostics go through `tracing`.

use crate::server::{McpRequest, McpResponse, McpServer, PARSE_ERROR};
use crate::McpError;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};

/// Serve requests from `reader` until EOF, one at a time.
pub async fn serve<R, W>(server: &McpServer, reader: R, mut writer: W) -> Result<(), McpError>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = BufReader::new(reader).lines();

    while let Some(line) = lines
        .next_line()
        .await
        .map_err(|e| McpError::Transport(format!("Failed to read request: {e}")))?
    {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<McpRequest>(line) {
            Ok(request) => server.handle_request(&request),
            Err(e) => {
                tracing::warn!("Unparsable message: {e}");
                Some(McpResponse::error(
                    serde_json::Value::Null,
                    PARSE_ERROR,
                    format!("Parse error: {e}"),
                ))
            }
        };

        if let Some(response) = response {
            write_message(&mut writer, &response).await?;
        }
    }

    tracing::info!("Input closed, shutting down");
    Ok(())
}

/// Serve over the process's stdin/stdout.
pub async fn serve_stdio(server: &McpServer) -> Result<(), McpError> {
    serve(server, tokio::io::stdin(), tokio::io::stdout()).await
}

async fn write_message<W>(writer: &mut W, response: &McpResponse) -> Result<(), McpError>
where
    W: AsyncWrite + Unpin,
{
    let mut body = serde_json::to_vec(response)
        .map_err(|e| McpError::Transport(format!("Failed to encode response: {e}")))?;
    body.push(b'\n');
    writer
        .write_all(&body)
        .await
        .map_err(|e| McpError::Transport(format!("Failed to write response: {e}")))?;
    writer
        .flush()
        .await
        .map_err(|e| McpError::Transport(format!("Failed to flush response: {e}")))
}
