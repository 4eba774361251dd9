// MCP server: newline-delimited JSON-RPC over stdio

use crate::protocol::{
    CallToolParams, CallToolResult, InitializeParams, InitializeResult, JsonRpcError,
    JsonRpcRequest, JsonRpcResponse, ListToolsResult, ServerCapabilities, ServerInfo,
    ToolContent, ToolsCapability, PROTOCOL_VERSION,
};
use crate::tools::ToolRegistry;
use anyhow::{Context, Result};
use futures_util::{FutureExt, SinkExt, StreamExt};
use serde_json::{json, Value};
use std::panic::AssertUnwindSafe;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio_util::codec::{FramedRead, FramedWrite, LinesCodec};
use tracing::{debug, error, info, warn};

pub const SERVER_NAME: &str = "todoist-mcp";

pub struct McpServer {
    registry: ToolRegistry,
}

impl McpServer {
    pub fn new(registry: ToolRegistry) -> Self {
        Self { registry }
    }

    /// Serve on stdin/stdout until input closes or a shutdown signal arrives.
    pub async fn start(&self) -> Result<()> {
        info!("MCP server listening on stdio");

        tokio::select! {
            result = self.serve(tokio::io::stdin(), tokio::io::stdout()) => result,
            _ = shutdown_signal() => {
                info!("Shutdown signal received");
                Ok(())
            }
        }
    }

    /// Serve one message at a time from `reader`, writing responses to
    /// `writer`, until `reader` reaches EOF.
    pub async fn serve<R, W>(&self, reader: R, writer: W) -> Result<()>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = FramedRead::new(reader, LinesCodec::new());
        let mut responses = FramedWrite::new(writer, LinesCodec::new());

        while let Some(line) = lines.next().await {
            let line = line.context("Failed to read message")?;
            if line.trim().is_empty() {
                continue;
            }

            if let Some(response) = self.handle_message(&line).await {
                let encoded = serde_json::to_string(&response)?;
                responses
                    .send(encoded)
                    .await
                    .context("Failed to write response")?;
            }
        }

        info!("Input closed, stopping");
        Ok(())
    }

    /// Handle one raw message. Notifications produce no response.
    pub async fn handle_message(&self, line: &str) -> Option<JsonRpcResponse> {
        let value: Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(e) => {
                warn!("Failed to parse message: {}", e);
                return Some(JsonRpcResponse::error(Value::Null, JsonRpcError::parse_error()));
            }
        };

        let id = value.get("id").cloned().unwrap_or(Value::Null);
        let request: JsonRpcRequest = match serde_json::from_value(value) {
            Ok(request) => request,
            Err(e) => {
                warn!("Invalid request: {}", e);
                return Some(JsonRpcResponse::error(id, JsonRpcError::invalid_request()));
            }
        };

        if request.is_notification() {
            self.handle_notification(&request);
            return None;
        }

        Some(self.handle_request(id, request).await)
    }

    fn handle_notification(&self, request: &JsonRpcRequest) {
        match request.method.as_str() {
            "notifications/initialized" => info!("Client initialized"),
            method => debug!(method, "Ignoring notification"),
        }
    }

    async fn handle_request(&self, id: Value, request: JsonRpcRequest) -> JsonRpcResponse {
        debug!(method = %request.method, "Handling request");

        match request.method.as_str() {
            "initialize" => {
                let params: InitializeParams = request
                    .params
                    .and_then(|p| serde_json::from_value(p).ok())
                    .unwrap_or_default();
                if let Some(client) = &params.client_info {
                    info!(client = %client.name, protocol = ?params.protocol_version, "Initializing session");
                }
                JsonRpcResponse::from_result(id, &self.initialize_result())
            }
            "ping" => JsonRpcResponse::success(id, json!({})),
            "tools/list" => {
                debug!("Listing available tools");
                let result = ListToolsResult {
                    tools: self.registry.list_schemas(),
                };
                JsonRpcResponse::from_result(id, &result)
            }
            "tools/call" => match request.params.map(serde_json::from_value::<CallToolParams>) {
                Some(Ok(params)) => {
                    let result = self.call_tool(params).await;
                    JsonRpcResponse::from_result(id, &result)
                }
                Some(Err(e)) => JsonRpcResponse::error(
                    id,
                    JsonRpcError::invalid_params(format!("Invalid tools/call params: {}", e)),
                ),
                None => JsonRpcResponse::error(
                    id,
                    JsonRpcError::invalid_params("Missing tools/call params"),
                ),
            },
            method => {
                warn!(method, "Unknown method");
                JsonRpcResponse::error(id, JsonRpcError::method_not_found(method))
            }
        }
    }

    async fn call_tool(&self, params: CallToolParams) -> CallToolResult {
        let CallToolParams { name, arguments } = params;
        debug!(tool = %name, "Executing tool");

        match AssertUnwindSafe(self.registry.call(&name, arguments))
            .catch_unwind()
            .await
        {
            Ok(result) => result,
            Err(_) => {
                error!(tool = %name, "Tool execution failed");
                CallToolResult {
                    content: vec![ToolContent::text(format!(
                        "Error executing {}: Unknown error",
                        name
                    ))],
                    is_error: Some(true),
                }
            }
        }
    }

    fn initialize_result(&self) -> InitializeResult {
        InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: false,
                }),
            },
            server_info: ServerInfo {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        }
    }
}

/// Resolves on SIGINT, or SIGTERM on unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for SIGINT: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ToolError;
    use crate::protocol::ToolSchema;
    use crate::tools::{json_schema_object, Tool};
    use std::sync::Arc;

    struct PanickingTool;

    #[async_trait::async_trait]
    impl Tool for PanickingTool {
        fn schema(&self) -> ToolSchema {
            ToolSchema {
                name: "explode".to_string(),
                description: "Always panics".to_string(),
                input_schema: json_schema_object(json!({}), vec![]),
            }
        }

        async fn execute(&self, _arguments: Value) -> Result<CallToolResult, ToolError> {
            panic!("tool blew up");
        }
    }

    fn server() -> McpServer {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(PanickingTool));
        McpServer::new(registry)
    }

    async fn respond(server: &McpServer, message: Value) -> Value {
        let response = server.handle_message(&message.to_string()).await.unwrap();
        serde_json::to_value(response).unwrap()
    }

    #[tokio::test]
    async fn test_initialize() {
        let response = respond(
            &server(),
            json!({
                "jsonrpc": "2.0",
                "id": 1,
                "method": "initialize",
                "params": {
                    "protocolVersion": "2024-11-05",
                    "capabilities": {},
                    "clientInfo": {"name": "inspector", "version": "1.0"}
                }
            }),
        )
        .await;

        assert_eq!(response["id"], 1);
        assert_eq!(response["result"]["protocolVersion"], "2024-11-05");
        assert_eq!(response["result"]["serverInfo"]["name"], "todoist-mcp");
        assert_eq!(response["result"]["capabilities"]["tools"]["listChanged"], false);
    }

    #[tokio::test]
    async fn test_ping() {
        let response = respond(&server(), json!({"jsonrpc": "2.0", "id": "a", "method": "ping"})).await;
        assert_eq!(response["id"], "a");
        assert_eq!(response["result"], json!({}));
    }

    #[tokio::test]
    async fn test_notification_has_no_response() {
        let server = server();
        let line = json!({"jsonrpc": "2.0", "method": "notifications/initialized"}).to_string();
        assert!(server.handle_message(&line).await.is_none());
    }

    #[tokio::test]
    async fn test_null_id_gets_a_response() {
        let response = respond(&server(), json!({"jsonrpc": "2.0", "id": null, "method": "ping"})).await;

        assert_eq!(response["id"], Value::Null);
        assert_eq!(response["result"], json!({}));
    }

    #[tokio::test]
    async fn test_unknown_method() {
        let response =
            respond(&server(), json!({"jsonrpc": "2.0", "id": 2, "method": "resources/list"})).await;

        assert_eq!(response["error"]["code"], JsonRpcError::METHOD_NOT_FOUND);
        assert!(response.get("result").is_none());
    }

    #[tokio::test]
    async fn test_parse_error() {
        let response = server().handle_message("{not json").await.unwrap();
        let error = response.error.unwrap();

        assert_eq!(error.code, JsonRpcError::PARSE_ERROR);
        assert_eq!(response.id, Value::Null);
    }

    #[tokio::test]
    async fn test_invalid_request_keeps_id() {
        let response = respond(&server(), json!({"jsonrpc": "2.0", "id": 9})).await;

        assert_eq!(response["id"], 9);
        assert_eq!(response["error"]["code"], JsonRpcError::INVALID_REQUEST);
    }

    #[tokio::test]
    async fn test_tools_call_without_params() {
        let response =
            respond(&server(), json!({"jsonrpc": "2.0", "id": 3, "method": "tools/call"})).await;

        assert_eq!(response["error"]["code"], JsonRpcError::INVALID_PARAMS);
    }

    #[tokio::test]
    async fn test_tool_panic_is_reported() {
        let response = respond(
            &server(),
            json!({
                "jsonrpc": "2.0",
                "id": 4,
                "method": "tools/call",
                "params": {"name": "explode", "arguments": {}}
            }),
        )
        .await;

        assert_eq!(response["result"]["isError"], true);
        assert_eq!(
            response["result"]["content"][0]["text"],
            "Error executing explode: Unknown error"
        );
    }

    #[tokio::test]
    async fn test_tools_list() {
        let response =
            respond(&server(), json!({"jsonrpc": "2.0", "id": 5, "method": "tools/list"})).await;

        assert_eq!(response["result"]["tools"][0]["name"], "explode");
        assert_eq!(
            response["result"]["tools"][0]["inputSchema"],
            json!({"type": "object", "properties": {}})
        );
    }
}
