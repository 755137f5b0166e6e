//! MCP Server implementation
//!
//! The host that speaks JSON-RPC 2.0 over newline-delimited stdio and
//! dispatches `tools/call` requests to registered tool handlers.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde_json::{Value, json};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::protocol::{
    INTERNAL_ERROR, INVALID_PARAMS, INVALID_REQUEST, InitializeParams, InitializeResult,
    JsonRpcRequest, JsonRpcResponse, METHOD_NOT_FOUND, PARSE_ERROR, PROTOCOL_VERSION,
    ServerCapabilities, ServerInfo, ToolCallParams, ToolsCapability,
};
use crate::tools::{ToolDefinition, ToolResult};
use crate::{Error, Result};

/// Future returned by a tool handler
pub type ToolFuture = Pin<Box<dyn Future<Output = Result<ToolResult>> + Send>>;

/// A registered tool handler, called with the raw `arguments` object
pub type ToolHandler = Arc<dyn Fn(Value) -> ToolFuture + Send + Sync>;

/// MCP Server for Ghost
///
/// Tools are added with [`GhostMcpServer::register_tool`]; the server
/// itself knows nothing about posts.
///
/// # Example
///
/// ```ignore
/// use ghost_mcp::{GhostMcpServer, register_post_tools};
///
/// let mut server = GhostMcpServer::new();
/// register_post_tools(&mut server, client);
/// server.run().await?;
/// ```
#[derive(Default)]
pub struct GhostMcpServer {
    /// Definitions in registration order, as listed by `tools/list`
    tools: Vec<ToolDefinition>,

    handlers: HashMap<String, ToolHandler>,
}

impl GhostMcpServer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool under `definition.name`.
    ///
    /// Registering the same name twice replaces the earlier definition and
    /// handler.
    pub fn register_tool<F, Fut>(&mut self, definition: ToolDefinition, handler: F)
    where
        F: Fn(Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<ToolResult>> + Send + 'static,
    {
        let name = definition.name.clone();
        tracing::debug!(tool = %name, "Registering tool");

        let handler: ToolHandler = Arc::new(move |args| -> ToolFuture { Box::pin(handler(args)) });
        if self.handlers.insert(name.clone(), handler).is_some() {
            tracing::warn!(tool = %name, "Tool registered twice; replacing");
            self.tools.retain(|t| t.name != name);
        }
        self.tools.push(definition);
    }

    /// Get registered tools
    pub fn tools(&self) -> &[ToolDefinition] {
        &self.tools
    }

    /// Invoke a registered tool directly.
    ///
    /// Missing arguments are treated as an empty object.
    pub async fn call_tool(&self, name: &str, arguments: Value) -> Result<ToolResult> {
        let handler = self
            .handlers
            .get(name)
            .cloned()
            .ok_or_else(|| Error::UnknownTool(name.to_string()))?;

        let arguments = match arguments {
            Value::Null => json!({}),
            other => other,
        };

        handler(arguments).await
    }

    /// Run the MCP server on stdin/stdout.
    pub async fn run(&self) -> Result<()> {
        tracing::info!(tools = self.tools.len(), "MCP server ready, listening on stdio");
        self.serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
            .await
    }

    /// Serve newline-delimited JSON-RPC messages until `reader` is exhausted.
    pub async fn serve<R, W>(&self, reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = reader.lines();

        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }

            tracing::debug!(request = %line, "Received message");

            let response = match self.handle_message(&line).await {
                Ok(response) => response,
                Err(e) => serde_json::to_string(&JsonRpcResponse::error(
                    Value::Null,
                    INTERNAL_ERROR,
                    format!("Internal error: {}", e),
                ))?,
            };

            // Notifications produce no response
            if !response.is_empty() {
                writer.write_all(response.as_bytes()).await?;
                writer.write_all(b"\n").await?;
                writer.flush().await?;
            }
        }

        tracing::info!("Input closed, shutting down");
        Ok(())
    }

    /// Handle a single MCP message
    ///
    /// Returns the JSON-RPC response as a string, or an empty string for
    /// notifications. Invalid JSON is answered with a parse error and a
    /// `null` id; well-formed JSON that is not a request object gets an
    /// invalid-request error carrying whatever id it had.
    pub async fn handle_message(&self, message: &str) -> Result<String> {
        let value: Value = match serde_json::from_str(message) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(error = %e, "Unparseable message");
                let response =
                    JsonRpcResponse::error(Value::Null, PARSE_ERROR, format!("Parse error: {}", e));
                return serde_json::to_string(&response).map_err(Error::from);
            }
        };

        let raw_id = value.get("id").cloned().unwrap_or(Value::Null);
        let request: JsonRpcRequest = match serde_json::from_value(value) {
            Ok(request) => request,
            Err(e) => {
                tracing::warn!(error = %e, "Invalid request");
                let response = JsonRpcResponse::error(
                    raw_id,
                    INVALID_REQUEST,
                    format!("Invalid request: {}", e),
                );
                return serde_json::to_string(&response).map_err(Error::from);
            }
        };

        if request.is_notification() {
            tracing::debug!(method = %request.method, "Notification received");
            return Ok(String::new());
        }

        let id = request.id.clone().unwrap_or(Value::Null);
        let response = match self.dispatch(id.clone(), request).await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(error = %e, "Request failed");
                JsonRpcResponse::error(id, INTERNAL_ERROR, format!("Internal error: {}", e))
            }
        };

        serde_json::to_string(&response).map_err(Error::from)
    }

    async fn dispatch(&self, id: Value, request: JsonRpcRequest) -> Result<JsonRpcResponse> {
        let response = match request.method.as_str() {
            "initialize" => self.handle_initialize(id, request.params)?,
            "ping" => JsonRpcResponse::success(id, json!({})),
            "tools/list" => self.handle_tools_list(id),
            "tools/call" => self.handle_tools_call(id, request.params).await?,
            _ => JsonRpcResponse::error(
                id,
                METHOD_NOT_FOUND,
                format!("Method not found: {}", request.method),
            ),
        };

        Ok(response)
    }

    fn handle_initialize(&self, id: Value, params: Value) -> Result<JsonRpcResponse> {
        if let Ok(params) = serde_json::from_value::<InitializeParams>(params) {
            tracing::info!(
                client = %params.client_info.name,
                client_version = %params.client_info.version,
                protocol = %params.protocol_version,
                "Client connected"
            );
        }

        let result = InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: Some(false),
                }),
            },
            server_info: ServerInfo {
                name: "ghost-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        };

        Ok(JsonRpcResponse::success(id, serde_json::to_value(result)?))
    }

    fn handle_tools_list(&self, id: Value) -> JsonRpcResponse {
        JsonRpcResponse::success(id, json!({ "tools": self.tools }))
    }

    /// Tool failures are reported inside a successful response with
    /// `isError: true`, so the calling agent sees the message.
    async fn handle_tools_call(&self, id: Value, params: Value) -> Result<JsonRpcResponse> {
        let tool_params: ToolCallParams = match serde_json::from_value(params) {
            Ok(params) => params,
            Err(e) => {
                return Ok(JsonRpcResponse::error(
                    id,
                    INVALID_PARAMS,
                    format!("Invalid params: {}", e),
                ));
            }
        };

        tracing::debug!(tool = %tool_params.name, "Calling tool");

        let tool_result = match self.call_tool(&tool_params.name, tool_params.arguments).await {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!(tool = %tool_params.name, error = %e, "Tool call failed");
                ToolResult::error(e.to_string())
            }
        };

        Ok(JsonRpcResponse::success(id, serde_json::to_value(tool_result)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::ToolDefinition;

    fn echo_server() -> GhostMcpServer {
        let mut server = GhostMcpServer::new();
        server.register_tool(
            ToolDefinition::new("echo", "Echo the arguments", json!({"type": "object"})),
            |args| async move { Ok(ToolResult::text(args.to_string())) },
        );
        server.register_tool(
            ToolDefinition::new("fail", "Always fails", json!({"type": "object"})),
            |_args| async move {
                Err(Error::InvalidArguments {
                    message: "nope".to_string(),
                })
            },
        );
        server
    }

    #[test]
    fn server_creation() {
        let server = GhostMcpServer::new();
        assert!(server.tools().is_empty());
    }

    #[test]
    fn register_tool_keeps_order_and_replaces_duplicates() {
        let mut server = echo_server();
        assert_eq!(server.tools().len(), 2);

        server.register_tool(
            ToolDefinition::new("echo", "Second echo", json!({"type": "object"})),
            |_args| async move { Ok(ToolResult::text("second")) },
        );

        let names: Vec<&str> = server.tools().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["fail", "echo"]);
        assert_eq!(server.tools()[1].description, "Second echo");
    }

    #[tokio::test]
    async fn call_tool_passes_empty_object_for_missing_arguments() {
        let server = echo_server();
        let result = server.call_tool("echo", Value::Null).await.unwrap();
        assert_eq!(result.first_text(), Some("{}"));
    }

    #[tokio::test]
    async fn call_tool_unknown_name() {
        let server = echo_server();
        let err = server.call_tool("missing", json!({})).await.unwrap_err();
        assert!(matches!(err, Error::UnknownTool(name) if name == "missing"));
    }

    #[tokio::test]
    async fn test_handle_initialize() {
        let server = echo_server();
        let request = r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{"protocolVersion":"2024-11-05","capabilities":{},"clientInfo":{"name":"test","version":"1.0"}}}"#;

        let response: Value =
            serde_json::from_str(&server.handle_message(request).await.unwrap()).unwrap();
        assert_eq!(response["result"]["serverInfo"]["name"], "ghost-mcp");
        assert_eq!(response["result"]["protocolVersion"], PROTOCOL_VERSION);
        assert!(response["result"]["capabilities"]["tools"].is_object());
    }

    #[tokio::test]
    async fn test_notifications_get_no_response() {
        let server = echo_server();
        for request in [
            r#"{"jsonrpc":"2.0","method":"initialized"}"#,
            r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
            r#"{"jsonrpc":"2.0","method":"notifications/cancelled","params":{"requestId":1}}"#,
        ] {
            assert!(server.handle_message(request).await.unwrap().is_empty());
        }
    }

    #[tokio::test]
    async fn test_handle_ping() {
        let server = echo_server();
        let response: Value = serde_json::from_str(
            &server
                .handle_message(r#"{"jsonrpc":"2.0","id":"p","method":"ping"}"#)
                .await
                .unwrap(),
        )
        .unwrap();
        assert_eq!(response["id"], "p");
        assert_eq!(response["result"], json!({}));
    }

    #[tokio::test]
    async fn test_handle_tools_list() {
        let server = echo_server();
        let response: Value = serde_json::from_str(
            &server
                .handle_message(r#"{"jsonrpc":"2.0","id":2,"method":"tools/list","params":{}}"#)
                .await
                .unwrap(),
        )
        .unwrap();

        let tools = response["result"]["tools"].as_array().unwrap();
        assert_eq!(tools.len(), 2);
        assert_eq!(tools[0]["name"], "echo");
        assert!(tools[0].get("inputSchema").is_some());
    }

    #[tokio::test]
    async fn test_handle_unknown_method() {
        let server = echo_server();
        let response = server
            .handle_message(r#"{"jsonrpc":"2.0","id":4,"method":"unknown/method","params":{}}"#)
            .await
            .unwrap();
        assert!(response.contains("-32601"));
        assert!(response.contains("Method not found"));
    }

    #[tokio::test]
    async fn test_handle_invalid_json() {
        let server = echo_server();
        let response: Value =
            serde_json::from_str(&server.handle_message(r#"{"invalid json"#).await.unwrap())
                .unwrap();
        assert_eq!(response["error"]["code"], PARSE_ERROR);
        assert_eq!(response.get("id"), Some(&Value::Null));
    }

    #[tokio::test]
    async fn test_request_without_method_is_invalid_request_with_id() {
        let server = echo_server();
        let response: Value = serde_json::from_str(
            &server
                .handle_message(r#"{"jsonrpc":"2.0","id":7}"#)
                .await
                .unwrap(),
        )
        .unwrap();
        assert_eq!(response["error"]["code"], INVALID_REQUEST);
        assert_eq!(response["id"], 7);
    }

    #[tokio::test]
    async fn test_batch_array_is_invalid_request_with_null_id() {
        let server = echo_server();
        let response: Value = serde_json::from_str(
            &server
                .handle_message(r#"[{"jsonrpc":"2.0","id":1,"method":"ping"}]"#)
                .await
                .unwrap(),
        )
        .unwrap();
        assert_eq!(response["error"]["code"], INVALID_REQUEST);
        assert_eq!(response.get("id"), Some(&Value::Null));
    }

    #[tokio::test]
    async fn test_tools_call_without_name_is_invalid_params() {
        let server = echo_server();
        let response: Value = serde_json::from_str(
            &server
                .handle_message(r#"{"jsonrpc":"2.0","id":5,"method":"tools/call","params":{}}"#)
                .await
                .unwrap(),
        )
        .unwrap();
        assert_eq!(response["error"]["code"], INVALID_PARAMS);
    }

    #[tokio::test]
    async fn test_tool_failure_is_error_result() {
        let server = echo_server();
        let response: Value = serde_json::from_str(
            &server
                .handle_message(
                    r#"{"jsonrpc":"2.0","id":6,"method":"tools/call","params":{"name":"fail","arguments":{}}}"#,
                )
                .await
                .unwrap(),
        )
        .unwrap();

        assert!(response.get("error").is_none());
        assert_eq!(response["result"]["isError"], true);
        assert_eq!(
            response["result"]["content"][0]["text"],
            "invalid arguments: nope"
        );
    }

    #[tokio::test]
    async fn test_unknown_tool_is_error_result() {
        let server = echo_server();
        let response = server
            .handle_message(
                r#"{"jsonrpc":"2.0","id":7,"method":"tools/call","params":{"name":"unknown_tool","arguments":{}}}"#,
            )
            .await
            .unwrap();
        assert!(response.contains("isError"));
        assert!(response.contains("unknown tool: unknown_tool"));
    }

    #[tokio::test]
    async fn serve_answers_each_request_line() {
        let server = echo_server();
        let input = concat!(
            r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{}}"#,
            "\n",
            r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
            "\n\n",
            r#"{"jsonrpc":"2.0","id":2,"method":"tools/call","params":{"name":"echo","arguments":{"a":1}}}"#,
            "\n",
        );
        let mut output = Vec::new();

        server.serve(input.as_bytes(), &mut output).await.unwrap();

        let lines: Vec<Value> = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["id"], 1);
        assert_eq!(lines[1]["id"], 2);
        assert_eq!(lines[1]["result"]["content"][0]["text"], r#"{"a":1}"#);
    }
}
