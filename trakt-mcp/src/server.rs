//! JSON-RPC dispatch and the serve loop.

use crate::context::AppContext;
use crate::error::ToolError;
use crate::protocol::*;
use crate::transport::{MessageSink, MessageSource, TransportError};
use crate::{prompts, resources, tools};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

pub const SERVER_NAME: &str = "trakt-mcp";

const INSTRUCTIONS: &str = "Browse Trakt TV and movie data. Public lists, search, ratings and \
comments work without signing in. Watch history and checkins need an authenticated user: call \
`start_device_auth`, have the user approve the code, then call `check_auth_status`.";

pub struct McpServer {
    ctx: Arc<AppContext>,
}

impl McpServer {
    pub fn new(ctx: Arc<AppContext>) -> Self {
        Self { ctx }
    }

    /// Handles one raw line. Returns `None` for notifications.
    pub async fn handle_message(&self, line: &str) -> Option<JsonRpcResponse> {
        let value: Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, "Unparseable message");
                return Some(JsonRpcResponse::error(
                    JsonRpcId::Null,
                    JsonRpcError::parse_error(format!("Parse error: {}", e)),
                ));
            }
        };

        let fallback_id = value
            .get("id")
            .and_then(|id| serde_json::from_value(id.clone()).ok())
            .unwrap_or(JsonRpcId::Null);

        let request: JsonRpcRequest = match serde_json::from_value(value) {
            Ok(request) => request,
            Err(e) => {
                return Some(JsonRpcResponse::error(
                    fallback_id,
                    JsonRpcError::invalid_request(format!("Invalid request: {}", e)),
                ));
            }
        };

        if request.jsonrpc != JSONRPC_VERSION {
            return Some(JsonRpcResponse::error(
                request.id.unwrap_or(JsonRpcId::Null),
                JsonRpcError::invalid_request("jsonrpc must be \"2.0\""),
            ));
        }

        match request.id {
            Some(id) => Some(self.handle_request(id, &request.method, request.params).await),
            None => {
                debug!(method = %request.method, "Notification received");
                None
            }
        }
    }

    async fn handle_request(&self, id: JsonRpcId, method: &str, params: Option<Value>) -> JsonRpcResponse {
        debug!(method, "MCP request received");

        let result = match method {
            "initialize" => self.initialize(params),
            "ping" => Ok(json!({})),
            "tools/list" => to_value(ListToolsResult {
                tools: tools::definitions(),
            }),
            "tools/call" => self.call_tool(params).await,
            "resources/list" => to_value(ListResourcesResult {
                resources: resources::list(),
            }),
            "resources/read" => self.read_resource(params).await,
            "prompts/list" => to_value(ListPromptsResult {
                prompts: prompts::list(),
            }),
            "prompts/get" => self.get_prompt(params),
            _ => {
                warn!(method, "Unknown MCP method");
                Err(JsonRpcError::method_not_found(method))
            }
        };

        match result {
            Ok(value) => JsonRpcResponse::success(id, value),
            Err(error) => JsonRpcResponse::error(id, error),
        }
    }

    fn initialize(&self, params: Option<Value>) -> Result<Value, JsonRpcError> {
        let params: InitializeParams = parse_params(params)?;
        if let Some(client) = &params.client_info {
            info!(
                client = %client.name,
                client_version = %client.version,
                protocol = %params.protocol_version,
                "Client connected"
            );
        }

        to_value(InitializeResult {
            protocol_version: MCP_PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                prompts: Some(ListChanged::default()),
                resources: Some(ResourcesCapability::default()),
                tools: Some(ListChanged::default()),
            },
            server_info: Implementation {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            instructions: Some(INSTRUCTIONS.to_string()),
        })
    }

    async fn call_tool(&self, params: Option<Value>) -> Result<Value, JsonRpcError> {
        let params: CallToolParams = parse_params(params)?;
        info!(tool = %params.name, "Calling tool");

        let result = match tools::call(&self.ctx, &params.name, params.arguments).await {
            Ok(text) => CallToolResult::text(text),
            Err(e) if e.is_invalid_params() => return Err(JsonRpcError::invalid_params(e.to_string())),
            Err(e) => {
                warn!(tool = %params.name, error = %e, "Tool failed");
                CallToolResult::error(e.to_string())
            }
        };
        to_value(result)
    }

    async fn read_resource(&self, params: Option<Value>) -> Result<Value, JsonRpcError> {
        let params: ReadResourceParams = parse_params(params)?;
        let content = resources::read(&self.ctx, &params.uri)
            .await
            .map_err(|e| rpc_error(&e))?;
        to_value(ReadResourceResult {
            contents: vec![content],
        })
    }

    fn get_prompt(&self, params: Option<Value>) -> Result<Value, JsonRpcError> {
        let params: GetPromptParams = parse_params(params)?;
        let result = prompts::get(&params.name).map_err(|e| rpc_error(&e))?;
        to_value(result)
    }

    /// Reads messages until the peer hangs up. Each request runs on its own
    /// task; responses are written in completion order.
    pub async fn serve<S, W>(self: Arc<Self>, mut source: S, mut sink: W) -> Result<(), TransportError>
    where
        S: MessageSource,
        W: MessageSink + 'static,
    {
        let (tx, mut rx) = mpsc::unbounded_channel::<JsonRpcResponse>();

        let writer = tokio::spawn(async move {
            while let Some(response) = rx.recv().await {
                sink.send(&response).await?;
            }
            Ok::<(), TransportError>(())
        });

        while let Some(line) = source.recv().await? {
            let server = self.clone();
            let tx = tx.clone();
            tokio::spawn(async move {
                if let Some(response) = server.handle_message(&line).await {
                    // Receiver is gone only after a write failure
                    let _ = tx.send(response);
                }
            });
        }

        info!("Input closed, shutting down");
        drop(tx);
        match writer.await {
            Ok(result) => result,
            Err(e) => Err(TransportError::Io(std::io::Error::other(e))),
        }
    }
}

fn parse_params<T: DeserializeOwned>(params: Option<Value>) -> Result<T, JsonRpcError> {
    serde_json::from_value(params.unwrap_or_else(|| json!({})))
        .map_err(|e| JsonRpcError::invalid_params(format!("Invalid params: {}", e)))
}

fn to_value<T: Serialize>(result: T) -> Result<Value, JsonRpcError> {
    serde_json::to_value(result).map_err(|e| JsonRpcError::internal_error(e.to_string()))
}

fn rpc_error(error: &ToolError) -> JsonRpcError {
    if error.is_invalid_params() {
        JsonRpcError::invalid_params(error.to_string())
    } else {
        JsonRpcError::internal_error(error.to_string())
    }
}
