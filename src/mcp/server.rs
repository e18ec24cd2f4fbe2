//! Stdio transport for the MCP server.
//!
//! One JSON-RPC message per line in, one response per line out. Logs go to
//! stderr; stdout is reserved for protocol traffic.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use serde_json::Value;
use tracing::{debug, error, info, warn};

use super::tools;
use super::types::{
    InitializeResult, JsonRpcRequest, JsonRpcResponse, ToolsCallParams, ToolsListResult,
    INVALID_PARAMS, METHOD_NOT_FOUND, PARSE_ERROR,
};
use crate::graph::DependencyGraph;

/// The current graph snapshot and the root `depgraph_build` defaults to.
pub struct ServerState {
    pub graph: Arc<RwLock<DependencyGraph>>,
    pub project_root: PathBuf,
}

impl ServerState {
    pub fn new(graph: DependencyGraph, project_root: PathBuf) -> Self {
        Self {
            graph: Arc::new(RwLock::new(graph)),
            project_root,
        }
    }
}

/// Serve stdin/stdout until stdin closes.
pub fn run(state: &ServerState) {
    info!(root = %state.project_root.display(), "serving MCP on stdio");
    serve(state, io::stdin().lock(), &mut io::stdout().lock());
    info!("stdin closed, MCP server exiting");
}

/// Answer every line of `input`, writing responses to `output`.
pub fn serve(state: &ServerState, input: impl BufRead, output: &mut impl Write) {
    for line in input.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                error!(error = %e, "reading request failed");
                return;
            }
        };
        let message = line.trim();
        if message.is_empty() {
            continue;
        }
        debug!(request = %message, "<- request");

        let response = match serde_json::from_str::<JsonRpcRequest>(message) {
            Ok(request) => dispatch(state, &request),
            Err(e) => {
                warn!(error = %e, "unparseable JSON-RPC message");
                Some(JsonRpcResponse::error(None, PARSE_ERROR, format!("Parse error: {e}")))
            }
        };
        if let Some(response) = response {
            send(output, &response);
        }
    }
}

/// Route one request. Returns `None` when no reply is due.
fn dispatch(state: &ServerState, request: &JsonRpcRequest) -> Option<JsonRpcResponse> {
    // Notifications are acted on but never answered.
    if request.is_notification() {
        notify(state, request);
        return None;
    }

    let id = request.id.clone();
    let response = match request.method.as_str() {
        "initialize" => {
            info!("client initializing");
            JsonRpcResponse::from_result(id, &InitializeResult::for_this_server())
        }
        "ping" => JsonRpcResponse::success(id, Value::Object(Default::default())),
        "tools/list" => JsonRpcResponse::from_result(
            id,
            &ToolsListResult {
                tools: tools::list_tools(),
            },
        ),
        "tools/call" => call(state, id, &request.params),
        other => {
            warn!(method = %other, "unsupported method");
            JsonRpcResponse::error(id, METHOD_NOT_FOUND, format!("Method not found: {other}"))
        }
    };
    Some(response)
}

fn notify(state: &ServerState, request: &JsonRpcRequest) {
    match request.method.as_str() {
        "notifications/initialized" => info!("client initialized"),
        "tools/call" => {
            call(state, None, &request.params);
        }
        other => debug!(method = %other, "ignoring notification"),
    }
}

fn call(state: &ServerState, id: Option<Value>, params: &Value) -> JsonRpcResponse {
    let params: ToolsCallParams = match serde_json::from_value(params.clone()) {
        Ok(params) => params,
        Err(e) => {
            return JsonRpcResponse::error(id, INVALID_PARAMS, format!("Invalid params: {e}"))
        }
    };
    debug!(tool = %params.name, "tool call");
    let result = tools::call_tool(
        &state.graph,
        &state.project_root,
        &params.name,
        &params.arguments,
    );
    if result.is_error() {
        warn!(tool = %params.name, error = %result.first_text(), "tool failed");
    }
    JsonRpcResponse::from_result(id, &result)
}

fn send(output: &mut impl Write, response: &JsonRpcResponse) {
    let line = match serde_json::to_string(response) {
        Ok(line) => line,
        Err(e) => {
            error!(error = %e, "response serialization failed");
            return;
        }
    };
    debug!(response = %line, "-> response");
    if let Err(e) = writeln!(output, "{line}").and_then(|_| output.flush()) {
        error!(error = %e, "writing response failed");
    }
}
