//! `POST /api/mcp`
//!
//! Accepts three request shapes on one endpoint:
//!
//! - `{"method": "tools/list"}` / `{"method": "tools/call", "params": {...}}`
//! - JSON-RPC 2.0 envelopes carrying the same two methods
//! - `{"tool": "...", "arguments": {...}}` direct calls

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use rgcleaner_core::{CleanerError, CleanerTools, call_tool, tool_descriptors};
use serde_json::{Value, json};

use crate::{AppState, rejection_response};

pub const INVALID_REQUEST: &str = "Invalid request. Use {method: 'tools/list'} or {method: 'tools/call', params: {name, arguments}}";

const METHOD_NOT_FOUND: i64 = -32601;

pub(crate) async fn endpoint(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> (StatusCode, Json<Value>) {
    let Json(body) = match payload {
        Ok(body) => body,
        Err(rejection) => return rejection_response(rejection),
    };
    let (status, response) = handle_request(state.tools.as_ref(), body).await;
    (status, Json(response))
}

/// Dispatch one request body and produce the status and JSON response
pub async fn handle_request<T>(tools: &T, body: Value) -> (StatusCode, Value)
where
    T: CleanerTools + ?Sized,
{
    if body.get("jsonrpc").is_some() {
        return (StatusCode::OK, handle_json_rpc(tools, &body).await);
    }

    let result = match body.get("method").and_then(Value::as_str) {
        Some("tools/list") => Ok(json!({ "tools": tool_descriptors() })),
        Some("tools/call") => {
            let (name, args) = call_params(&body);
            call_tool(tools, &name, args).await.map(call_result)
        }
        _ => match body.get("tool").and_then(Value::as_str) {
            Some(name) => {
                let args = body.get("arguments").cloned().unwrap_or_else(|| json!({}));
                call_tool(tools, name, args).await
            }
            None => Ok(json!({ "error": INVALID_REQUEST })),
        },
    };

    match result {
        Ok(value) => (StatusCode::OK, value),
        Err(e) => {
            tracing::warn!("MCP request failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_payload())
        }
    }
}

async fn handle_json_rpc<T>(tools: &T, body: &Value) -> Value
where
    T: CleanerTools + ?Sized,
{
    let id = body.get("id").cloned().unwrap_or(Value::Null);

    match body.get("method").and_then(Value::as_str) {
        Some("tools/list") => json!({
            "jsonrpc": "2.0",
            "id": id,
            "result": { "tools": tool_descriptors() },
        }),
        Some("tools/call") => {
            let (name, args) = call_params(body);
            let result = match call_tool(tools, &name, args).await {
                Ok(value) => call_result(value),
                Err(e) => {
                    tracing::warn!("Tool {} failed: {}", name, e);
                    error_result(&e)
                }
            };
            json!({ "jsonrpc": "2.0", "id": id, "result": result })
        }
        _ => json!({
            "jsonrpc": "2.0",
            "id": id,
            "error": { "code": METHOD_NOT_FOUND, "message": "Method not found" },
        }),
    }
}

fn call_params(body: &Value) -> (String, Value) {
    let params = body.get("params");
    let name = params
        .and_then(|p| p.get("name"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let args = params
        .and_then(|p| p.get("arguments"))
        .cloned()
        .unwrap_or_else(|| json!({}));
    (name, args)
}

/// Wrap a tool response as MCP `CallToolResult` text content
fn call_result(value: Value) -> Value {
    let text = serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string());
    json!({ "content": [{ "type": "text", "text": text }] })
}

fn error_result(e: &CleanerError) -> Value {
    json!({
        "content": [{ "type": "text", "text": e.to_payload().to_string() }],
        "isError": true,
    })
}
