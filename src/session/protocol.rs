//! JSON-RPC 2.0 line protocol driving a [`Session`].
//!
//! One request per input line, one response per output line. Requests
//! without an `id` are notifications and get no response.

use log::{info, warn};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::path::PathBuf;

use super::{Session, SessionError};
use crate::model::Action;
use crate::tools::ToolRegistry;

/// Rejected edit or unreadable logo.
pub const EDIT_REJECTED: i64 = -32000;

#[derive(Debug, Deserialize)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
    #[serde(default)]
    pub id: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct OutboundResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl OutboundResponse {
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            result: Some(result),
            error: None,
            id,
        }
    }

    pub fn error(id: Option<Value>, code: i64, message: impl Into<String>) -> Self {
        Self::error_with_data(id, code, message, None)
    }

    pub fn error_with_data(
        id: Option<Value>,
        code: i64,
        message: impl Into<String>,
        data: Option<Value>,
    ) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(RpcError {
                code,
                message: message.into(),
                data,
            }),
            id,
        }
    }

    pub fn invalid_params(id: Option<Value>, message: impl Into<String>) -> Self {
        Self::error(id, -32602, message)
    }

    pub fn parse_error(message: impl Into<String>) -> Self {
        Self::error(None, -32700, message)
    }

    pub fn method_not_found(id: Option<Value>, method: &str) -> Self {
        Self::error(id, -32601, format!("Method '{method}' is not supported."))
    }
}

#[derive(Debug, Deserialize)]
struct DispatchParams {
    action: Action,
}

#[derive(Debug, Deserialize)]
struct LoadLogoParams {
    path: PathBuf,
}

#[derive(Debug, Deserialize)]
struct CallToolParams {
    name: String,
    #[serde(default)]
    arguments: Option<Value>,
}

/// Handle one input line. `None` means nothing is written back.
pub fn handle_line(session: &mut Session<'_>, registry: &ToolRegistry, line: &str) -> Option<String> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let response = match serde_json::from_str::<RpcRequest>(line) {
        Ok(request) => handle_request(session, registry, request)?,
        Err(err) => {
            warn!("unparsable request: {}", err);
            OutboundResponse::parse_error(err.to_string())
        }
    };

    match serde_json::to_string(&response) {
        Ok(text) => Some(text),
        Err(err) => {
            warn!("failed to serialize response: {}", err);
            None
        }
    }
}

pub fn handle_request(
    session: &mut Session<'_>,
    registry: &ToolRegistry,
    request: RpcRequest,
) -> Option<OutboundResponse> {
    if request.jsonrpc != "2.0" {
        warn!("received unsupported jsonrpc version: {}", request.jsonrpc);
        return Some(OutboundResponse::error(
            request.id,
            -32600,
            "Unsupported jsonrpc version (expected 2.0)",
        ));
    }

    let RpcRequest {
        method, params, id, ..
    } = request;
    let notification = id.is_none();

    let response = match method.as_str() {
        "session/dispatch" => match parse_params::<DispatchParams>(params) {
            Ok(parsed) => applied(id, session.dispatch(parsed.action)),
            Err(message) => OutboundResponse::invalid_params(id, message),
        },
        "session/loadLogo" => match parse_params::<LoadLogoParams>(params) {
            Ok(parsed) => applied(id, session.load_logo(&parsed.path)),
            Err(message) => OutboundResponse::invalid_params(id, message),
        },
        "session/state" => OutboundResponse::success(id, state_payload(session)),
        "tools/list" => OutboundResponse::success(id, json!({ "tools": registry.list_tools() })),
        "tools/call" => match parse_params::<CallToolParams>(params) {
            Ok(parsed) => OutboundResponse::success(
                id,
                json!(registry.call_tool(&parsed.name, parsed.arguments)),
            ),
            Err(message) => OutboundResponse::invalid_params(id, message),
        },
        "ping" => OutboundResponse::success(id, json!({ "ok": true })),
        other if other.starts_with("notifications/") => {
            info!("received client notification: {}", other);
            return None;
        }
        other => OutboundResponse::method_not_found(id, other),
    };

    (!notification).then_some(response)
}

fn applied(id: Option<Value>, outcome: Result<u64, SessionError>) -> OutboundResponse {
    match outcome {
        Ok(revision) => OutboundResponse::success(id, json!({ "revision": revision })),
        Err(err) => {
            let kind = match err {
                SessionError::Model(_) => "model",
                SessionError::Content(_) => "content",
            };
            OutboundResponse::error_with_data(
                id,
                EDIT_REJECTED,
                err.to_string(),
                Some(json!({ "kind": kind })),
            )
        }
    }
}

fn state_payload(session: &Session<'_>) -> Value {
    let state = session.state();
    json!({
        "tool": session.tool().id(),
        "revision": session.revision(),
        "variant": state.variant,
        "mobileView": state.mobile_view,
        "model": state.model,
        "warnings": session.warnings(),
        "filename": session.filename(),
    })
}

fn parse_params<T: DeserializeOwned>(params: Option<Value>) -> Result<T, String> {
    serde_json::from_value(params.unwrap_or(Value::Null)).map_err(|err| err.to_string())
}
