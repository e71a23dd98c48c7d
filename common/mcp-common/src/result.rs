//! Result helpers for MCP tool responses

use rmcp::{
    model::{CallToolResult, Content},
    ErrorData as McpError,
};
use serde::Serialize;

use crate::error::internal_error;

fn to_pretty_json<T: Serialize>(data: &T) -> Result<String, McpError> {
    serde_json::to_string_pretty(data).map_err(|e| internal_error(e.to_string()))
}

/// Successful tool result carrying `data` as pretty-printed JSON
pub fn json_success<T: Serialize>(data: &T) -> Result<CallToolResult, McpError> {
    Ok(CallToolResult::success(vec![Content::text(to_pretty_json(data)?)]))
}

/// Error-flagged tool result carrying `error` as pretty-printed JSON
///
/// Use this when a failure is part of the tool's normal output (an upstream
/// API rejecting a request, say) rather than a protocol-level fault. The
/// client still receives the details as content.
pub fn json_error<T: Serialize>(error: &T) -> Result<CallToolResult, McpError> {
    Ok(CallToolResult::error(vec![Content::text(to_pretty_json(error)?)]))
}

/// Successful plain text result
pub fn text_success(text: impl Into<String>) -> CallToolResult {
    CallToolResult::success(vec![Content::text(text.into())])
}
