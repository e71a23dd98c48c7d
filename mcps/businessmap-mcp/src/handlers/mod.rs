//! Handler implementations for Businessmap MCP tools
//!
//! Organized by domain: account, board, card, comment, content, lane,
//! subtask, system, plus the `user://me` resource

mod account;
mod board;
mod card;
mod comment;
mod content;
mod lane;
mod resource;
mod subtask;
mod system;

pub use account::*;
pub use board::*;
pub use card::*;
pub use comment::*;
pub use content::*;
pub use lane::*;
pub use resource::*;
pub use subtask::*;
pub use system::*;

use mcp_common::{json_error, json_success, CallToolResult, McpError};

use crate::api::{Envelope, ErrorBody};

/// Render an envelope as a tool result
///
/// Error envelopes become error-flagged results carrying the error body, so
/// API failures reach the caller as data rather than protocol faults. A
/// payload that cannot be rendered is reported as `UNKNOWN_ERROR`.
pub fn envelope_result(envelope: Envelope) -> Result<CallToolResult, McpError> {
    match envelope.error {
        Some(error) => json_error(&error),
        None => json_success(&envelope.data)
            .or_else(|e| json_error(&ErrorBody::unknown(e.message))),
    }
}
