//! Content formatting handler

use mcp_common::{text_success, CallToolResult, McpError};

use crate::format::{format_content_to_html, format_preserving_existing};
use crate::params::FormatContentParams;

/// Convert raw content to an HTML fragment without touching the API
pub fn format_content(params: FormatContentParams) -> Result<CallToolResult, McpError> {
    let html = if params.preserve_existing {
        format_preserving_existing(&params.content)
    } else {
        format_content_to_html(&params.content)
    };
    Ok(text_success(html))
}
