//! Board and column handler implementations

use mcp_common::{CallToolResult, McpError};

use crate::api::BusinessMapClient;
use crate::params::{BoardParams, ColumnParams};

use super::envelope_result;

/// Boards the current user is assigned to
pub async fn get_boards(client: &BusinessMapClient) -> Result<CallToolResult, McpError> {
    envelope_result(client.get_boards().await)
}

pub async fn get_board(
    client: &BusinessMapClient,
    params: BoardParams,
) -> Result<CallToolResult, McpError> {
    envelope_result(client.get_board(&params.board_id).await)
}

pub async fn get_columns(
    client: &BusinessMapClient,
    params: BoardParams,
) -> Result<CallToolResult, McpError> {
    envelope_result(client.get_columns(&params.board_id).await)
}

pub async fn get_column(
    client: &BusinessMapClient,
    params: ColumnParams,
) -> Result<CallToolResult, McpError> {
    envelope_result(client.get_column(&params.board_id, &params.column_id).await)
}
