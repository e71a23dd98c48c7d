//! Account handler implementations

use mcp_common::{invalid_params, CallToolResult, McpError};

use crate::api::BusinessMapClient;
use crate::params::{UserParams, WorkspaceParams};

use super::envelope_result;

/// Data about the user owning the API key
pub async fn get_me(client: &BusinessMapClient) -> Result<CallToolResult, McpError> {
    envelope_result(client.get_me().await)
}

pub async fn get_api_limits(client: &BusinessMapClient) -> Result<CallToolResult, McpError> {
    envelope_result(client.get_api_limits().await)
}

pub async fn get_user(
    client: &BusinessMapClient,
    params: UserParams,
) -> Result<CallToolResult, McpError> {
    envelope_result(client.get_user(&params.user_id).await)
}

/// Get a workspace, falling back to `default_workspace`
pub async fn get_workspace(
    client: &BusinessMapClient,
    default_workspace: Option<&str>,
    params: WorkspaceParams,
) -> Result<CallToolResult, McpError> {
    let workspace_id = params
        .workspace_id
        .as_deref()
        .filter(|id| !id.is_empty())
        .or(default_workspace)
        .ok_or_else(|| {
            invalid_params("workspace_id is required when no default workspace is configured")
        })?;

    envelope_result(client.get_workspace(workspace_id).await)
}
