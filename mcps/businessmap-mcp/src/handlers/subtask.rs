//! Subtask handler implementations
//!
//! Descriptions go to the API in one call on both create and update.

use mcp_common::{invalid_params, CallToolResult, McpError};

use crate::api::BusinessMapClient;
use crate::params::{CardParams, SubtaskAddParams, SubtaskParams, SubtaskUpdateParams};

use super::envelope_result;

pub async fn get_card_subtasks(
    client: &BusinessMapClient,
    params: CardParams,
) -> Result<CallToolResult, McpError> {
    envelope_result(client.get_card_subtasks(&params.card_id).await)
}

pub async fn get_card_subtask(
    client: &BusinessMapClient,
    params: SubtaskParams,
) -> Result<CallToolResult, McpError> {
    envelope_result(
        client
            .get_card_subtask(&params.card_id, &params.subtask_id)
            .await,
    )
}

pub async fn add_card_subtask(
    client: &BusinessMapClient,
    params: SubtaskAddParams,
) -> Result<CallToolResult, McpError> {
    envelope_result(
        client
            .add_card_subtask(&params.card_id, &params.description)
            .await,
    )
}

pub async fn update_card_subtask(
    client: &BusinessMapClient,
    params: SubtaskUpdateParams,
) -> Result<CallToolResult, McpError> {
    let is_finished = match params.is_finished {
        0 => false,
        1 => true,
        other => {
            return Err(invalid_params(format!(
                "isFinished must be 0 or 1, got {other}"
            )))
        }
    };

    envelope_result(
        client
            .update_card_subtask(
                &params.card_id,
                &params.subtask_id,
                &params.description,
                is_finished,
            )
            .await,
    )
}

pub async fn delete_card_subtask(
    client: &BusinessMapClient,
    params: SubtaskParams,
) -> Result<CallToolResult, McpError> {
    envelope_result(
        client
            .delete_card_subtask(&params.card_id, &params.subtask_id)
            .await,
    )
}
