//! Comment handler implementations

use mcp_common::{invalid_params, CallToolResult, McpError};

use crate::api::BusinessMapClient;
use crate::params::{
    CardParams, CommentAddParams, CommentParams, CommentUpdateParams, FormattedCommentParams,
};
use crate::writer::CommentWriter;

use super::envelope_result;

pub async fn get_card_comments(
    client: &BusinessMapClient,
    params: CardParams,
) -> Result<CallToolResult, McpError> {
    envelope_result(client.get_card_comments(&params.card_id).await)
}

pub async fn get_card_comment(
    client: &BusinessMapClient,
    params: CommentParams,
) -> Result<CallToolResult, McpError> {
    envelope_result(
        client
            .get_card_comment(&params.card_id, &params.comment_id)
            .await,
    )
}

pub async fn add_card_comment(
    client: &BusinessMapClient,
    params: CommentAddParams,
) -> Result<CallToolResult, McpError> {
    envelope_result(
        client
            .add_card_comment(&params.card_id, &params.comment)
            .await,
    )
}

/// Create a comment and apply HTML formatting to it in one operation
///
/// Blank content is rejected before anything is created.
pub async fn add_formatted_card_comment(
    client: &BusinessMapClient,
    params: FormattedCommentParams,
) -> Result<CallToolResult, McpError> {
    if params.content.trim().is_empty() {
        return Err(invalid_params("content must not be empty"));
    }

    let envelope = CommentWriter::new(client)
        .add_formatted_comment(&params.card_id, &params.content)
        .await;
    envelope_result(envelope)
}

pub async fn update_card_comment(
    client: &BusinessMapClient,
    params: CommentUpdateParams,
) -> Result<CallToolResult, McpError> {
    envelope_result(
        client
            .update_card_comment(&params.card_id, &params.comment_id, &params.comment)
            .await,
    )
}

pub async fn delete_card_comment(
    client: &BusinessMapClient,
    params: CommentParams,
) -> Result<CallToolResult, McpError> {
    envelope_result(
        client
            .delete_card_comment(&params.card_id, &params.comment_id)
            .await,
    )
}
