//! Card, linked card and co-owner handler implementations

use mcp_common::{invalid_params, CallToolResult, McpError};

use crate::api::{BusinessMapClient, CardQuery};
use crate::params::{CardParams, CardSearchParams, CoOwnerParams};

use super::envelope_result;

const CARD_STATES: &[&str] = &["active", "archived", "discarded"];

pub async fn get_card(
    client: &BusinessMapClient,
    params: CardParams,
) -> Result<CallToolResult, McpError> {
    envelope_result(client.get_card(&params.card_id).await)
}

/// Search cards; linked cards, co-owners and subtasks are expanded inline
pub async fn get_cards(
    client: &BusinessMapClient,
    params: CardSearchParams,
) -> Result<CallToolResult, McpError> {
    if !CARD_STATES.contains(&params.state.as_str()) {
        return Err(invalid_params(format!(
            "state must be one of {}, got '{}'",
            CARD_STATES.join(", "),
            params.state
        )));
    }
    if params.is_blocked > 1 {
        return Err(invalid_params("is_blocked must be 0 or 1"));
    }

    let query = CardQuery {
        state: params.state,
        is_blocked: params.is_blocked,
        board_ids: params.board_ids,
        card_ids: params.card_ids,
        owner_user_ids: params.owner_user_ids,
    };
    envelope_result(client.get_cards(&query).await)
}

pub async fn get_linked_cards(
    client: &BusinessMapClient,
    params: CardParams,
) -> Result<CallToolResult, McpError> {
    envelope_result(client.get_linked_cards(&params.card_id).await)
}

pub async fn get_card_co_owners(
    client: &BusinessMapClient,
    params: CardParams,
) -> Result<CallToolResult, McpError> {
    envelope_result(client.get_card_co_owners(&params.card_id).await)
}

pub async fn check_card_co_owner(
    client: &BusinessMapClient,
    params: CoOwnerParams,
) -> Result<CallToolResult, McpError> {
    envelope_result(
        client
            .check_card_co_owner(&params.card_id, &params.user_id)
            .await,
    )
}

pub async fn add_card_co_owner(
    client: &BusinessMapClient,
    params: CoOwnerParams,
) -> Result<CallToolResult, McpError> {
    envelope_result(
        client
            .add_card_co_owner(&params.card_id, &params.user_id)
            .await,
    )
}

pub async fn remove_card_co_owner(
    client: &BusinessMapClient,
    params: CoOwnerParams,
) -> Result<CallToolResult, McpError> {
    envelope_result(
        client
            .remove_card_co_owner(&params.card_id, &params.user_id)
            .await,
    )
}
