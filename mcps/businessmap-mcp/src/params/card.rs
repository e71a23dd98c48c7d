//! Card and co-owner parameter types

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for tools addressing a single card
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CardParams {
    #[schemars(description = "A card id")]
    pub card_id: String,
}

/// Parameters for searching cards
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CardSearchParams {
    #[serde(default = "default_state")]
    #[schemars(description = "State of the cards to get: active (default), archived or discarded")]
    pub state: String,

    #[schemars(description = "Comma-separated board ids to search, e.g. 123,888")]
    pub board_ids: Option<String>,

    #[schemars(description = "Comma-separated assignee user ids, e.g. 123,888")]
    pub owner_user_ids: Option<String>,

    #[schemars(description = "Comma-separated card ids, e.g. 123,888")]
    pub card_ids: Option<String>,

    #[serde(default)]
    #[schemars(description = "1 to get only blocked cards, 0 (default) to get only non-blocked cards")]
    pub is_blocked: u8,
}

fn default_state() -> String {
    "active".to_string()
}

/// Parameters for co-owner tools
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CoOwnerParams {
    #[schemars(description = "A card id")]
    pub card_id: String,

    #[schemars(description = "A user id")]
    pub user_id: String,
}
