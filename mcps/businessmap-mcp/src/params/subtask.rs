//! Subtask parameter types

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubtaskParams {
    #[schemars(description = "A card id")]
    pub card_id: String,

    #[schemars(description = "A subtask id")]
    pub subtask_id: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubtaskAddParams {
    #[schemars(description = "A card id")]
    pub card_id: String,

    #[schemars(description = "Subtask description; HTML is accepted directly")]
    pub description: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubtaskUpdateParams {
    #[schemars(description = "A card id")]
    pub card_id: String,

    #[schemars(description = "A subtask id")]
    pub subtask_id: String,

    #[schemars(description = "Subtask description; HTML is accepted directly")]
    pub description: String,

    #[schemars(description = "1 if the subtask is finished, 0 if not")]
    pub is_finished: u8,
}
