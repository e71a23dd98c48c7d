//! Lane parameter types

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct LaneParams {
    #[schemars(description = "A lane id")]
    pub lane_id: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct LaneCreateParams {
    #[schemars(description = "Board id the lane belongs to")]
    pub board_id: String,

    #[schemars(description = "Workflow id")]
    pub workflow_id: u64,

    #[schemars(description = "Lane position")]
    pub position: u32,

    #[schemars(description = "Lane name")]
    pub name: String,

    #[schemars(description = "Lane description")]
    pub description: Option<String>,

    #[schemars(description = "Lane color, e.g. 34a97b")]
    pub color: String,
}

/// Only the fields that are set are changed
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct LaneUpdateParams {
    #[schemars(description = "A lane id")]
    pub lane_id: String,

    #[schemars(description = "Workflow id")]
    pub workflow_id: Option<u64>,

    #[schemars(description = "Lane position")]
    pub position: Option<u32>,

    #[schemars(description = "Lane name")]
    pub name: Option<String>,

    #[schemars(description = "Lane description")]
    pub description: Option<String>,

    #[schemars(description = "Lane color")]
    pub color: Option<String>,
}
