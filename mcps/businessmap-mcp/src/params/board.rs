//! Board and column parameter types

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct BoardParams {
    #[schemars(description = "A board id")]
    pub board_id: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ColumnParams {
    #[schemars(description = "A board id")]
    pub board_id: String,

    #[schemars(description = "A column id")]
    pub column_id: String,
}
