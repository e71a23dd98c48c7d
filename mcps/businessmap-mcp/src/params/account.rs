//! User and workspace parameter types

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct UserParams {
    #[schemars(description = "A user id")]
    pub user_id: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct WorkspaceParams {
    #[schemars(description = "A workspace id. Falls back to the configured default workspace when omitted")]
    pub workspace_id: Option<String>,
}
