//! Content formatting parameter types

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FormatContentParams {
    #[schemars(description = "Plain text or light markdown to convert to HTML")]
    pub content: String,

    #[serde(default)]
    #[schemars(description = "When true, content that already contains HTML tags is returned unchanged")]
    pub preserve_existing: bool,
}
