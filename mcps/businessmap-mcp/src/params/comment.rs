//! Comment parameter types

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentParams {
    #[schemars(description = "A card id")]
    pub card_id: String,

    #[schemars(description = "A comment id")]
    pub comment_id: String,
}

/// Parameters for adding a plain-text comment
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentAddParams {
    #[schemars(description = "A card id")]
    pub card_id: String,

    #[schemars(description = "Comment text (plain text only)")]
    pub comment: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentUpdateParams {
    #[schemars(description = "A card id")]
    pub card_id: String,

    #[schemars(description = "A comment id")]
    pub comment_id: String,

    #[schemars(description = "New comment text; HTML with inline styles is accepted")]
    pub comment: String,
}

/// Parameters for adding a rich-formatted comment
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FormattedCommentParams {
    #[schemars(description = "A card id")]
    pub card_id: String,

    #[schemars(
        description = "Comment content. HTML (e.g. <h3>Title</h3><p>Paragraph</p>) is used as is; plain text or light markdown (### headings, **bold**, *italic*, [links](url), `code`, - lists, 1. lists) is converted to HTML. Emojis are preserved"
    )]
    pub content: String,
}
