//! Rich-formatted comment creation
//!
//! The Businessmap comment API only takes plain text on creation, while
//! the update endpoint accepts HTML with inline styles. A formatted comment
//! is therefore written in two phases:
//!
//! 1. create the comment with a plain-text rendition of the content
//! 2. pull the new comment's id out of the creation payload
//! 3. replace the comment text with the HTML
//!
//! Callers get one merged result. If phase 3 fails the plain-text comment
//! remains on the card; the update error is returned as is and nothing is
//! rolled back. Two calls for the same card are not ordered against each
//! other, and repeating a call creates a second comment.

use serde_json::{Map, Value};
use tracing::{info, instrument, warn};

use crate::api::{BusinessMapClient, Envelope, ErrorBody};
use crate::format::{contains_html, format_content_to_html, html_to_plain_text};

/// Sent on creation when the content has no text at all (e.g. only `<hr>`)
pub const PLACEHOLDER_TEXT: &str = "Comment";

/// Content for a formatted comment, split into its two renditions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentContent {
    /// Non-empty text for the creation call
    pub plain: String,
    /// Final comment body for the update call
    pub html: String,
}

impl CommentContent {
    /// Content holding a `<...>` pair is taken as caller-authored HTML and
    /// reduced to text for creation. Anything else is raw content: it is
    /// sent as written on creation and formatted for the update.
    pub fn from_input(content: &str) -> Self {
        let (plain, html) = if contains_html(content) {
            (html_to_plain_text(content), content.to_string())
        } else {
            (content.trim().to_string(), format_content_to_html(content))
        };

        let plain = if plain.is_empty() {
            PLACEHOLDER_TEXT.to_string()
        } else {
            plain
        };

        Self { plain, html }
    }
}

type IdentifierLookup = fn(&Value) -> Option<String>;

/// Where the creation payload may carry the new comment id, tried in order
const COMMENT_ID_LOOKUPS: &[(&str, IdentifierLookup)] =
    &[("nested", nested_comment_id), ("flat", flat_comment_id)];

fn nested_comment_id(payload: &Value) -> Option<String> {
    id_at(payload, "/data/comment_id")
}

fn flat_comment_id(payload: &Value) -> Option<String> {
    id_at(payload, "/comment_id")
}

fn id_at(payload: &Value, pointer: &str) -> Option<String> {
    match payload.pointer(pointer)? {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => None,
    }
}

/// Comment id from a creation payload, as a string
pub fn extract_comment_id(payload: &Value) -> Option<String> {
    COMMENT_ID_LOOKUPS.iter().find_map(|(shape, lookup)| {
        let id = lookup(payload)?;
        tracing::debug!(shape, comment_id = %id, "found comment id");
        Some(id)
    })
}

/// Merge the comment id into the update payload; the id always wins
fn merge_result(comment_id: String, update: Option<Value>) -> Value {
    let mut merged = match update {
        Some(Value::Object(fields)) => fields,
        Some(other) => {
            let mut fields = Map::new();
            fields.insert("data".to_string(), other);
            fields
        }
        None => Map::new(),
    };
    merged.insert("comment_id".to_string(), Value::String(comment_id));
    Value::Object(merged)
}

/// Writes rich-formatted comments through the two-phase protocol
pub struct CommentWriter<'a> {
    client: &'a BusinessMapClient,
}

impl<'a> CommentWriter<'a> {
    pub fn new(client: &'a BusinessMapClient) -> Self {
        Self { client }
    }

    /// Create a formatted comment on `card_id`
    ///
    /// Every failure comes back as an error envelope: the creation error
    /// unchanged, `NO_DATA` for an empty creation response,
    /// `NO_IDENTIFIER` when no comment id can be found, or the update
    /// error unchanged. The update is only attempted once an id is known.
    #[instrument(skip(self, content), fields(content_len = content.len()))]
    pub async fn add_formatted_comment(&self, card_id: &str, content: &str) -> Envelope {
        let content = CommentContent::from_input(content);

        let created = self.client.add_card_comment(card_id, &content.plain).await;
        if created.is_error() {
            return created;
        }
        let Some(payload) = created.data else {
            return Envelope::err(ErrorBody::no_data(
                "Failed to create comment - no data returned",
            ));
        };

        let Some(comment_id) = extract_comment_id(&payload) else {
            warn!(%payload, "creation response carried no comment id");
            return Envelope::err(ErrorBody::no_identifier(
                "Failed to get comment_id from creation response",
                &payload,
            ));
        };

        info!(%comment_id, "comment created as plain text, applying HTML");

        let updated = self
            .client
            .update_card_comment(card_id, &comment_id, &content.html)
            .await;
        if updated.is_error() {
            warn!(%comment_id, "HTML update failed; comment remains as plain text");
            return updated;
        }

        Envelope::ok(merge_result(comment_id, updated.data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::transport::mock::ScriptedTransport;
    use crate::api::{ApiError, ApiResult, ErrorKind};
    use reqwest::Method;
    use serde_json::json;
    use std::sync::Arc;

    fn setup(responses: Vec<ApiResult<Value>>) -> (BusinessMapClient, Arc<ScriptedTransport>) {
        let transport = Arc::new(ScriptedTransport::new(responses));
        (BusinessMapClient::new(transport.clone()), transport)
    }

    #[test]
    fn test_content_from_html() {
        let content = CommentContent::from_input("<h3>Hi &amp; bye</h3><p>See you</p>");
        assert_eq!(content.plain, "Hi & bye See you");
        assert_eq!(content.html, "<h3>Hi &amp; bye</h3><p>See you</p>");
    }

    #[test]
    fn test_content_from_raw() {
        let content = CommentContent::from_input("**Done** 🎉\n- a\n- b");
        assert_eq!(content.plain, "**Done** 🎉\n- a\n- b");
        assert_eq!(
            content.html,
            "<p><strong>Done</strong> 🎉</p>\n<ul><li>a</li><li>b</li></ul>"
        );
    }

    #[test]
    fn test_placeholder_for_empty_text() {
        assert_eq!(CommentContent::from_input("<hr>").plain, PLACEHOLDER_TEXT);
        assert_eq!(CommentContent::from_input("   ").plain, PLACEHOLDER_TEXT);
    }

    #[test]
    fn test_extract_nested_then_flat() {
        assert_eq!(
            extract_comment_id(&json!({ "data": { "comment_id": 42 } })).as_deref(),
            Some("42")
        );
        assert_eq!(
            extract_comment_id(&json!({ "comment_id": "17" })).as_deref(),
            Some("17")
        );
        assert_eq!(
            extract_comment_id(&json!({ "data": { "comment_id": 1 }, "comment_id": 2 })).as_deref(),
            Some("1")
        );
        assert_eq!(extract_comment_id(&json!({ "data": { "text": "x" } })), None);
        assert_eq!(extract_comment_id(&json!({ "comment_id": null })), None);
    }

    #[tokio::test]
    async fn test_two_phase_success_merges_id() {
        let (client, transport) = setup(vec![
            Ok(json!({ "data": { "comment_id": 42, "type": "plain", "text": "Title" } })),
            Ok(json!({ "data": { "comment_id": 42, "type": "html", "text": "<h3>Title</h3>" } })),
        ]);

        let envelope = CommentWriter::new(&client)
            .add_formatted_comment("100", "<h3>Title</h3>")
            .await;

        assert_eq!(
            envelope.data,
            Some(json!({
                "comment_id": "42",
                "data": { "comment_id": 42, "type": "html", "text": "<h3>Title</h3>" }
            }))
        );
        assert!(envelope.error.is_none());

        let calls = transport.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].method, Method::POST);
        assert_eq!(calls[0].path, "/cards/100/comments");
        assert_eq!(calls[0].body, Some(json!({ "text": "Title" })));
        assert_eq!(calls[1].method, Method::PATCH);
        assert_eq!(calls[1].path, "/cards/100/comments/42");
        assert_eq!(calls[1].body, Some(json!({ "text": "<h3>Title</h3>" })));
    }

    #[tokio::test]
    async fn test_top_level_id_in_update_is_overridden() {
        let (client, _) = setup(vec![
            Ok(json!({ "data": { "comment_id": 42 } })),
            Ok(json!({ "comment_id": 42, "text": "<p>x</p>" })),
        ]);

        let envelope = CommentWriter::new(&client)
            .add_formatted_comment("1", "x")
            .await;

        assert_eq!(
            envelope.data,
            Some(json!({ "comment_id": "42", "text": "<p>x</p>" }))
        );
    }

    #[tokio::test]
    async fn test_raw_content_is_formatted_for_update() {
        let (client, transport) = setup(vec![
            Ok(json!({ "data": { "comment_id": 7 } })),
            Ok(json!({ "data": {} })),
        ]);

        CommentWriter::new(&client)
            .add_formatted_comment("1", "- a\n- b")
            .await;

        let calls = transport.calls();
        assert_eq!(calls[0].body, Some(json!({ "text": "- a\n- b" })));
        assert_eq!(
            calls[1].body,
            Some(json!({ "text": "<ul><li>a</li><li>b</li></ul>" }))
        );
    }

    #[tokio::test]
    async fn test_creation_error_stops_before_update() {
        let (client, transport) = setup(vec![Err(ApiError::Status {
            status: 400,
            message: "Card is archived".to_string(),
        })]);

        let envelope = CommentWriter::new(&client)
            .add_formatted_comment("1", "<p>hello</p>")
            .await;

        let error = envelope.error.unwrap();
        assert_eq!(error.code, ErrorKind::ApiError);
        assert!(error.message.contains("Card is archived"));
        assert_eq!(transport.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_creation_response_is_no_data() {
        let (client, transport) = setup(vec![Ok(Value::Null)]);

        let envelope = CommentWriter::new(&client)
            .add_formatted_comment("1", "hello")
            .await;

        assert_eq!(envelope.error.unwrap().code, ErrorKind::NoData);
        assert_eq!(transport.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_missing_identifier_stops_before_update() {
        let (client, transport) = setup(vec![Ok(json!({ "data": { "text": "hello" } }))]);

        let envelope = CommentWriter::new(&client)
            .add_formatted_comment("1", "hello")
            .await;

        let error = envelope.error.unwrap();
        assert_eq!(error.code, ErrorKind::NoIdentifier);
        assert!(error.reference.contains(r#""text":"hello""#));
        assert_eq!(transport.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_update_error_is_returned_unchanged() {
        let (client, transport) = setup(vec![
            Ok(json!({ "data": { "comment_id": 9 } })),
            Err(ApiError::Status {
                status: 500,
                message: "Internal Server Error".to_string(),
            }),
        ]);

        let envelope = CommentWriter::new(&client)
            .add_formatted_comment("1", "hello")
            .await;

        let error = envelope.error.unwrap();
        assert_eq!(error.code, ErrorKind::ApiError);
        assert!(error.message.contains("500"));
        assert!(envelope.data.is_none());
        assert_eq!(transport.calls().len(), 2);
    }
}
