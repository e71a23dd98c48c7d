//! Endpoint-level client for the Businessmap API

use std::sync::Arc;

use serde::Serialize;
use serde_json::{json, Value};

use super::envelope::Envelope;
use super::transport::RestTransport;

/// Filters for the card search endpoint
#[derive(Debug, Clone, Default)]
pub struct CardQuery {
    /// `active`, `archived` or `discarded`
    pub state: String,
    /// 1 for blocked cards only, 0 for unblocked only
    pub is_blocked: u8,
    /// Comma-separated ids
    pub board_ids: Option<String>,
    pub card_ids: Option<String>,
    pub owner_user_ids: Option<String>,
}

impl CardQuery {
    fn to_path(&self) -> String {
        let mut query = url::form_urlencoded::Serializer::new(String::new());
        query
            .append_pair("state", &self.state)
            .append_pair("is_blocked", &self.is_blocked.to_string())
            .append_pair("expand", "linked_cards,co_owner_ids,subtasks");

        for (name, value) in [
            ("card_ids", &self.card_ids),
            ("board_ids", &self.board_ids),
            ("owner_user_ids", &self.owner_user_ids),
        ] {
            if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
                query.append_pair(name, value);
            }
        }

        format!("/cards?{}", query.finish())
    }
}

/// Body for lane creation
#[derive(Debug, Clone, Serialize)]
pub struct NewLane {
    pub workflow_id: u64,
    pub position: u32,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub color: String,
}

/// Partial lane update; only set fields are sent
#[derive(Debug, Clone, Default, Serialize)]
pub struct LaneChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workflow_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// One method per upstream endpoint, each resolving to an [`Envelope`]
#[derive(Clone)]
pub struct BusinessMapClient {
    transport: Arc<dyn RestTransport>,
}

impl BusinessMapClient {
    pub fn new(transport: Arc<dyn RestTransport>) -> Self {
        Self { transport }
    }

    async fn get(&self, path: &str) -> Envelope {
        Envelope::from_result(self.transport.get(path).await)
    }

    // ========================================================================
    // Account
    // ========================================================================

    pub async fn get_me(&self) -> Envelope {
        self.get("/me").await
    }

    pub async fn get_api_limits(&self) -> Envelope {
        self.get("/apiLimits").await
    }

    pub async fn get_user(&self, user_id: &str) -> Envelope {
        self.get(&format!("/users/{user_id}")).await
    }

    pub async fn get_workspace(&self, workspace_id: &str) -> Envelope {
        self.get(&format!("/workspaces/{workspace_id}")).await
    }

    // ========================================================================
    // Cards
    // ========================================================================

    pub async fn get_card(&self, card_id: &str) -> Envelope {
        self.get(&format!("/cards/{card_id}")).await
    }

    pub async fn get_cards(&self, query: &CardQuery) -> Envelope {
        self.get(&query.to_path()).await
    }

    pub async fn get_linked_cards(&self, card_id: &str) -> Envelope {
        self.get(&format!("/cards/{card_id}/linkedCards")).await
    }

    // ========================================================================
    // Comments
    // ========================================================================

    pub async fn get_card_comments(&self, card_id: &str) -> Envelope {
        self.get(&format!("/cards/{card_id}/comments")).await
    }

    pub async fn get_card_comment(&self, card_id: &str, comment_id: &str) -> Envelope {
        self.get(&format!("/cards/{card_id}/comments/{comment_id}"))
            .await
    }

    /// Creation only accepts plain text; see [`crate::writer`] for rich content
    pub async fn add_card_comment(&self, card_id: &str, text: &str) -> Envelope {
        let result = self
            .transport
            .post(&format!("/cards/{card_id}/comments"), json!({ "text": text }))
            .await;
        Envelope::from_result(result)
    }

    /// Replaces the comment text; HTML with inline styles is accepted here
    pub async fn update_card_comment(&self, card_id: &str, comment_id: &str, text: &str) -> Envelope {
        let result = self
            .transport
            .patch(
                &format!("/cards/{card_id}/comments/{comment_id}"),
                json!({ "text": text }),
            )
            .await;
        Envelope::from_result(result)
    }

    pub async fn delete_card_comment(&self, card_id: &str, comment_id: &str) -> Envelope {
        let result = self
            .transport
            .delete(&format!("/cards/{card_id}/comments/{comment_id}"))
            .await;
        Envelope::from_result(result)
    }

    // ========================================================================
    // Co-owners
    // ========================================================================

    pub async fn get_card_co_owners(&self, card_id: &str) -> Envelope {
        self.get(&format!("/cards/{card_id}/coOwners")).await
    }

    /// Data is `true` when the user is a co-owner; a non-co-owner is a 404
    pub async fn check_card_co_owner(&self, card_id: &str, user_id: &str) -> Envelope {
        let result = self
            .transport
            .get(&format!("/cards/{card_id}/coOwners/{user_id}"))
            .await;
        Envelope::from_result(result.map(|_| Value::Bool(true)))
    }

    pub async fn add_card_co_owner(&self, card_id: &str, user_id: &str) -> Envelope {
        let result = self
            .transport
            .put(&format!("/cards/{card_id}/coOwners/{user_id}"))
            .await;
        Envelope::from_result(result.map(|_| json!("Added the user as a co-owner of the card.")))
    }

    pub async fn remove_card_co_owner(&self, card_id: &str, user_id: &str) -> Envelope {
        let result = self
            .transport
            .delete(&format!("/cards/{card_id}/coOwners/{user_id}"))
            .await;
        Envelope::from_result(result.map(|_| json!("Removed the user as a co-owner of the card.")))
    }

    // ========================================================================
    // Subtasks
    // ========================================================================
    //
    // Subtask descriptions take HTML on both create and update, so these are
    // single calls; no plain-text-then-update round trip.

    pub async fn get_card_subtasks(&self, card_id: &str) -> Envelope {
        self.get(&format!("/cards/{card_id}/subtasks")).await
    }

    pub async fn get_card_subtask(&self, card_id: &str, subtask_id: &str) -> Envelope {
        self.get(&format!("/cards/{card_id}/subtasks/{subtask_id}"))
            .await
    }

    pub async fn add_card_subtask(&self, card_id: &str, description: &str) -> Envelope {
        let result = self
            .transport
            .post(
                &format!("/cards/{card_id}/subtasks"),
                json!({ "description": description }),
            )
            .await;
        Envelope::from_result(result)
    }

    pub async fn update_card_subtask(
        &self,
        card_id: &str,
        subtask_id: &str,
        description: &str,
        is_finished: bool,
    ) -> Envelope {
        let result = self
            .transport
            .patch(
                &format!("/cards/{card_id}/subtasks/{subtask_id}"),
                json!({
                    "description": description,
                    "is_finished": u8::from(is_finished),
                }),
            )
            .await;
        Envelope::from_result(result)
    }

    pub async fn delete_card_subtask(&self, card_id: &str, subtask_id: &str) -> Envelope {
        let result = self
            .transport
            .delete(&format!("/cards/{card_id}/subtasks/{subtask_id}"))
            .await;
        Envelope::from_result(result.map(|_| json!("The card subtask has been deleted.")))
    }

    // ========================================================================
    // Boards, columns, lanes
    // ========================================================================

    /// Only boards the API key's user is assigned to
    pub async fn get_boards(&self) -> Envelope {
        self.get("/boards?if_assigned=1").await
    }

    pub async fn get_board(&self, board_id: &str) -> Envelope {
        self.get(&format!("/boards/{board_id}")).await
    }

    pub async fn get_columns(&self, board_id: &str) -> Envelope {
        self.get(&format!("/boards/{board_id}/columns")).await
    }

    pub async fn get_column(&self, board_id: &str, column_id: &str) -> Envelope {
        self.get(&format!("/boards/{board_id}/columns/{column_id}"))
            .await
    }

    pub async fn get_lanes(&self, board_id: &str) -> Envelope {
        self.get(&format!("/boards/{board_id}/lanes")).await
    }

    pub async fn get_lane(&self, lane_id: &str) -> Envelope {
        self.get(&format!("/lanes/{lane_id}")).await
    }

    pub async fn create_lane(&self, board_id: &str, lane: &NewLane) -> Envelope {
        let body = match serde_json::to_value(lane) {
            Ok(body) => body,
            Err(e) => return Envelope::from_result(Err(e.into())),
        };
        let result = self
            .transport
            .post(&format!("/boards/{board_id}/lanes"), body)
            .await;
        Envelope::from_result(result)
    }

    pub async fn update_lane(&self, lane_id: &str, changes: &LaneChanges) -> Envelope {
        let body = match serde_json::to_value(changes) {
            Ok(body) => body,
            Err(e) => return Envelope::from_result(Err(e.into())),
        };
        let result = self
            .transport
            .patch(&format!("/lanes/{lane_id}"), body)
            .await;
        Envelope::from_result(result)
    }

    pub async fn delete_lane(&self, lane_id: &str) -> Envelope {
        let result = self.transport.delete(&format!("/lanes/{lane_id}")).await;
        Envelope::from_result(result.map(|_| json!("The lane has been deleted.")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::transport::mock::ScriptedTransport;
    use crate::api::{ApiError, ErrorKind};
    use reqwest::Method;

    fn client_with(responses: Vec<crate::api::ApiResult<Value>>) -> (BusinessMapClient, Arc<ScriptedTransport>) {
        let transport = Arc::new(ScriptedTransport::new(responses));
        (BusinessMapClient::new(transport.clone()), transport)
    }

    #[test]
    fn test_card_query_path() {
        let query = CardQuery {
            state: "active".to_string(),
            is_blocked: 0,
            board_ids: Some("123,888".to_string()),
            card_ids: None,
            owner_user_ids: Some(String::new()),
        };
        assert_eq!(
            query.to_path(),
            "/cards?state=active&is_blocked=0&expand=linked_cards%2Cco_owner_ids%2Csubtasks&board_ids=123%2C888"
        );
    }

    #[tokio::test]
    async fn test_add_comment_posts_plain_text() {
        let (client, transport) = client_with(vec![Ok(json!({ "data": { "comment_id": 5 } }))]);
        let envelope = client.add_card_comment("10", "hello").await;
        assert_eq!(envelope.data, Some(json!({ "data": { "comment_id": 5 } })));

        let calls = transport.calls();
        assert_eq!(calls[0].method, Method::POST);
        assert_eq!(calls[0].path, "/cards/10/comments");
        assert_eq!(calls[0].body, Some(json!({ "text": "hello" })));
    }

    #[tokio::test]
    async fn test_update_subtask_encodes_flag_as_number() {
        let (client, transport) = client_with(vec![Ok(json!({ "data": {} }))]);
        client
            .update_card_subtask("10", "3", "<p>done</p>", true)
            .await;

        let calls = transport.calls();
        assert_eq!(calls[0].method, Method::PATCH);
        assert_eq!(calls[0].path, "/cards/10/subtasks/3");
        assert_eq!(
            calls[0].body,
            Some(json!({ "description": "<p>done</p>", "is_finished": 1 }))
        );
    }

    #[tokio::test]
    async fn test_check_co_owner_yields_true() {
        let (client, _) = client_with(vec![Ok(Value::Null)]);
        let envelope = client.check_card_co_owner("10", "7").await;
        assert_eq!(envelope.data, Some(Value::Bool(true)));
    }

    #[tokio::test]
    async fn test_check_co_owner_not_found_is_api_error() {
        let (client, _) = client_with(vec![Err(ApiError::Status {
            status: 404,
            message: "Not Found".to_string(),
        })]);
        let envelope = client.check_card_co_owner("10", "7").await;
        assert_eq!(envelope.error.unwrap().code, ErrorKind::ApiError);
    }

    #[tokio::test]
    async fn test_update_lane_sends_only_set_fields() {
        let (client, transport) = client_with(vec![Ok(json!({ "data": {} }))]);
        let changes = LaneChanges {
            name: Some("Expedite".to_string()),
            ..Default::default()
        };
        client.update_lane("4", &changes).await;

        let calls = transport.calls();
        assert_eq!(calls[0].path, "/lanes/4");
        assert_eq!(calls[0].body, Some(json!({ "name": "Expedite" })));
    }

    #[tokio::test]
    async fn test_delete_subtask_confirms() {
        let (client, transport) = client_with(vec![Ok(Value::Null)]);
        let envelope = client.delete_card_subtask("10", "3").await;
        assert_eq!(envelope.data, Some(json!("The card subtask has been deleted.")));
        assert_eq!(transport.calls()[0].method, Method::DELETE);
    }
}
