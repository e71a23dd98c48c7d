//! `user://me` resource
//!
//! Serves the API key owner's profile to clients that read context through
//! `resources/read` rather than tool calls.

use rmcp::model::{
    AnnotateAble, ListResourcesResult, RawResource, ReadResourceResult, ResourceContents,
};
use serde_json::json;

use mcp_common::McpError;

use crate::api::BusinessMapClient;

pub const ME_RESOURCE_URI: &str = "user://me";
const ME_RESOURCE_NAME: &str = "user-info";

pub fn list_resources() -> ListResourcesResult {
    let mut me = RawResource::new(ME_RESOURCE_URI, ME_RESOURCE_NAME);
    me.description = Some("Data about the user owning the API key".to_string());
    me.mime_type = Some("application/json".to_string());

    ListResourcesResult::with_all_items(vec![me.no_annotation()])
}

/// Read a resource by URI
///
/// An upstream failure yields empty text rather than an error, so clients
/// attaching this resource as context are never blocked by it.
pub async fn read_resource(
    client: &BusinessMapClient,
    uri: &str,
) -> Result<ReadResourceResult, McpError> {
    if uri != ME_RESOURCE_URI {
        return Err(McpError::resource_not_found(
            format!("unknown resource: {uri}"),
            Some(json!({ "uri": uri })),
        ));
    }

    let envelope = client.get_me().await;
    let text = match envelope.data {
        Some(data) if envelope.error.is_none() => data.to_string(),
        _ => String::new(),
    };

    Ok(ReadResourceResult {
        contents: vec![ResourceContents::text(text, uri)],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::transport::mock::ScriptedTransport;
    use crate::api::ApiError;
    use std::sync::Arc;

    fn text_of(result: &ReadResourceResult) -> &str {
        match &result.contents[0] {
            ResourceContents::TextResourceContents { text, .. } => text,
            other => panic!("expected text contents, got {other:?}"),
        }
    }

    #[test]
    fn test_lists_me_resource() {
        let result = list_resources();
        assert_eq!(result.resources.len(), 1);
        assert_eq!(result.resources[0].uri, ME_RESOURCE_URI);
        assert_eq!(result.resources[0].name, ME_RESOURCE_NAME);
    }

    #[tokio::test]
    async fn test_read_me() {
        let transport = Arc::new(ScriptedTransport::new(vec![Ok(
            json!({"data": {"user_id": 3, "username": "ana"}}),
        )]));
        let client = BusinessMapClient::new(transport.clone());

        let result = read_resource(&client, ME_RESOURCE_URI).await.unwrap();

        let value: serde_json::Value = serde_json::from_str(text_of(&result)).unwrap();
        assert_eq!(value["data"]["username"], "ana");
        assert_eq!(transport.calls()[0].path, "/me");
    }

    #[tokio::test]
    async fn test_read_me_upstream_failure_is_empty() {
        let transport = Arc::new(ScriptedTransport::new(vec![Err(ApiError::Status {
            status: 401,
            message: "Unauthorized".to_string(),
        })]));
        let client = BusinessMapClient::new(transport);

        let result = read_resource(&client, ME_RESOURCE_URI).await.unwrap();
        assert_eq!(text_of(&result), "");
    }

    #[tokio::test]
    async fn test_unknown_uri() {
        let transport = Arc::new(ScriptedTransport::new(vec![]));
        let client = BusinessMapClient::new(transport.clone());

        assert!(read_resource(&client, "user://you").await.is_err());
        assert!(transport.calls().is_empty());
    }
}
