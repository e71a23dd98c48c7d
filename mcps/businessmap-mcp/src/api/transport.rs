//! HTTP transport for the Businessmap REST API

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Method};
use serde_json::Value;
use tracing::{debug, instrument};

use super::error::{ApiError, ApiResult};
use crate::config::ApiConfig;

/// Raw verbs against the API base URL
///
/// Implementations return the decoded JSON body, `Value::Null` for an empty
/// body, and an error for any non-2xx status.
#[async_trait]
pub trait RestTransport: Send + Sync {
    async fn request(&self, method: Method, path: &str, body: Option<Value>) -> ApiResult<Value>;

    async fn get(&self, path: &str) -> ApiResult<Value> {
        self.request(Method::GET, path, None).await
    }

    async fn post(&self, path: &str, body: Value) -> ApiResult<Value> {
        self.request(Method::POST, path, Some(body)).await
    }

    async fn patch(&self, path: &str, body: Value) -> ApiResult<Value> {
        self.request(Method::PATCH, path, Some(body)).await
    }

    async fn put(&self, path: &str) -> ApiResult<Value> {
        self.request(Method::PUT, path, None).await
    }

    async fn delete(&self, path: &str) -> ApiResult<Value> {
        self.request(Method::DELETE, path, None).await
    }
}

/// [`RestTransport`] over reqwest with the static `APIKEY` header
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(config: &ApiConfig) -> ApiResult<Self> {
        let mut headers = HeaderMap::new();
        let key = HeaderValue::from_str(&config.key).map_err(|_| ApiError::InvalidApiKey)?;
        headers.insert("APIKEY", key);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .user_agent(concat!("businessmap-mcp/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl RestTransport for HttpTransport {
    #[instrument(skip(self, method, body), fields(method = %method))]
    async fn request(&self, method: Method, path: &str, body: Option<Value>) -> ApiResult<Value> {
        let url = format!("{}{}", self.base_url, path);
        debug!("sending request to {}", url);

        let mut request = self.client.request(method, &url);
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = upstream_message(&text).unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("unknown status")
                    .to_string()
            });
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        decode_body(&text)
    }
}

fn decode_body(text: &str) -> ApiResult<Value> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_str(text)?)
}

/// Pull a human-readable message out of an error body, either top-level
/// `message` or nested `error.message`
fn upstream_message(text: &str) -> Option<String> {
    let value: Value = serde_json::from_str(text).ok()?;
    value
        .get("message")
        .or_else(|| value.pointer("/error/message"))
        .and_then(Value::as_str)
        .map(str::to_string)
}

#[cfg(test)]
pub(crate) mod mock {
    //! Scripted transport for unit tests

    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq)]
    pub struct RecordedCall {
        pub method: Method,
        pub path: String,
        pub body: Option<Value>,
    }

    /// Replays queued results in order and records every request
    #[derive(Default)]
    pub struct ScriptedTransport {
        responses: Mutex<VecDeque<ApiResult<Value>>>,
        calls: Mutex<Vec<RecordedCall>>,
    }

    impl ScriptedTransport {
        pub fn new(responses: Vec<ApiResult<Value>>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn calls(&self) -> Vec<RecordedCall> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl RestTransport for ScriptedTransport {
        async fn request(&self, method: Method, path: &str, body: Option<Value>) -> ApiResult<Value> {
            self.calls.lock().unwrap().push(RecordedCall {
                method,
                path: path.to_string(),
                body,
            });
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Ok(Value::Null))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_empty_body_is_null() {
        assert_eq!(decode_body("").unwrap(), Value::Null);
        assert_eq!(decode_body("  \n").unwrap(), Value::Null);
    }

    #[test]
    fn test_decode_invalid_body() {
        assert!(matches!(decode_body("<html>"), Err(ApiError::Decode(_))));
    }

    #[test]
    fn test_upstream_message_shapes() {
        assert_eq!(
            upstream_message(r#"{"message":"Invalid card"}"#).as_deref(),
            Some("Invalid card")
        );
        assert_eq!(
            upstream_message(r#"{"error":{"code":"CD001","message":"No such card"}}"#).as_deref(),
            Some("No such card")
        );
        assert_eq!(upstream_message("Bad Gateway"), None);
    }

    #[test]
    fn test_rejects_unprintable_api_key() {
        let config = ApiConfig {
            url: "https://acme.kanbanize.com/api/v2".to_string(),
            key: "bad\nkey".to_string(),
        };
        assert!(matches!(
            HttpTransport::new(&config),
            Err(ApiError::InvalidApiKey)
        ));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let config = ApiConfig {
            url: "https://acme.kanbanize.com/api/v2/".to_string(),
            key: "key".to_string(),
        };
        let transport = HttpTransport::new(&config).unwrap();
        assert_eq!(transport.base_url, "https://acme.kanbanize.com/api/v2");
    }

    #[tokio::test]
    async fn test_default_verbs_route_through_request() {
        let transport = mock::ScriptedTransport::new(vec![Ok(json!({ "ok": true }))]);
        let value = transport.patch("/cards/1", json!({ "a": 1 })).await.unwrap();
        assert_eq!(value, json!({ "ok": true }));

        let calls = transport.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].method, Method::PATCH);
        assert_eq!(calls[0].body, Some(json!({ "a": 1 })));
    }
}
