//! The `{data}` / `{error}` wrapper every API call resolves to

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::{ApiError, ApiResult};

const API_ERROR_REFERENCE: &str = "Check the logs for more details";

/// Failure categories surfaced to tool callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// The upstream call failed: transport, HTTP status or business error
    ApiError,
    /// The call succeeded but returned no payload
    NoData,
    /// A payload arrived but the expected identifier was not in it
    NoIdentifier,
    /// Anything else, normalised at the tool boundary
    UnknownError,
}

/// Error half of an [`Envelope`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: ErrorKind,
    pub message: String,
    pub reference: String,
}

impl ErrorBody {
    pub fn new(code: ErrorKind, message: impl Into<String>, reference: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            reference: reference.into(),
        }
    }

    pub fn api(error: &ApiError) -> Self {
        Self::new(ErrorKind::ApiError, error.to_string(), API_ERROR_REFERENCE)
    }

    pub fn no_data(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NoData, message, "Check API response")
    }

    /// Includes the raw payload so the unexpected shape can be diagnosed
    pub fn no_identifier(message: impl Into<String>, payload: &Value) -> Self {
        Self::new(
            ErrorKind::NoIdentifier,
            message,
            format!("Check API response structure. Response: {payload}"),
        )
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownError, message, API_ERROR_REFERENCE)
    }
}

/// Outcome of one API operation
///
/// At most one side is populated. An envelope with neither is a call that
/// succeeded at the transport level but returned nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T = Value> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
        }
    }

    pub fn err(error: ErrorBody) -> Self {
        Self {
            data: None,
            error: Some(error),
        }
    }

    pub fn empty() -> Self {
        Self {
            data: None,
            error: None,
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

impl Envelope<Value> {
    /// Wrap a transport result; a JSON `null` payload yields an empty envelope
    pub fn from_result(result: ApiResult<Value>) -> Self {
        match result {
            Ok(Value::Null) => Self::empty(),
            Ok(data) => Self::ok(data),
            Err(e) => {
                tracing::warn!(error = %e, "businessmap API call failed");
                Self::err(ErrorBody::api(&e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_codes_serialize_screaming_snake() {
        let body = ErrorBody::no_identifier("missing", &json!({ "x": 1 }));
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["code"], "NO_IDENTIFIER");
        assert!(value["reference"].as_str().unwrap().contains(r#"{"x":1}"#));

        let value = serde_json::to_value(ErrorBody::unknown("boom")).unwrap();
        assert_eq!(value["code"], "UNKNOWN_ERROR");
    }

    #[test]
    fn test_from_result_status_error() {
        let envelope = Envelope::from_result(Err(ApiError::Status {
            status: 404,
            message: "Card not found".to_string(),
        }));
        let error = envelope.error.unwrap();
        assert_eq!(error.code, ErrorKind::ApiError);
        assert!(error.message.contains("404"));
        assert!(error.message.contains("Card not found"));
        assert!(envelope.data.is_none());
    }

    #[test]
    fn test_from_result_null_is_empty() {
        let envelope = Envelope::from_result(Ok(Value::Null));
        assert_eq!(envelope, Envelope::empty());
    }

    #[test]
    fn test_serialized_envelope_omits_empty_side() {
        let value = serde_json::to_value(Envelope::ok(json!({ "card_id": 1 }))).unwrap();
        assert_eq!(value, json!({ "data": { "card_id": 1 } }));
    }
}
