//! Uniform result of a request.
//!
//! Every executor call returns a [`RequestResult`], whether the server
//! answered or not:
//!
//! | Variant    | Meaning                          | status | payload | error |
//! |------------|----------------------------------|--------|---------|-------|
//! | `Success`  | HTTP 200                         | yes    | yes     | no    |
//! | `Rejected` | any other HTTP status (e.g. 402) | yes    | yes     | no    |
//! | `Failed`   | no HTTP exchange completed       | no     | no      | yes   |

use std::collections::BTreeMap;

use serde_json::{json, Value};

use crate::error::X402Error;

/// Response headers, keyed by lowercase header name.
pub type ResponseHeaders = BTreeMap<String, String>;

/// Body of a response: parsed JSON when the server declared JSON, else text.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Parsed `application/json` body.
    Json(Value),
    /// Raw body text.
    Text(String),
}

impl Payload {
    /// The JSON value, if the body was JSON.
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Text(_) => None,
        }
    }

    /// The raw text, if the body was not JSON.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Json(_) => None,
            Self::Text(text) => Some(text),
        }
    }

    /// Convert to a JSON value; text becomes a JSON string.
    pub fn to_value(&self) -> Value {
        match self {
            Self::Json(value) => value.clone(),
            Self::Text(text) => Value::String(text.clone()),
        }
    }
}

/// A completed HTTP exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status_code: u16,
    /// Decoded body.
    pub payload: Payload,
    /// Response headers, copied verbatim.
    pub headers: ResponseHeaders,
}

/// Why a request produced no HTTP response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The claim could not be signed.
    Signing,
    /// The claim or body could not be serialized.
    Encoding,
    /// Connect, DNS or body-read failure.
    Transport,
    /// The request timed out.
    Timeout,
}

/// A request that failed before a response was received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestFailure {
    /// Failure category.
    pub kind: FailureKind,
    /// Human-readable cause.
    pub message: String,
}

impl From<X402Error> for RequestFailure {
    fn from(e: X402Error) -> Self {
        let kind = match &e {
            X402Error::Signing(_) => FailureKind::Signing,
            X402Error::Encoding(_) => FailureKind::Encoding,
            X402Error::Transport(_) => FailureKind::Transport,
            X402Error::Timeout(_) => FailureKind::Timeout,
        };
        Self {
            kind,
            message: e.to_string(),
        }
    }
}

/// Outcome of a paid request or telemetry push.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestResult {
    /// The server answered 200.
    Success(HttpResponse),
    /// The server answered with a non-200 status.
    Rejected(HttpResponse),
    /// No response was received.
    Failed(RequestFailure),
}

impl RequestResult {
    /// Classify a completed exchange: success is strictly status 200.
    pub fn from_response(response: HttpResponse) -> Self {
        if response.status_code == 200 {
            Self::Success(response)
        } else {
            Self::Rejected(response)
        }
    }

    /// Build a failed result.
    pub fn failed(kind: FailureKind, message: impl Into<String>) -> Self {
        Self::Failed(RequestFailure {
            kind,
            message: message.into(),
        })
    }

    /// True only for HTTP 200.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// The HTTP response, if one was received.
    pub fn response(&self) -> Option<&HttpResponse> {
        match self {
            Self::Success(response) | Self::Rejected(response) => Some(response),
            Self::Failed(_) => None,
        }
    }

    /// HTTP status, absent for failures.
    pub fn status_code(&self) -> Option<u16> {
        self.response().map(|r| r.status_code)
    }

    /// Response body, absent for failures.
    pub fn payload(&self) -> Option<&Payload> {
        self.response().map(|r| &r.payload)
    }

    /// Response headers, absent for failures.
    pub fn headers(&self) -> Option<&ResponseHeaders> {
        self.response().map(|r| &r.headers)
    }

    /// Failure cause, present only for failures.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Failed(failure) => Some(&failure.message),
            _ => None,
        }
    }

    /// Failure category, present only for failures.
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            Self::Failed(failure) => Some(failure.kind),
            _ => None,
        }
    }

    /// Render the result as a flat JSON object:
    /// `{success, status, data, headers}` or `{success: false, error}`.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Success(response) | Self::Rejected(response) => json!({
                "success": self.is_success(),
                "status": response.status_code,
                "data": response.payload.to_value(),
                "headers": response.headers,
            }),
            Self::Failed(failure) => json!({
                "success": false,
                "error": failure.message,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status_code: u16) -> HttpResponse {
        HttpResponse {
            status_code,
            payload: Payload::Json(json!({"ok": true})),
            headers: ResponseHeaders::new(),
        }
    }

    #[test]
    fn test_only_200_is_success() {
        assert!(RequestResult::from_response(response(200)).is_success());
        for status in [201, 204, 301, 400, 402, 404, 500, 503] {
            let result = RequestResult::from_response(response(status));
            assert!(!result.is_success(), "status {} must not be success", status);
            assert_eq!(result.status_code(), Some(status));
            assert!(result.error_message().is_none());
        }
    }

    #[test]
    fn test_failed_has_no_status() {
        let result = RequestResult::failed(FailureKind::Transport, "connection refused");
        assert!(!result.is_success());
        assert_eq!(result.status_code(), None);
        assert!(result.payload().is_none());
        assert_eq!(result.error_message(), Some("connection refused"));
        assert_eq!(result.failure_kind(), Some(FailureKind::Transport));
    }

    #[test]
    fn test_failure_from_error() {
        let failure = RequestFailure::from(X402Error::Timeout("deadline".into()));
        assert_eq!(failure.kind, FailureKind::Timeout);
        assert!(failure.message.contains("deadline"));
    }

    #[test]
    fn test_to_json_shapes() {
        let ok = RequestResult::from_response(response(200)).to_json();
        assert_eq!(ok["success"], json!(true));
        assert_eq!(ok["status"], json!(200));
        assert_eq!(ok["data"], json!({"ok": true}));
        assert!(ok.get("error").is_none());

        let failed = RequestResult::failed(FailureKind::Transport, "dns").to_json();
        assert_eq!(failed, json!({"success": false, "error": "dns"}));
    }

    #[test]
    fn test_text_payload_to_value() {
        let payload = Payload::Text("plain".into());
        assert_eq!(payload.to_value(), json!("plain"));
        assert_eq!(payload.as_text(), Some("plain"));
        assert!(payload.as_json().is_none());
    }
}
