//! Wire-level request and response carriers for the transport port.

use std::fmt;
use url::Url;

use crate::api::endpoint::HttpMethod;
use crate::api::payload::Payload;

/// One fully assembled API request, ready for a transport adapter.
#[derive(Clone, PartialEq)]
pub struct ApiRequest {
    /// HTTP verb.
    pub method: HttpMethod,
    /// Absolute request URL.
    pub url: Url,
    /// Full `Authorization` header value, e.g. `Bearer <token>`.
    pub authorization: String,
    /// Request body.
    pub payload: Payload,
}

impl fmt::Debug for ApiRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiRequest")
            .field("method", &self.method)
            .field("url", &self.url.as_str())
            .field("authorization", &"<redacted>")
            .field("payload", &self.payload)
            .finish()
    }
}

/// The raw result of one transport round trip.
///
/// Non-2xx statuses are responses, not transport errors; interpreting the
/// status is the session's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body bytes.
    pub body: Vec<u8>,
}

impl ApiResponse {
    /// Creates a response from status and body bytes.
    #[must_use]
    pub const fn new(status: u16, body: Vec<u8>) -> Self {
        Self { status, body }
    }

    /// Whether the status is in the 2xx range.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Decodes the body as JSON.
    ///
    /// An empty body decodes to `null`; a non-JSON body is wrapped as a JSON
    /// string so the host always receives a value it can inspect.
    #[must_use]
    pub fn json(&self) -> serde_json::Value {
        if self.body.is_empty() {
            return serde_json::Value::Null;
        }
        serde_json::from_slice(&self.body).unwrap_or_else(|_| {
            serde_json::Value::String(String::from_utf8_lossy(&self.body).into_owned())
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_success_range() {
        assert!(ApiResponse::new(200, Vec::new()).is_success());
        assert!(ApiResponse::new(204, Vec::new()).is_success());
        assert!(!ApiResponse::new(301, Vec::new()).is_success());
        assert!(!ApiResponse::new(404, Vec::new()).is_success());
    }

    #[test]
    fn test_json_decoding_variants() {
        let json = ApiResponse::new(200, br#"{"id": 7}"#.to_vec());
        assert_eq!(json.json(), serde_json::json!({"id": 7}));

        let empty = ApiResponse::new(204, Vec::new());
        assert_eq!(empty.json(), serde_json::Value::Null);

        let text = ApiResponse::new(500, b"gateway exploded".to_vec());
        assert_eq!(
            text.json(),
            serde_json::Value::String("gateway exploded".to_string())
        );
    }

    #[test]
    fn test_request_debug_redacts_authorization() {
        let request = ApiRequest {
            method: HttpMethod::Get,
            url: Url::parse("https://api.social.example/v1.0/me").unwrap(),
            authorization: "Bearer supersecret".to_string(),
            payload: Payload::Empty,
        };
        let rendered = format!("{request:?}");
        assert!(!rendered.contains("supersecret"));
    }
}
