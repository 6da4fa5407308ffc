//! API transport implementation using reqwest.
//!
//! This adapter implements the `ApiTransport` port. It performs exactly one
//! round trip per call: the session decides what a status code means, this
//! layer only distinguishes "got a response" from "transport failed".

use async_trait::async_trait;
use reqwest::{Client, Method};

use aviary_application::ports::ApiTransport;
use aviary_domain::{ApiError, ApiRequest, ApiResponse, ApiResult, HttpMethod, Payload};

use crate::http::body_builder::build_form;

/// HTTP transport backed by `reqwest::Client`.
///
/// Default configuration: rustls TLS, up to 10 redirects, library
/// User-Agent. Hosts that need timeouts or proxies inject their own client
/// via [`ReqwestTransport::with_client`]; a client-level timeout surfaces as
/// `ApiError::Transport` through the normal error mapping.
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Creates a transport with default client settings.
    #[must_use]
    pub fn new() -> Self {
        let client = Client::builder()
            .user_agent(concat!("Aviary/", env!("CARGO_PKG_VERSION")))
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self { client }
    }

    /// Creates a transport over a custom reqwest client.
    #[must_use]
    pub const fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Converts the domain verb to a reqwest `Method`.
    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Delete => Method::DELETE,
        }
    }

    /// Maps reqwest errors to the transport error variant.
    fn map_error(error: &reqwest::Error) -> ApiError {
        let message = if error.is_timeout() {
            format!("request timed out: {error}")
        } else if error.is_connect() {
            format!("connection failed: {error}")
        } else {
            error.to_string()
        };
        ApiError::Transport { message }
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ApiTransport for ReqwestTransport {
    async fn execute(&self, request: ApiRequest) -> ApiResult<ApiResponse> {
        let mut builder = self
            .client
            .request(Self::to_reqwest_method(request.method), request.url)
            .header("Authorization", &request.authorization);

        builder = match request.payload {
            Payload::Empty => builder,
            Payload::Json(value) => builder.json(&value),
            Payload::Form(parts) => builder.multipart(build_form(parts)?),
        };

        let response = builder.send().await.map_err(|e| Self::map_error(&e))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| ApiError::Transport {
                message: format!("failed to read response body: {e}"),
            })?
            .to_vec();

        Ok(ApiResponse::new(status, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_to_reqwest_method() {
        assert_eq!(
            ReqwestTransport::to_reqwest_method(HttpMethod::Get),
            Method::GET
        );
        assert_eq!(
            ReqwestTransport::to_reqwest_method(HttpMethod::Post),
            Method::POST
        );
        assert_eq!(
            ReqwestTransport::to_reqwest_method(HttpMethod::Delete),
            Method::DELETE
        );
    }
}
