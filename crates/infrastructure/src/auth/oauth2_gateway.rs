//! `OAuth2` token-endpoint gateway over reqwest.
//!
//! Speaks the two grants the authority needs: authorization-code exchange
//! and refresh. Both are form-urlencoded POSTs to the configured token
//! endpoint with standard JSON responses.

use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

use aviary_application::ports::{AuthorizationGateway, Clock};
use aviary_domain::{AccessToken, AuthError, AuthResult, ClientCredentials};

use crate::adapters::SystemClock;

/// Content-Type for form-urlencoded data.
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// `OAuth2` token response from the token endpoint.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    token_type: String,
    #[serde(default)]
    expires_in: Option<u64>,
    #[serde(default)]
    refresh_token: Option<String>,
}

/// `OAuth2` error response.
#[derive(Debug, Deserialize)]
struct TokenErrorResponse {
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}

/// Reqwest-backed implementation of [`AuthorizationGateway`].
pub struct OAuth2Gateway {
    http_client: reqwest::Client,
    clock: Arc<dyn Clock>,
}

impl OAuth2Gateway {
    /// Creates a gateway using the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock::new()))
    }

    /// Creates a gateway with an injected clock (for anchoring the expiry
    /// of issued tokens in tests).
    #[must_use]
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            // Token endpoints must not be followed through redirects.
            http_client: reqwest::Client::builder()
                .redirect(reqwest::redirect::Policy::none())
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
            clock,
        }
    }

    /// Executes one grant against the token endpoint.
    ///
    /// `failure` wraps every transport or provider failure into the
    /// grant-appropriate error variant.
    async fn post_grant<F>(
        &self,
        credentials: &ClientCredentials,
        params: &[(String, String)],
        failure: F,
    ) -> AuthResult<AccessToken>
    where
        F: Fn(String) -> AuthError,
    {
        let token_url = credentials.token_endpoint()?;
        let body = serde_urlencoded::to_string(params)
            .map_err(|e| failure(format!("failed to encode form: {e}")))?;

        let response = self
            .http_client
            .post(token_url)
            .header("Content-Type", FORM_CONTENT_TYPE)
            .body(body)
            .send()
            .await
            .map_err(|e| failure(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let error_text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<TokenErrorResponse>(&error_text).map_or_else(
                |_| format!("token endpoint answered {status}: {error_text}"),
                |err| err.error_description.unwrap_or(err.error),
            );
            return Err(failure(message));
        }

        let token_response: TokenResponse = response
            .json()
            .await
            .map_err(|e| failure(format!("failed to parse token response: {e}")))?;

        Ok(AccessToken::from_wire(
            token_response.access_token,
            token_response.token_type,
            token_response.expires_in,
            token_response.refresh_token,
            self.clock.now(),
        ))
    }
}

impl Default for OAuth2Gateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuthorizationGateway for OAuth2Gateway {
    async fn exchange_code(
        &self,
        credentials: &ClientCredentials,
        code: &str,
        state: Option<&str>,
    ) -> AuthResult<AccessToken> {
        let mut params = vec![
            ("grant_type".to_string(), "authorization_code".to_string()),
            ("client_id".to_string(), credentials.client_id.clone()),
            ("client_secret".to_string(), credentials.client_secret.clone()),
            ("code".to_string(), code.to_string()),
            ("redirect_uri".to_string(), credentials.redirect_uri.clone()),
            ("scope".to_string(), credentials.scope.clone()),
        ];
        if let Some(state) = state {
            params.push(("state".to_string(), state.to_string()));
        }

        debug!(client_id = %credentials.client_id, "exchanging authorization code");
        self.post_grant(credentials, &params, |message| {
            AuthError::TokenExchangeFailed { message }
        })
        .await
    }

    async fn refresh(
        &self,
        credentials: &ClientCredentials,
        refresh_token: &str,
    ) -> AuthResult<AccessToken> {
        let params = [
            ("grant_type".to_string(), "refresh_token".to_string()),
            ("client_id".to_string(), credentials.client_id.clone()),
            ("client_secret".to_string(), credentials.client_secret.clone()),
            ("refresh_token".to_string(), refresh_token.to_string()),
        ];

        debug!(client_id = %credentials.client_id, "refreshing access token");
        self.post_grant(credentials, &params, |message| AuthError::RefreshFailed {
            message,
        })
        .await
    }
}
