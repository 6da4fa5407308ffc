//! The `OAuth2` token authority.
//!
//! `TokenAuthority` mediates all interaction with the remote provider's
//! authorization and token endpoints: it builds authorization redirect URLs,
//! turns redirect callbacks into tokens, and validates or refreshes tokens
//! on demand. It owns no token state; every token it produces is handed to
//! the host's [`TokenStore`] before the operation completes.

use rand::Rng;
use rand::distr::Alphanumeric;
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

use aviary_domain::{
    AccessToken, AuthError, AuthResult, CallbackOutcome, CallbackQuery, ClientCredentials,
};

use crate::ports::{AuthorizationGateway, Clock, TokenStore};

/// Length of generated `state` nonces.
const STATE_LENGTH: usize = 32;

/// Mediates the `OAuth2` authorization-code lifecycle for one registered
/// client application.
///
/// Constructed once at startup and shared (via `Arc`) by every session.
/// All collaborators are injected; the authority reads no ambient state.
pub struct TokenAuthority {
    credentials: ClientCredentials,
    gateway: Arc<dyn AuthorizationGateway>,
    store: Arc<dyn TokenStore>,
    clock: Arc<dyn Clock>,
    expiry_leeway_seconds: i64,
}

impl TokenAuthority {
    /// Creates an authority after validating the client configuration.
    ///
    /// # Errors
    /// Returns `AuthError::InvalidConfiguration` if any configured network
    /// target is unusable.
    pub fn new(
        credentials: ClientCredentials,
        gateway: Arc<dyn AuthorizationGateway>,
        store: Arc<dyn TokenStore>,
        clock: Arc<dyn Clock>,
    ) -> AuthResult<Self> {
        credentials.validate()?;
        Ok(Self {
            credentials,
            gateway,
            store,
            clock,
            expiry_leeway_seconds: 0,
        })
    }

    /// Treats tokens expiring within `seconds` as already expired, so a
    /// token cannot go stale between the freshness check and the API call.
    #[must_use]
    pub const fn with_expiry_leeway(mut self, seconds: i64) -> Self {
        self.expiry_leeway_seconds = seconds;
        self
    }

    /// The client configuration this authority was built from.
    #[must_use]
    pub const fn credentials(&self) -> &ClientCredentials {
        &self.credentials
    }

    /// Builds the provider's authorization redirect URL.
    ///
    /// Pure function of configuration plus `state`: the configured redirect
    /// URI and scope are embedded, and `state` is passed through verbatim
    /// when given. The host redirects the user's browser here.
    ///
    /// # Errors
    /// Returns `AuthError::InvalidConfiguration` if the authorize endpoint
    /// URL cannot be formed.
    pub fn authorization_url(&self, state: Option<&str>) -> AuthResult<Url> {
        let mut url = self.credentials.authorize_endpoint()?;
        url.query_pairs_mut()
            .append_pair("response_type", "code")
            .append_pair("client_id", &self.credentials.client_id)
            .append_pair("redirect_uri", &self.credentials.redirect_uri)
            .append_pair("scope", &self.credentials.scope);
        if let Some(state) = state {
            url.query_pairs_mut().append_pair("state", state);
        }
        Ok(url)
    }

    /// Mints a random URL-safe `state` nonce for hosts that want the
    /// library to produce the callback-binding value.
    #[must_use]
    pub fn generate_state() -> String {
        rand::rng()
            .sample_iter(Alphanumeric)
            .take(STATE_LENGTH)
            .map(char::from)
            .collect()
    }

    /// Handles the provider's redirect callback.
    ///
    /// With a `code`, exchanges it for a token, persists the token for the
    /// principal, and returns [`CallbackOutcome::Authorized`]. With an
    /// `error`, fails with `AuthError::AuthorizationDenied`. With neither,
    /// returns [`CallbackOutcome::NeedsRedirect`] carrying the
    /// authorization URL (with the inbound `state` passed through), since a
    /// bare visit is the entry point of the flow.
    ///
    /// A callback carrying both `code` and `error` resolves in favor of the
    /// code.
    ///
    /// # Errors
    /// `AuthorizationDenied`, `TokenExchangeFailed`, or
    /// `PersistenceFailed` (token obtained but not saved; only the save
    /// needs retrying).
    pub async fn handle_callback(
        &self,
        principal: &str,
        query: &CallbackQuery,
    ) -> AuthResult<CallbackOutcome> {
        if let Some(code) = &query.code {
            let token = self
                .gateway
                .exchange_code(&self.credentials, code, query.state.as_deref())
                .await?;
            self.persist(principal, &token).await?;
            debug!(principal, "authorization code exchanged");
            return Ok(CallbackOutcome::Authorized(token));
        }

        if let Some(error) = &query.error {
            warn!(principal, error, "authorization denied by provider");
            return Err(AuthError::AuthorizationDenied {
                error: error.clone(),
                message: query.message.clone(),
                hint: query.hint.clone(),
            });
        }

        Ok(CallbackOutcome::NeedsRedirect(
            self.authorization_url(query.state.as_deref())?,
        ))
    }

    /// Returns a token that is safe to attach to a request.
    ///
    /// A non-expired token is returned unchanged with no network activity;
    /// this is the hot path in front of every API call. An expired token is
    /// refreshed through the gateway exactly once and the replacement is
    /// persisted for the principal before being returned.
    ///
    /// # Errors
    /// `RefreshFailed` when the token is expired and cannot be refreshed
    /// (no refresh token, or the provider rejected the grant) — the host
    /// must restart the authorization flow; this is never retried here.
    /// `PersistenceFailed` when the refreshed token could not be saved.
    pub async fn ensure_fresh(
        &self,
        principal: &str,
        token: AccessToken,
    ) -> AuthResult<AccessToken> {
        if !token.is_expired(self.clock.now(), self.expiry_leeway_seconds) {
            return Ok(token);
        }

        let Some(refresh_token) = token.refresh_token.clone() else {
            return Err(AuthError::RefreshFailed {
                message: "access token expired and no refresh token is available".to_string(),
            });
        };

        let refreshed = self
            .gateway
            .refresh(&self.credentials, &refresh_token)
            .await?
            .with_refresh_fallback(&token);
        self.persist(principal, &refreshed).await?;
        debug!(principal, "access token refreshed");
        Ok(refreshed)
    }

    async fn persist(&self, principal: &str, token: &AccessToken) -> AuthResult<()> {
        self.store
            .persist(principal, token)
            .await
            .map_err(|e| AuthError::PersistenceFailed {
                message: e.to_string(),
            })
    }
}
