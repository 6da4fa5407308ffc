//! Aviary - social network API connector
//!
//! Aviary exposes a social network's REST API to a host web application. It
//! owns the `OAuth2` authorization-code lifecycle (redirect handling,
//! code-for-token exchange, refresh-on-demand), delegates token persistence
//! to the host through the [`TokenStore`](ports::TokenStore) port, and
//! proxies the remote endpoint catalogue with the current access token
//! attached.
//!
//! The usual wiring: implement `TokenStore` over your user storage, build a
//! [`Connector`] from your [`ClientCredentials`] at startup, send browsers
//! to [`Connector::authorization_url`], feed the redirect callback into
//! [`Connector::handle_callback`], and serve API traffic through
//! [`Connector::session`].

use std::sync::Arc;
use url::Url;

pub use aviary_application::ports;
pub use aviary_application::{ApiSession, MemoryTokenStore, TokenAuthority};
pub use aviary_domain::{
    AccessToken, ApiError, ApiRequest, ApiResponse, ApiResult, AuthError, AuthResult,
    CallbackOutcome, CallbackQuery, ClientCredentials, Endpoint, FormPart, HttpMethod, Payload,
    TokenStoreError,
};
pub use aviary_infrastructure::{OAuth2Gateway, ReqwestTransport, SystemClock};

use aviary_application::ports::{ApiTransport, AuthorizationGateway, Clock, TokenStore};

/// Host-facing entry point tying the authority, the adapters, and the
/// host's token store together.
///
/// Constructed once at startup; cheap to share. Every collaborator is
/// injected explicitly — there is no ambient or global state.
pub struct Connector {
    authority: Arc<TokenAuthority>,
    transport: Arc<dyn ApiTransport>,
    store: Arc<dyn TokenStore>,
}

impl Connector {
    /// Creates a connector with the default reqwest adapters.
    ///
    /// # Errors
    /// Returns `AuthError::InvalidConfiguration` if the credentials name an
    /// unusable network target.
    pub fn new(credentials: ClientCredentials, store: Arc<dyn TokenStore>) -> AuthResult<Self> {
        Self::with_adapters(
            credentials,
            store,
            Arc::new(OAuth2Gateway::new()),
            Arc::new(ReqwestTransport::new()),
            Arc::new(SystemClock::new()),
        )
    }

    /// Creates a connector with explicitly injected adapters.
    ///
    /// # Errors
    /// Returns `AuthError::InvalidConfiguration` if the credentials name an
    /// unusable network target.
    pub fn with_adapters(
        credentials: ClientCredentials,
        store: Arc<dyn TokenStore>,
        gateway: Arc<dyn AuthorizationGateway>,
        transport: Arc<dyn ApiTransport>,
        clock: Arc<dyn Clock>,
    ) -> AuthResult<Self> {
        let authority = Arc::new(TokenAuthority::new(
            credentials,
            gateway,
            Arc::clone(&store),
            clock,
        )?);
        Ok(Self {
            authority,
            transport,
            store,
        })
    }

    /// The shared token authority.
    #[must_use]
    pub const fn authority(&self) -> &Arc<TokenAuthority> {
        &self.authority
    }

    /// Builds the provider's authorization redirect URL.
    ///
    /// # Errors
    /// See [`TokenAuthority::authorization_url`].
    pub fn authorization_url(&self, state: Option<&str>) -> AuthResult<Url> {
        self.authority.authorization_url(state)
    }

    /// Handles the provider's redirect callback for a principal.
    ///
    /// # Errors
    /// See [`TokenAuthority::handle_callback`].
    pub async fn handle_callback(
        &self,
        principal: &str,
        query: &CallbackQuery,
    ) -> AuthResult<CallbackOutcome> {
        self.authority.handle_callback(principal, query).await
    }

    /// Opens an API session for a principal from their stored token.
    ///
    /// # Errors
    /// `PersistenceFailed` when the store cannot be read, and
    /// `RefreshFailed` when no token is stored for the principal — in both
    /// cases nothing was called on the remote, and the latter means the
    /// authorization flow has to be run first.
    pub async fn session(&self, principal: &str) -> AuthResult<ApiSession> {
        let token = self
            .store
            .load(principal)
            .await
            .map_err(|e| AuthError::PersistenceFailed {
                message: e.to_string(),
            })?
            .ok_or_else(|| AuthError::RefreshFailed {
                message: format!("no stored token for {principal}; run the authorization flow"),
            })?;
        ApiSession::new(
            principal,
            token,
            Arc::clone(&self.authority),
            Arc::clone(&self.transport),
        )
    }
}
