//! Authorization gateway port.
//!
//! The gateway is the wire boundary to the provider's token endpoint. The
//! authority decides *when* to exchange or refresh; the gateway only knows
//! *how* to speak the `OAuth2` grants.

use async_trait::async_trait;
use aviary_domain::{AccessToken, AuthResult, ClientCredentials};

/// Port for the provider's token endpoint.
#[async_trait]
pub trait AuthorizationGateway: Send + Sync {
    /// Exchanges an authorization code for a token (authorization-code
    /// grant), using the configured redirect URI and scope.
    ///
    /// # Errors
    /// Returns `AuthError::TokenExchangeFailed` on network failure or a
    /// non-2xx provider response.
    async fn exchange_code(
        &self,
        credentials: &ClientCredentials,
        code: &str,
        state: Option<&str>,
    ) -> AuthResult<AccessToken>;

    /// Obtains a new token via the refresh-token grant.
    ///
    /// # Errors
    /// Returns `AuthError::RefreshFailed` on network failure or a non-2xx
    /// provider response (revoked or expired refresh token).
    async fn refresh(
        &self,
        credentials: &ClientCredentials,
        refresh_token: &str,
    ) -> AuthResult<AccessToken>;
}
