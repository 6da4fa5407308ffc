//! `OAuth2` client configuration.

use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

use crate::error::{AuthError, AuthResult};

/// Configuration for one application registered with the remote provider.
///
/// Created once at startup from host configuration and never mutated. All
/// network targets are parameterized here; nothing is hardcoded in the core
/// logic. The authorize and token paths default to the provider-conventional
/// locations and only need to be set when the provider deviates.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientCredentials {
    /// Client identifier issued by the provider.
    pub client_id: String,
    /// Client secret issued by the provider.
    pub client_secret: String,
    /// Base URL of the `OAuth2` provider, e.g. `https://social.example`.
    pub token_host: String,
    /// Path of the authorization endpoint on `token_host`.
    #[serde(default = "default_authorize_path")]
    pub authorize_path: String,
    /// Path of the token endpoint on `token_host`.
    #[serde(default = "default_token_path")]
    pub token_path: String,
    /// Callback URL registered with the provider.
    pub redirect_uri: String,
    /// Space-separated scopes requested during authorization.
    pub scope: String,
    /// Base URL of the REST API, including any version prefix,
    /// e.g. `https://api.social.example/v1.0`.
    pub api_host: String,
}

fn default_authorize_path() -> String {
    "/oauth/authorize".to_string()
}

fn default_token_path() -> String {
    "/oauth/token".to_string()
}

impl ClientCredentials {
    /// Creates credentials with the conventional authorize/token paths.
    #[must_use]
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        token_host: impl Into<String>,
        redirect_uri: impl Into<String>,
        scope: impl Into<String>,
        api_host: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            token_host: token_host.into(),
            authorize_path: default_authorize_path(),
            token_path: default_token_path(),
            redirect_uri: redirect_uri.into(),
            scope: scope.into(),
            api_host: api_host.into(),
        }
    }

    /// Overrides the authorization endpoint path.
    #[must_use]
    pub fn with_authorize_path(mut self, path: impl Into<String>) -> Self {
        self.authorize_path = path.into();
        self
    }

    /// Overrides the token endpoint path.
    #[must_use]
    pub fn with_token_path(mut self, path: impl Into<String>) -> Self {
        self.token_path = path.into();
        self
    }

    /// Absolute URL of the provider's authorization endpoint.
    ///
    /// # Errors
    /// Returns `AuthError::InvalidConfiguration` if the host or path do not
    /// form a valid URL.
    pub fn authorize_endpoint(&self) -> AuthResult<Url> {
        join_host_path(&self.token_host, &self.authorize_path)
    }

    /// Absolute URL of the provider's token endpoint.
    ///
    /// # Errors
    /// Returns `AuthError::InvalidConfiguration` if the host or path do not
    /// form a valid URL.
    pub fn token_endpoint(&self) -> AuthResult<Url> {
        join_host_path(&self.token_host, &self.token_path)
    }

    /// Base URL of the REST API, parsed and ready for path extension.
    ///
    /// # Errors
    /// Returns `AuthError::InvalidConfiguration` if `api_host` does not
    /// parse as an absolute base URL.
    pub fn api_endpoint(&self) -> AuthResult<Url> {
        let url = Url::parse(&self.api_host).map_err(|e| AuthError::InvalidConfiguration {
            message: format!("api_host is not a valid URL: {e}"),
        })?;
        if url.cannot_be_a_base() {
            return Err(AuthError::InvalidConfiguration {
                message: "api_host cannot be used as a base URL".to_string(),
            });
        }
        Ok(url)
    }

    /// Validates that every configured network target is usable.
    ///
    /// # Errors
    /// Returns `AuthError::InvalidConfiguration` naming the first offending
    /// field.
    pub fn validate(&self) -> AuthResult<()> {
        if self.client_id.is_empty() {
            return Err(AuthError::InvalidConfiguration {
                message: "client_id must not be empty".to_string(),
            });
        }
        if self.redirect_uri.is_empty() {
            return Err(AuthError::InvalidConfiguration {
                message: "redirect_uri must not be empty".to_string(),
            });
        }
        self.authorize_endpoint()?;
        self.token_endpoint()?;
        self.api_endpoint()?;
        Ok(())
    }
}

fn join_host_path(host: &str, path: &str) -> AuthResult<Url> {
    let joined = format!("{}{path}", host.trim_end_matches('/'));
    Url::parse(&joined).map_err(|e| AuthError::InvalidConfiguration {
        message: format!("{joined:?} is not a valid URL: {e}"),
    })
}

impl fmt::Debug for ClientCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("token_host", &self.token_host)
            .field("authorize_path", &self.authorize_path)
            .field("token_path", &self.token_path)
            .field("redirect_uri", &self.redirect_uri)
            .field("scope", &self.scope)
            .field("api_host", &self.api_host)
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn credentials() -> ClientCredentials {
        ClientCredentials::new(
            "client-1",
            "shh",
            "https://social.example",
            "https://host.example/callback",
            "read write",
            "https://api.social.example/v1.0",
        )
    }

    #[test]
    fn test_default_paths() {
        let creds = credentials();
        assert_eq!(creds.authorize_path, "/oauth/authorize");
        assert_eq!(creds.token_path, "/oauth/token");
    }

    #[test]
    fn test_endpoints_join_host_and_path() {
        let creds = credentials();
        assert_eq!(
            creds.authorize_endpoint().unwrap().as_str(),
            "https://social.example/oauth/authorize"
        );
        assert_eq!(
            creds.token_endpoint().unwrap().as_str(),
            "https://social.example/oauth/token"
        );
    }

    #[test]
    fn test_trailing_slash_on_host_is_tolerated() {
        let mut creds = credentials();
        creds.token_host = "https://social.example/".to_string();
        assert_eq!(
            creds.token_endpoint().unwrap().as_str(),
            "https://social.example/oauth/token"
        );
    }

    #[test]
    fn test_validate_rejects_bad_api_host() {
        let mut creds = credentials();
        creds.api_host = "not a url".to_string();
        assert!(matches!(
            creds.validate(),
            Err(AuthError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_empty_redirect_uri() {
        let mut creds = credentials();
        creds.redirect_uri = String::new();
        assert!(matches!(
            creds.validate(),
            Err(AuthError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let rendered = format!("{:?}", credentials());
        assert!(!rendered.contains("shh"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_deserialize_fills_default_paths() {
        let creds: ClientCredentials = serde_json::from_str(
            r#"{
                "client_id": "c",
                "client_secret": "s",
                "token_host": "https://social.example",
                "redirect_uri": "https://host.example/cb",
                "scope": "read",
                "api_host": "https://api.social.example/v1.0"
            }"#,
        )
        .unwrap();
        assert_eq!(creds.token_path, "/oauth/token");
        assert_eq!(creds.authorize_path, "/oauth/authorize");
    }
}
