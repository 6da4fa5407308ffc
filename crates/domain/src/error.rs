//! Error taxonomy for the authorization and API layers.
//!
//! Every failure is typed and distinguishable so the host can decide what to
//! retry. Secret material (client secret, token values) never appears in any
//! variant or `Display` output.

use thiserror::Error;

/// Errors produced by the `OAuth2` token lifecycle.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The provider rejected the user's consent at the authorize endpoint.
    #[error("authorization denied: {}", .message.as_deref().unwrap_or(.error.as_str()))]
    AuthorizationDenied {
        /// Provider error code (e.g. `access_denied`).
        error: String,
        /// Human-readable message from the provider, if any.
        message: Option<String>,
        /// Remediation hint from the provider, if any.
        hint: Option<String>,
    },

    /// The authorization-code exchange failed (network error or non-2xx
    /// from the token endpoint).
    #[error("token exchange failed: {message}")]
    TokenExchangeFailed {
        /// Error description.
        message: String,
    },

    /// The refresh-token grant failed. Never retried automatically; the host
    /// must restart the full authorization flow for the principal.
    #[error("token refresh failed: {message}")]
    RefreshFailed {
        /// Error description.
        message: String,
    },

    /// A token was obtained but could not be handed to the host's store.
    /// The token exists; retrying only the save is safe.
    #[error("token persistence failed: {message}")]
    PersistenceFailed {
        /// Error description.
        message: String,
    },

    /// The client configuration is malformed (unparseable host URL, empty
    /// redirect URI).
    #[error("invalid client configuration: {message}")]
    InvalidConfiguration {
        /// Error description.
        message: String,
    },
}

/// Errors produced while proxying an API call.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApiError {
    /// Caller misuse, detected before any network call is attempted.
    #[error("invalid request shape: {message}")]
    InvalidRequestShape {
        /// What the caller got wrong.
        message: String,
    },

    /// Transport-level failure: DNS, connection refused, timeout.
    #[error("transport error: {message}")]
    Transport {
        /// Error description.
        message: String,
    },

    /// The remote API answered with a non-2xx status. The original status
    /// and decoded body are preserved for host-side interpretation.
    #[error("remote API error: status {status}")]
    RemoteApi {
        /// HTTP status code as delivered by the remote.
        status: u16,
        /// Decoded JSON body, or the raw text wrapped as a JSON string.
        body: serde_json::Value,
    },

    /// The freshness check on the held token failed mid-invoke.
    #[error(transparent)]
    Auth(#[from] AuthError),
}

/// Failure reported by the host's token store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("token store error: {message}")]
pub struct TokenStoreError {
    /// Error description.
    pub message: String,
}

impl TokenStoreError {
    /// Creates a store error from any displayable cause.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Result type alias for authorization operations.
pub type AuthResult<T> = Result<T, AuthError>;

/// Result type alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;
