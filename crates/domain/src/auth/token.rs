//! Access token value type with expiry tracking.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An `OAuth2` access token in flight.
///
/// Tokens are value objects: a refresh produces a new `AccessToken` and the
/// old one is discarded, never mutated in place. Persistence is the host's
/// job; the struct round-trips through serde so it can be stored verbatim.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
    /// Token type as reported by the provider, usually `Bearer`.
    pub token_type: String,
    /// The access token value.
    pub access_token: String,
    /// Refresh token, if the provider issued one.
    pub refresh_token: Option<String>,
    /// Absolute expiry instant; `None` means the provider reported none.
    pub expires_at: Option<DateTime<Utc>>,
    /// When this token was obtained.
    pub obtained_at: DateTime<Utc>,
}

impl AccessToken {
    /// Builds a token from the wire fields of a token-endpoint response.
    ///
    /// `expires_in` is the relative lifetime in seconds; it is anchored to
    /// the supplied `now` so expiry checks stay clock-injectable.
    #[must_use]
    pub fn from_wire(
        access_token: String,
        token_type: String,
        expires_in_secs: Option<u64>,
        refresh_token: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        let expires_at = expires_in_secs.map(|secs| now + Duration::seconds(secs.cast_signed()));
        Self {
            token_type,
            access_token,
            refresh_token,
            expires_at,
            obtained_at: now,
        }
    }

    /// Whether the token is expired at `now`, with `leeway_seconds` of
    /// slack subtracted from the remaining lifetime.
    ///
    /// A token without an expiry never expires; the provider controls it.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>, leeway_seconds: i64) -> bool {
        self.expires_at
            .is_some_and(|expires_at| now + Duration::seconds(leeway_seconds) >= expires_at)
    }

    /// Whether a refresh-token grant is possible.
    #[must_use]
    pub const fn can_refresh(&self) -> bool {
        self.refresh_token.is_some()
    }

    /// The `Authorization` header value for this token.
    #[must_use]
    pub fn authorization_header(&self) -> String {
        format!("{} {}", self.token_type, self.access_token)
    }

    /// Inherits the previous token's refresh token when the provider omitted
    /// one from a refresh response (common on non-rotating providers).
    #[must_use]
    pub fn with_refresh_fallback(mut self, previous: &Self) -> Self {
        if self.refresh_token.is_none() {
            self.refresh_token = previous.refresh_token.clone();
        }
        self
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("token_type", &self.token_type)
            .field("access_token", &"<redacted>")
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "<redacted>"))
            .field("expires_at", &self.expires_at)
            .field("obtained_at", &self.obtained_at)
            .finish()
    }
}
