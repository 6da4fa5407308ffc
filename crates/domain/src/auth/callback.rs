//! Inbound redirect-callback types.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::auth::token::AccessToken;

/// Query parameters delivered by the provider on the redirect-back route.
///
/// Transient: exists only for the duration of one callback handling. Hosts
/// deserialize it straight from the callback query string with their web
/// framework's extractor; unknown parameters are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallbackQuery {
    /// Authorization code, present on a successful consent.
    #[serde(default)]
    pub code: Option<String>,
    /// Provider error code, present when consent was rejected.
    #[serde(default)]
    pub error: Option<String>,
    /// Human-readable error message.
    #[serde(default)]
    pub message: Option<String>,
    /// Remediation hint accompanying the error.
    #[serde(default)]
    pub hint: Option<String>,
    /// Opaque value that round-trips unchanged from the authorization
    /// redirect; the host uses it to bind the callback to a principal.
    #[serde(default)]
    pub state: Option<String>,
}

impl CallbackQuery {
    /// A callback carrying an authorization code.
    #[must_use]
    pub fn with_code(code: impl Into<String>, state: Option<&str>) -> Self {
        Self {
            code: Some(code.into()),
            state: state.map(str::to_string),
            ..Self::default()
        }
    }

    /// A callback reporting rejected consent.
    #[must_use]
    pub fn denied(error: impl Into<String>, message: Option<&str>) -> Self {
        Self {
            error: Some(error.into()),
            message: message.map(str::to_string),
            ..Self::default()
        }
    }

    /// Whether this callback carries neither a code nor an error, i.e. the
    /// user's first visit before being sent to the provider.
    #[must_use]
    pub const fn is_first_visit(&self) -> bool {
        self.code.is_none() && self.error.is_none()
    }
}

/// Outcome of handling a redirect callback.
///
/// `NeedsRedirect` is a distinct success outcome, not an error: it is the
/// entry point of the flow, telling the host to send the user's browser to
/// the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackOutcome {
    /// The code was exchanged and the resulting token persisted.
    Authorized(AccessToken),
    /// First visit: redirect the browser to this authorization URL.
    NeedsRedirect(Url),
}

impl CallbackOutcome {
    /// The token, when the callback completed an authorization.
    #[must_use]
    pub const fn token(&self) -> Option<&AccessToken> {
        match self {
            Self::Authorized(token) => Some(token),
            Self::NeedsRedirect(_) => None,
        }
    }

    /// The redirect target, when the flow still has to start.
    #[must_use]
    pub const fn redirect_target(&self) -> Option<&Url> {
        match self {
            Self::Authorized(_) => None,
            Self::NeedsRedirect(url) => Some(url),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_first_visit_detection() {
        assert!(CallbackQuery::default().is_first_visit());
        assert!(!CallbackQuery::with_code("abc", None).is_first_visit());
        assert!(!CallbackQuery::denied("access_denied", None).is_first_visit());
    }

    #[test]
    fn test_query_deserializes_from_partial_input() {
        let query: CallbackQuery =
            serde_json::from_str(r#"{"code": "abc", "state": "s1"}"#).unwrap();
        assert_eq!(query.code.as_deref(), Some("abc"));
        assert_eq!(query.state.as_deref(), Some("s1"));
        assert_eq!(query.error, None);
    }

    #[test]
    fn test_outcome_accessors() {
        let url = Url::parse("https://social.example/oauth/authorize").unwrap();
        let outcome = CallbackOutcome::NeedsRedirect(url.clone());
        assert_eq!(outcome.redirect_target(), Some(&url));
        assert_eq!(outcome.token(), None);
    }
}
