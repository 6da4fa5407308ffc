//! Token persistence port, implemented by the host application.

use async_trait::async_trait;
use aviary_domain::{AccessToken, TokenStoreError};

/// Port for delegated token persistence.
///
/// The core never stores tokens itself: every operation that produces a new
/// or refreshed token hands it to this port before the result is considered
/// complete. The store is the source of truth when the next session is
/// constructed, which is what makes concurrent refreshes for one principal
/// benign (last write wins).
///
/// `principal` is the host's opaque user key; the core passes it through
/// uninterpreted.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Durably saves the token for the principal.
    ///
    /// # Errors
    /// Returns a `TokenStoreError` describing the persistence failure; the
    /// core surfaces it as `AuthError::PersistenceFailed`.
    async fn persist(&self, principal: &str, token: &AccessToken) -> Result<(), TokenStoreError>;

    /// Loads the stored token for the principal, if any.
    ///
    /// # Errors
    /// Returns a `TokenStoreError` if the backing store cannot be read.
    async fn load(&self, principal: &str) -> Result<Option<AccessToken>, TokenStoreError>;
}
