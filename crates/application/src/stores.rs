//! In-memory token store.
//!
//! Production hosts implement [`TokenStore`] over their own persistence;
//! this implementation backs demos and tests.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use aviary_domain::{AccessToken, TokenStoreError};

use crate::ports::TokenStore;

/// Thread-safe in-memory token store keyed by principal.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    tokens: RwLock<HashMap<String, AccessToken>>,
}

impl MemoryTokenStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes every stored token.
    pub async fn clear(&self) {
        self.tokens.write().await.clear();
    }

    /// Number of principals with a stored token.
    pub async fn count(&self) -> usize {
        self.tokens.read().await.len()
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn persist(&self, principal: &str, token: &AccessToken) -> Result<(), TokenStoreError> {
        self.tokens
            .write()
            .await
            .insert(principal.to_string(), token.clone());
        Ok(())
    }

    async fn load(&self, principal: &str) -> Result<Option<AccessToken>, TokenStoreError> {
        Ok(self.tokens.read().await.get(principal).cloned())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use pretty_assertions::assert_eq;

    fn token(value: &str) -> AccessToken {
        AccessToken::from_wire(
            value.to_string(),
            "Bearer".to_string(),
            Some(3600),
            None,
            DateTime::from_timestamp(0, 0).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_persist_and_load() {
        let store = MemoryTokenStore::new();
        store.persist("alice", &token("a1")).await.unwrap();

        let loaded = store.load("alice").await.unwrap();
        assert_eq!(loaded.map(|t| t.access_token), Some("a1".to_string()));
        assert_eq!(store.load("bob").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_persist_replaces_previous_token() {
        let store = MemoryTokenStore::new();
        store.persist("alice", &token("a1")).await.unwrap();
        store.persist("alice", &token("a2")).await.unwrap();

        let loaded = store.load("alice").await.unwrap();
        assert_eq!(loaded.map(|t| t.access_token), Some("a2".to_string()));
        assert_eq!(store.count().await, 1);
    }

    #[tokio::test]
    async fn test_clear_empties_the_store() {
        let store = MemoryTokenStore::new();
        store.persist("alice", &token("a1")).await.unwrap();
        store.clear().await;
        assert_eq!(store.count().await, 0);
    }
}
