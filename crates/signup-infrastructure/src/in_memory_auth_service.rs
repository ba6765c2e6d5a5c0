//! In-memory authentication backend.

use async_trait::async_trait;
use signup_core::error::ServiceError;
use signup_core::user::{AccountId, AuthService};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Keeps issued account ids in a map keyed by lowercased email.
///
/// Credentials are not retained.
#[derive(Debug, Default)]
pub struct InMemoryAuthService {
    accounts: RwLock<HashMap<String, AccountId>>,
}

impl InMemoryAuthService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the id registered for `email`, if any.
    pub async fn account_for(&self, email: &str) -> Option<AccountId> {
        self.accounts
            .read()
            .await
            .get(&email.to_lowercase())
            .cloned()
    }

    pub async fn account_count(&self) -> usize {
        self.accounts.read().await.len()
    }
}

#[async_trait]
impl AuthService for InMemoryAuthService {
    async fn create_account(
        &self,
        email: &str,
        _password: &str,
    ) -> Result<AccountId, ServiceError> {
        // Emails are case-insensitive for account lookup
        let key = email.to_lowercase();
        let mut accounts = self.accounts.write().await;

        if accounts.contains_key(&key) {
            return Err(ServiceError::new(
                "email-already-in-use",
                "The email address is already in use by another account.",
            ));
        }

        let id = AccountId::new(Uuid::new_v4().to_string());
        accounts.insert(key, id.clone());
        tracing::debug!("[InMemoryAuth] Created account {}", id);
        Ok(id)
    }
}
