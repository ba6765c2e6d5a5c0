//! Remote service traits.
//!
//! The signup workflow only ever talks to these two traits, so real SDK
//! clients, local backends and test doubles are interchangeable.

use super::model::{AccountId, UserRecord};
use crate::error::ServiceError;
use async_trait::async_trait;

/// Authentication backend that owns credentials.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Creates an account for `email` / `password`.
    ///
    /// # Returns
    ///
    /// - `Ok(AccountId)`: identifier of the new account
    /// - `Err(ServiceError)`: the backend refused or failed; passed through unchanged
    async fn create_account(&self, email: &str, password: &str)
    -> Result<AccountId, ServiceError>;
}

/// Document store holding one `UserRecord` per account.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Persists `record` under `account_id`, replacing any previous document.
    async fn save_profile(
        &self,
        account_id: &AccountId,
        record: &UserRecord,
    ) -> Result<(), ServiceError>;

    /// Reads back the document stored under `account_id`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(UserRecord))`: document found
    /// - `Ok(None)`: nothing stored for this account
    /// - `Err(ServiceError)`: the backend failed
    async fn find_profile(&self, account_id: &AccountId)
    -> Result<Option<UserRecord>, ServiceError>;
}
