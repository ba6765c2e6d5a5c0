use async_trait::async_trait;
use signup_core::error::ServiceError;
use signup_core::user::{AccountId, ProfileStore, UserRecord};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Profile store backed by a map, one record per account.
#[derive(Debug, Default)]
pub struct InMemoryProfileStore {
    records: RwLock<HashMap<AccountId, UserRecord>>,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn save_profile(
        &self,
        account_id: &AccountId,
        record: &UserRecord,
    ) -> Result<(), ServiceError> {
        self.records
            .write()
            .await
            .insert(account_id.clone(), record.clone());
        Ok(())
    }

    async fn find_profile(
        &self,
        account_id: &AccountId,
    ) -> Result<Option<UserRecord>, ServiceError> {
        Ok(self.records.read().await.get(account_id).cloned())
    }
}
