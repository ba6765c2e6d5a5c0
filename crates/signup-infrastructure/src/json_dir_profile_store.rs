//! Directory-backed profile store.
//!
//! Each profile lives in its own pretty-printed JSON document:
//!
//! ```text
//! <root>/
//! ├── 6f1c...e2.json
//! └── a93b...07.json
//! ```

use async_trait::async_trait;
use signup_core::error::ServiceError;
use signup_core::user::{AccountId, ProfileStore, UserRecord};
use std::path::{Path, PathBuf};

/// Profile store writing one `<account_id>.json` file per account.
#[derive(Debug, Clone)]
pub struct JsonDirProfileStore {
    root: PathBuf,
}

impl JsonDirProfileStore {
    /// Creates a store rooted at `root`. The directory is created on first save.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn document_path(&self, account_id: &AccountId) -> Result<PathBuf, ServiceError> {
        let id = account_id.as_str();
        let valid = !id.is_empty()
            && id != "."
            && !id.contains("..")
            && !id.contains(['/', '\\']);
        if !valid {
            return Err(ServiceError::new(
                "invalid-account-id",
                format!("Account id '{}' cannot be used as a document key", id),
            ));
        }
        Ok(self.root.join(format!("{}.json", id)))
    }
}

fn storage_error(action: &str, path: &Path, err: impl std::fmt::Display) -> ServiceError {
    ServiceError::new(
        "storage-error",
        format!("Failed to {} {}: {}", action, path.display(), err),
    )
}

#[async_trait]
impl ProfileStore for JsonDirProfileStore {
    async fn save_profile(
        &self,
        account_id: &AccountId,
        record: &UserRecord,
    ) -> Result<(), ServiceError> {
        let path = self.document_path(account_id)?;
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| storage_error("create", &self.root, e))?;

        let content =
            serde_json::to_vec_pretty(record).map_err(|e| storage_error("serialize", &path, e))?;

        // Write to a sibling temp file then rename, so readers never see a partial document
        let tmp_path = path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, content)
            .await
            .map_err(|e| storage_error("write", &tmp_path, e))?;
        tokio::fs::rename(&tmp_path, &path)
            .await
            .map_err(|e| storage_error("rename", &path, e))?;

        tracing::debug!("[JsonDirProfileStore] Saved {}", path.display());
        Ok(())
    }

    async fn find_profile(
        &self,
        account_id: &AccountId,
    ) -> Result<Option<UserRecord>, ServiceError> {
        let path = self.document_path(account_id)?;
        let content = match tokio::fs::read(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(storage_error("read", &path, e)),
        };

        serde_json::from_slice(&content)
            .map(Some)
            .map_err(|e| storage_error("parse", &path, e))
    }
}
