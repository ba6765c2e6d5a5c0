use serde::{Deserialize, Serialize};

use crate::error::ServiceError;
use crate::user::{AccountId, UserRecord};

/// Outcomes published by the signup workflow, one per remote stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SignupEvent {
    /// The authentication service issued a new account.
    AccountCreationSucceeded { account_id: AccountId },
    /// The authentication service refused or failed; no profile save follows.
    AccountCreationFailed { error: ServiceError },
    /// The profile could not be stored. The account in `account_id` still
    /// exists without a profile.
    ProfileSaveFailed {
        account_id: AccountId,
        error: ServiceError,
    },
    /// The profile document was stored.
    ProfileSaveSucceeded {
        account_id: AccountId,
        record: UserRecord,
    },
}

impl SignupEvent {
    /// True for the events that end a submission.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::AccountCreationSucceeded { .. })
    }
}
