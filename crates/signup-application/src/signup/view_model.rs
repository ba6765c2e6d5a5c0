//! Signup view-model.
//!
//! Holds the draft the screen edits and runs the two remote stages:
//!
//! 1. `AuthService::create_account` with the draft's email and password
//! 2. on success, `ProfileStore::save_profile` with a `UserRecord` built from
//!    the validated draft under the issued `AccountId`
//!
//! Each stage publishes its own success or failure event. The stages are not
//! transactional: when stage 2 fails the account from stage 1 stays behind.
//! That account and its record are kept as the "orphaned account" so the
//! screen can offer `retry_profile_save`.

use super::in_flight::InFlight;
use chrono::NaiveDate;
use signup_core::config::SignupConfig;
use signup_core::error::{Result, SignupError};
use signup_core::event::SignupEvent;
use signup_core::user::{
    AccountId, AuthService, DraftProfile, Gender, ProfileStore, UserRecord,
};
use signup_core::validation::{FormValidator, ValidationError};
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// View-model backing the account-creation screen.
///
/// Events are delivered in order on the receiver returned by [`SignupViewModel::new`].
/// After [`SignupViewModel::dismiss`] nothing more is delivered: results of
/// calls still in flight are dropped when they arrive.
pub struct SignupViewModel {
    /// Fields currently entered on the screen
    draft: RwLock<DraftProfile>,
    validator: FormValidator,
    auth_service: Arc<dyn AuthService>,
    profile_store: Arc<dyn ProfileStore>,
    /// Taken on dismiss so the receiver sees the stream end
    events: Mutex<Option<mpsc::UnboundedSender<SignupEvent>>>,
    /// Cancelled when the screen goes away
    liveness: CancellationToken,
    in_flight: AtomicBool,
    /// Account created in stage 1 whose profile save failed, with the
    /// record validated at submit
    orphaned_account: Mutex<Option<PendingProfile>>,
}

/// A profile waiting to be stored for an issued account.
#[derive(Debug, Clone)]
struct PendingProfile {
    account_id: AccountId,
    record: UserRecord,
}

impl SignupViewModel {
    /// Creates a view-model with the default form rules.
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        profile_store: Arc<dyn ProfileStore>,
    ) -> (Self, mpsc::UnboundedReceiver<SignupEvent>) {
        Self::with_validator(auth_service, profile_store, FormValidator::default())
    }

    /// Creates a view-model whose password policy comes from `config`.
    pub fn from_config(
        auth_service: Arc<dyn AuthService>,
        profile_store: Arc<dyn ProfileStore>,
        config: &SignupConfig,
    ) -> (Self, mpsc::UnboundedReceiver<SignupEvent>) {
        let validator = FormValidator::new(config.validation.password_policy());
        Self::with_validator(auth_service, profile_store, validator)
    }

    pub fn with_validator(
        auth_service: Arc<dyn AuthService>,
        profile_store: Arc<dyn ProfileStore>,
        validator: FormValidator,
    ) -> (Self, mpsc::UnboundedReceiver<SignupEvent>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let view_model = Self {
            draft: RwLock::new(DraftProfile::default()),
            validator,
            auth_service,
            profile_store,
            events: Mutex::new(Some(sender)),
            liveness: CancellationToken::new(),
            in_flight: AtomicBool::new(false),
            orphaned_account: Mutex::new(None),
        };
        (view_model, receiver)
    }

    // ============================================================================
    // Draft bindings
    // ============================================================================

    /// Returns a snapshot of the current draft.
    pub fn draft(&self) -> DraftProfile {
        self.draft
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn update_draft(&self, update: impl FnOnce(&mut DraftProfile)) {
        let mut draft = self.draft.write().unwrap_or_else(PoisonError::into_inner);
        update(&mut draft);
    }

    pub fn set_lastname(&self, lastname: impl Into<String>) {
        let lastname = lastname.into();
        self.update_draft(|d| d.lastname = lastname);
    }

    pub fn set_firstname(&self, firstname: impl Into<String>) {
        let firstname = firstname.into();
        self.update_draft(|d| d.firstname = firstname);
    }

    pub fn set_gender(&self, gender: Gender) {
        self.update_draft(|d| d.gender = gender);
    }

    pub fn set_birthdate(&self, birthdate: NaiveDate) {
        self.update_draft(|d| d.birthdate = birthdate);
    }

    pub fn set_email(&self, email: impl Into<String>) {
        let email = email.into();
        self.update_draft(|d| d.email = email);
    }

    pub fn set_password(&self, password: impl Into<String>) {
        let password = password.into();
        self.update_draft(|d| d.password = password);
    }

    pub fn set_confirm_password(&self, confirm_password: impl Into<String>) {
        let confirm_password = confirm_password.into();
        self.update_draft(|d| d.confirm_password = confirm_password);
    }

    // ============================================================================
    // Validation
    // ============================================================================

    /// Validates the current draft without touching the network.
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        self.validator.validate(&self.draft())
    }

    // ============================================================================
    // Workflow
    // ============================================================================

    /// Validates the draft and, if it passes, runs both remote stages.
    ///
    /// Validation failures are returned directly and nothing is published.
    /// Remote failures are never returned here; they arrive as events.
    ///
    /// # Errors
    ///
    /// - `SignupError::Validation` if the draft is rejected locally
    /// - `SignupError::SubmissionInProgress` if a submission is already running
    pub async fn submit(&self) -> Result<()> {
        if self.is_dismissed() {
            tracing::debug!("[Signup] Submit ignored: screen dismissed");
            return Ok(());
        }

        let _in_flight =
            InFlight::acquire(&self.in_flight).ok_or(SignupError::SubmissionInProgress)?;

        let draft = self.draft();
        if let Err(kind) = self.validator.validate(&draft) {
            tracing::debug!("[Signup] Draft rejected: {:?}", kind);
            return Err(kind.into());
        }

        tracing::info!("[Signup] Creating account");
        tracing::debug!("[Signup] Creating account for {}", draft.email);
        let result = self
            .auth_service
            .create_account(&draft.email, &draft.password)
            .await;

        if self.is_dismissed() {
            tracing::debug!("[Signup] Dropping account creation result: screen dismissed");
            return Ok(());
        }

        match result {
            Ok(account_id) => {
                tracing::info!("[Signup] Account created: {}", account_id);
                self.emit(SignupEvent::AccountCreationSucceeded {
                    account_id: account_id.clone(),
                });
                let record = draft.to_user_record();
                self.save_profile(PendingProfile { account_id, record })
                    .await;
            }
            Err(error) => {
                tracing::warn!(
                    "[Signup] Account creation failed ({}): {}",
                    error.code,
                    error
                );
                self.emit(SignupEvent::AccountCreationFailed { error });
            }
        }

        Ok(())
    }

    /// Stage 2: stores `record` under an account issued by stage 1.
    ///
    /// Only reached from `submit` with the id it was just given, or from
    /// `retry_profile_save` with the stored orphan.
    async fn save_profile(&self, pending: PendingProfile) {
        let PendingProfile { account_id, record } = pending;
        if self.is_dismissed() {
            tracing::debug!(
                "[Signup] Skipping profile save for {}: screen dismissed",
                account_id
            );
            return;
        }

        tracing::info!("[Signup] Saving profile for {}", account_id);
        let result = self.profile_store.save_profile(&account_id, &record).await;

        if self.is_dismissed() {
            tracing::debug!(
                "[Signup] Dropping profile save result for {}: screen dismissed",
                account_id
            );
            return;
        }

        match result {
            Ok(()) => {
                {
                    let mut orphaned = self.orphaned();
                    if orphaned
                        .as_ref()
                        .is_some_and(|orphan| orphan.account_id == account_id)
                    {
                        *orphaned = None;
                    }
                }
                self.update_draft(|d| *d = DraftProfile::default());
                tracing::info!("[Signup] Profile saved for {}", account_id);
                self.emit(SignupEvent::ProfileSaveSucceeded { account_id, record });
            }
            Err(error) => {
                tracing::warn!(
                    "[Signup] Profile save failed for {} ({}): {}; account has no profile",
                    account_id,
                    error.code,
                    error
                );
                let previous = self.orphaned().replace(PendingProfile {
                    account_id: account_id.clone(),
                    record,
                });
                if let Some(previous) = previous.filter(|p| p.account_id != account_id) {
                    // Only the latest orphan is kept for retry
                    tracing::warn!(
                        "[Signup] Account {} still has no profile and is no longer retried",
                        previous.account_id
                    );
                }
                self.emit(SignupEvent::ProfileSaveFailed { account_id, error });
            }
        }
    }

    /// Re-runs stage 2 for the account whose profile save last failed.
    ///
    /// Saves the record validated at submit time; later draft edits are not
    /// picked up. No new account is created.
    ///
    /// # Errors
    ///
    /// - `SignupError::NoOrphanedAccount` if there is nothing to retry
    /// - `SignupError::SubmissionInProgress` if a submission is already running
    pub async fn retry_profile_save(&self) -> Result<()> {
        let _in_flight =
            InFlight::acquire(&self.in_flight).ok_or(SignupError::SubmissionInProgress)?;

        let pending = self
            .orphaned()
            .clone()
            .ok_or(SignupError::NoOrphanedAccount)?;

        tracing::info!("[Signup] Retrying profile save for {}", pending.account_id);
        self.save_profile(pending).await;
        Ok(())
    }

    /// Account created without a stored profile, if any.
    pub fn orphaned_account(&self) -> Option<AccountId> {
        self.orphaned()
            .as_ref()
            .map(|orphan| orphan.account_id.clone())
    }

    fn orphaned(&self) -> MutexGuard<'_, Option<PendingProfile>> {
        self.orphaned_account
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    // ============================================================================
    // Lifecycle
    // ============================================================================

    /// Tears the screen down.
    ///
    /// Calls already in flight are left to finish but their results are
    /// dropped; the event stream ends and the draft is discarded.
    pub fn dismiss(&self) {
        if self.liveness.is_cancelled() {
            return;
        }
        tracing::debug!("[Signup] Screen dismissed");
        self.liveness.cancel();
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        self.update_draft(|d| *d = DraftProfile::default());
    }

    pub fn is_dismissed(&self) -> bool {
        self.liveness.is_cancelled()
    }

    /// Token cancelled on dismiss, for callers tying other work to this screen.
    pub fn liveness_token(&self) -> CancellationToken {
        self.liveness.clone()
    }

    fn emit(&self, event: SignupEvent) {
        let events = self.events.lock().unwrap_or_else(PoisonError::into_inner);
        match events.as_ref() {
            // Receiver may already be gone; nothing to deliver to
            Some(sender) => {
                let _ = sender.send(event);
            }
            None => tracing::debug!("[Signup] Event dropped after dismiss"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use signup_core::error::ServiceError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingAuth {
        calls: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl AuthService for CountingAuth {
        async fn create_account(
            &self,
            _email: &str,
            _password: &str,
        ) -> std::result::Result<AccountId, ServiceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(AccountId::new("uid-1"))
        }
    }

    struct NullStore;

    #[async_trait::async_trait]
    impl ProfileStore for NullStore {
        async fn save_profile(
            &self,
            _account_id: &AccountId,
            _record: &UserRecord,
        ) -> std::result::Result<(), ServiceError> {
            Ok(())
        }

        async fn find_profile(
            &self,
            _account_id: &AccountId,
        ) -> std::result::Result<Option<UserRecord>, ServiceError> {
            Ok(None)
        }
    }

    fn view_model() -> (SignupViewModel, Arc<CountingAuth>, mpsc::UnboundedReceiver<SignupEvent>) {
        let auth = Arc::new(CountingAuth {
            calls: AtomicUsize::new(0),
        });
        let (vm, rx) = SignupViewModel::new(auth.clone(), Arc::new(NullStore));
        (vm, auth, rx)
    }

    #[test]
    fn test_setters_update_draft() {
        let (vm, _, _rx) = view_model();
        vm.set_lastname("Doe");
        vm.set_firstname("Jane");
        vm.set_gender(Gender::Female);
        vm.set_birthdate(NaiveDate::from_ymd_opt(1990, 4, 1).unwrap());
        vm.set_email("jane@example.com");
        vm.set_password("Abc1234");
        vm.set_confirm_password("Abc1234");

        let draft = vm.draft();
        assert_eq!(draft.lastname, "Doe");
        assert_eq!(draft.firstname, "Jane");
        assert_eq!(draft.gender, Gender::Female);
        assert_eq!(draft.birthdate, NaiveDate::from_ymd_opt(1990, 4, 1).unwrap());
        assert_eq!(draft.email, "jane@example.com");
        assert_eq!(vm.validate(), Ok(()));
    }

    #[test]
    fn test_validate_reports_empty_fields_on_fresh_draft() {
        let (vm, _, _rx) = view_model();
        assert_eq!(vm.validate(), Err(ValidationError::EmptyFields));
    }

    #[tokio::test]
    async fn test_invalid_draft_blocks_submission() {
        let (vm, auth, mut rx) = view_model();
        vm.set_lastname("Doe");
        vm.set_firstname("Jane");
        vm.set_email("jane@example");
        vm.set_password("Abc1234");
        vm.set_confirm_password("Abc1234");

        let err = vm.submit().await.unwrap_err();
        assert_eq!(err.as_validation(), Some(&ValidationError::InvalidEmailFormat));
        assert_eq!(auth.calls.load(Ordering::SeqCst), 0);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_retry_without_orphan_fails() {
        let (vm, _, _rx) = view_model();
        assert!(matches!(
            vm.retry_profile_save().await,
            Err(SignupError::NoOrphanedAccount)
        ));
    }

    #[tokio::test]
    async fn test_submit_after_dismiss_is_noop() {
        let (vm, auth, mut rx) = view_model();
        vm.set_lastname("Doe");
        vm.dismiss();

        assert!(vm.submit().await.is_ok());
        assert_eq!(auth.calls.load(Ordering::SeqCst), 0);
        assert_eq!(vm.draft(), DraftProfile::default());
        // Sender dropped on dismiss, so the stream has ended
        assert!(rx.recv().await.is_none());
    }
}
