use anyhow::Result;
use signup_application::SignupViewModel;
use signup_core::SignupError;
use signup_core::config::SignupConfig;
use signup_core::event::SignupEvent;
use signup_core::user::{DraftProfile, ProfileStore};
use signup_infrastructure::{InMemoryAuthService, InMemoryProfileStore, JsonDirProfileStore};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

/// Runs the full signup against local backends and prints each event as a JSON line.
pub async fn run(
    config: &SignupConfig,
    draft: DraftProfile,
    store_dir: Option<PathBuf>,
) -> Result<ExitCode> {
    let profile_store: Arc<dyn ProfileStore> = match store_dir {
        Some(dir) => {
            tracing::info!("[Register] Storing profiles under {}", dir.display());
            Arc::new(JsonDirProfileStore::new(dir))
        }
        None => Arc::new(InMemoryProfileStore::new()),
    };
    let auth_service = Arc::new(InMemoryAuthService::new());

    let (view_model, mut events) =
        SignupViewModel::from_config(auth_service, profile_store, config);
    view_model.set_lastname(draft.lastname);
    view_model.set_firstname(draft.firstname);
    view_model.set_gender(draft.gender);
    view_model.set_birthdate(draft.birthdate);
    view_model.set_email(draft.email);
    view_model.set_password(draft.password);
    view_model.set_confirm_password(draft.confirm_password);

    match view_model.submit().await {
        Ok(()) => {}
        Err(SignupError::Validation(kind)) => {
            println!("{}", kind);
            return Ok(ExitCode::FAILURE);
        }
        Err(e) => return Err(e.into()),
    }

    let mut succeeded = false;
    while let Ok(event) = events.try_recv() {
        println!("{}", serde_json::to_string(&event)?);
        if let SignupEvent::ProfileSaveFailed { account_id, .. } = &event {
            tracing::warn!("[Register] Account {} was created without a profile", account_id);
        }
        succeeded = matches!(event, SignupEvent::ProfileSaveSucceeded { .. });
    }

    Ok(if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
