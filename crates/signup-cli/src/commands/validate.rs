use signup_core::config::SignupConfig;
use signup_core::user::DraftProfile;
use signup_core::validation::FormValidator;
use std::process::ExitCode;

/// Prints `ok` or the first validation failure.
pub fn run(config: &SignupConfig, draft: &DraftProfile) -> ExitCode {
    let validator = FormValidator::new(config.validation.password_policy());
    match validator.validate(draft) {
        Ok(()) => {
            println!("ok");
            ExitCode::SUCCESS
        }
        Err(kind) => {
            println!("{}", kind);
            ExitCode::FAILURE
        }
    }
}
