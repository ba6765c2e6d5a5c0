//! Client-side validation of the signup form.
//!
//! Checks run in a fixed order and stop at the first failure:
//! required fields, email format, password strength, password confirmation.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::user::DraftProfile;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,64}$")
        .expect("email pattern is a valid regex")
});

/// Reasons a draft is rejected before any remote call is made.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationError {
    #[error("Please fill in all the required fields.")]
    EmptyFields,

    #[error("Please enter a valid email address.")]
    InvalidEmailFormat,

    #[error(
        "Your password must be at least 7 characters long and contain an uppercase letter and a digit."
    )]
    WeakPassword,

    #[error("The passwords do not match.")]
    PasswordsNotEqual,
}

/// Returns true when `email` looks like `local-part@domain.tld`.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Password strength rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordPolicy {
    /// Minimum length in characters
    pub min_length: usize,
    pub require_uppercase: bool,
    pub require_digit: bool,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: 7,
            require_uppercase: true,
            require_digit: true,
        }
    }
}

impl PasswordPolicy {
    pub fn is_satisfied_by(&self, password: &str) -> bool {
        if password.chars().count() < self.min_length {
            return false;
        }
        if self.require_uppercase && !password.chars().any(|c| c.is_ascii_uppercase()) {
            return false;
        }
        if self.require_digit && !password.chars().any(|c| c.is_ascii_digit()) {
            return false;
        }
        true
    }
}

/// Validates a whole draft against the form rules.
#[derive(Debug, Clone, Default)]
pub struct FormValidator {
    policy: PasswordPolicy,
}

impl FormValidator {
    pub fn new(policy: PasswordPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &PasswordPolicy {
        &self.policy
    }

    /// Runs every check in priority order and reports the first failure.
    pub fn validate(&self, draft: &DraftProfile) -> Result<(), ValidationError> {
        let required = [
            &draft.email,
            &draft.password,
            &draft.confirm_password,
            &draft.lastname,
            &draft.firstname,
        ];
        if required.iter().any(|field| field.trim().is_empty()) {
            return Err(ValidationError::EmptyFields);
        }

        if !is_valid_email(&draft.email) {
            return Err(ValidationError::InvalidEmailFormat);
        }

        if !self.policy.is_satisfied_by(&draft.password) {
            return Err(ValidationError::WeakPassword);
        }

        // Byte-exact, case-sensitive
        if draft.password != draft.confirm_password {
            return Err(ValidationError::PasswordsNotEqual);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_draft() -> DraftProfile {
        DraftProfile {
            lastname: "Doe".to_string(),
            firstname: "Jane".to_string(),
            email: "user@example.com".to_string(),
            password: "Abc1234".to_string(),
            confirm_password: "Abc1234".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_draft_passes() {
        assert_eq!(FormValidator::default().validate(&valid_draft()), Ok(()));
    }

    #[test]
    fn test_each_required_field_is_checked() {
        let validator = FormValidator::default();
        let blankers: [fn(&mut DraftProfile); 5] = [
            |d| d.email.clear(),
            |d| d.password.clear(),
            |d| d.confirm_password.clear(),
            |d| d.lastname = "   ".to_string(),
            |d| d.firstname = "\t\n".to_string(),
        ];

        for blank in blankers {
            let mut draft = valid_draft();
            blank(&mut draft);
            assert_eq!(validator.validate(&draft), Err(ValidationError::EmptyFields));
        }
    }

    #[test]
    fn test_empty_fields_reported_before_other_failures() {
        // Bad email, weak and mismatched password, plus an empty name
        let draft = DraftProfile {
            lastname: String::new(),
            firstname: "Jane".to_string(),
            email: "not-an-email".to_string(),
            password: "abc".to_string(),
            confirm_password: "xyz".to_string(),
            ..Default::default()
        };
        assert_eq!(
            FormValidator::default().validate(&draft),
            Err(ValidationError::EmptyFields)
        );
    }

    #[test]
    fn test_email_format() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("first.last+tag@mail.example.co"));
        assert!(!is_valid_email("user@com"));
        assert!(!is_valid_email("user.example.com"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("user@example.c"));
        assert!(!is_valid_email("user@example.c0m"));
        assert!(!is_valid_email(" user@example.com"));
    }

    #[test]
    fn test_email_top_level_segment_length() {
        let tld_64 = "a".repeat(64);
        let tld_65 = "a".repeat(65);
        assert!(is_valid_email(&format!("user@example.{}", tld_64)));
        assert!(!is_valid_email(&format!("user@example.{}", tld_65)));
        assert!(is_valid_email("user@example.io"));
    }

    #[test]
    fn test_email_checked_before_password() {
        let mut draft = valid_draft();
        draft.email = "user@com".to_string();
        draft.password = "weak".to_string();
        assert_eq!(
            FormValidator::default().validate(&draft),
            Err(ValidationError::InvalidEmailFormat)
        );
    }

    #[test]
    fn test_password_strength() {
        let policy = PasswordPolicy::default();
        assert!(policy.is_satisfied_by("Abc1234"));
        assert!(!policy.is_satisfied_by("abc1234"));
        assert!(!policy.is_satisfied_by("ABCDEFG"));
        assert!(!policy.is_satisfied_by("Ab1"));
    }

    #[test]
    fn test_password_strength_checked_before_equality() {
        let mut draft = valid_draft();
        draft.password = "abc1234".to_string();
        draft.confirm_password = "different".to_string();
        assert_eq!(
            FormValidator::default().validate(&draft),
            Err(ValidationError::WeakPassword)
        );
    }

    #[test]
    fn test_password_equality() {
        let mut draft = valid_draft();
        draft.confirm_password = "Abc1235".to_string();
        assert_eq!(
            FormValidator::default().validate(&draft),
            Err(ValidationError::PasswordsNotEqual)
        );

        draft.confirm_password = "abc1234".to_string();
        assert_eq!(
            FormValidator::default().validate(&draft),
            Err(ValidationError::PasswordsNotEqual)
        );
    }

    #[test]
    fn test_custom_policy() {
        let validator = FormValidator::new(PasswordPolicy {
            min_length: 10,
            require_uppercase: false,
            require_digit: true,
        });
        assert!(!validator.policy().is_satisfied_by("Abc1234"));
        assert!(validator.policy().is_satisfied_by("abcdefghi1"));
    }

    #[test]
    fn test_descriptions_are_fixed() {
        assert_eq!(
            ValidationError::PasswordsNotEqual.to_string(),
            "The passwords do not match."
        );
        assert_eq!(
            ValidationError::EmptyFields.to_string(),
            "Please fill in all the required fields."
        );
    }
}
