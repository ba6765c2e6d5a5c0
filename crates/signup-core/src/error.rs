//! Error types for the signup workspace.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::validation::ValidationError;

/// An opaque error reported by one of the remote services.
///
/// The workflow never inspects or rewrites these; they are handed to the
/// presentation layer exactly as the service produced them.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{message}")]
pub struct ServiceError {
    /// Machine-readable code supplied by the service (e.g. "email-already-in-use")
    pub code: String,
    /// Human-readable message supplied by the service
    pub message: String,
}

impl ServiceError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// A shared error type for the signup crates.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum SignupError {
    /// The draft failed local validation; no remote call was made
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A submission is already running for this screen
    #[error("A submission is already in progress")]
    SubmissionInProgress,

    /// A profile-save retry was requested but no account is waiting for one
    #[error("No account is waiting for its profile to be saved")]
    NoOrphanedAccount,

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML"
        message: String,
    },
}

impl SignupError {
    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns the validation failure kind, if this is one.
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(kind) => Some(kind),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for SignupError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, SignupError>`.
pub type Result<T> = std::result::Result<T, SignupError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_is_transparent() {
        let err: SignupError = ValidationError::PasswordsNotEqual.into();
        assert!(err.is_validation());
        assert_eq!(err.to_string(), ValidationError::PasswordsNotEqual.to_string());
        assert_eq!(err.as_validation(), Some(&ValidationError::PasswordsNotEqual));
    }

    #[test]
    fn test_service_error_displays_message_only() {
        let err = ServiceError::new("network-error", "The network connection was lost.");
        assert_eq!(err.to_string(), "The network connection was lost.");
        assert_eq!(err.code, "network-error");
    }

    #[test]
    fn test_toml_error_conversion() {
        let parse_err = toml::from_str::<toml::Value>("= broken").unwrap_err();
        let err: SignupError = parse_err.into();
        match err {
            SignupError::Serialization { format, .. } => assert_eq!(format, "TOML"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
