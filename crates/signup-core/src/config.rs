//! Configuration model for the signup crates.
//!
//! Every field has a default so a missing or partial `config.toml`
//! still yields a usable configuration.

use serde::{Deserialize, Serialize};

use crate::validation::PasswordPolicy;

/// Root of `config.toml`.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupConfig {
    #[serde(default)]
    pub validation: ValidationSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Password strength rules applied by the form validator.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ValidationSettings {
    /// Minimum password length, counted in characters
    #[serde(default = "default_password_min_length")]
    pub password_min_length: usize,
    /// Require at least one uppercase letter
    #[serde(default = "default_true")]
    pub require_uppercase: bool,
    /// Require at least one digit
    #[serde(default = "default_true")]
    pub require_digit: bool,
}

fn default_password_min_length() -> usize {
    7
}

fn default_true() -> bool {
    true
}

impl Default for ValidationSettings {
    fn default() -> Self {
        Self {
            password_min_length: default_password_min_length(),
            require_uppercase: true,
            require_digit: true,
        }
    }
}

impl ValidationSettings {
    pub fn password_policy(&self) -> PasswordPolicy {
        PasswordPolicy {
            min_length: self.password_min_length,
            require_uppercase: self.require_uppercase,
            require_digit: self.require_digit,
        }
    }
}

/// Logging defaults, overridden at runtime by `RUST_LOG`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}
