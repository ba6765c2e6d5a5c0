//! Configuration service implementation.
//!
//! Loads `SignupConfig` from `config.toml`, by default
//! `~/.config/signup/config.toml`.

use signup_core::config::SignupConfig;
use signup_core::error::{Result, SignupError};
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

/// Loads and caches the signup configuration.
#[derive(Debug, Clone)]
pub struct ConfigService {
    /// Explicit config file; `None` means the platform default location
    path: Option<PathBuf>,
    /// Cached configuration loaded from file
    config: Arc<RwLock<Option<SignupConfig>>>,
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigService {
    /// Creates a service reading the platform default config file.
    pub fn new() -> Self {
        Self {
            path: None,
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Creates a service reading `path` instead of the default location.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Returns `<config_dir>/signup/config.toml`, if the platform has a config dir.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("signup").join("config.toml"))
    }

    /// Gets the configuration, loading it from file if not cached.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn get_config(&self) -> Result<SignupConfig> {
        if let Some(cached) = self
            .config
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
        {
            return Ok(cached.clone());
        }

        let loaded = match self.path.clone().or_else(Self::default_config_path) {
            Some(path) => Self::load_from_path(&path)?,
            None => {
                tracing::debug!("[ConfigService] No config directory, using defaults");
                SignupConfig::default()
            }
        };

        *self.config.write().unwrap_or_else(PoisonError::into_inner) = Some(loaded.clone());
        Ok(loaded)
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        *self.config.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Reads a config file.
    ///
    /// # Returns
    ///
    /// - `Ok(SignupConfig)`: parsed config, or defaults if the file is missing or blank
    /// - `Err(SignupError)`: the file exists but cannot be read or parsed
    pub fn load_from_path(path: &Path) -> Result<SignupConfig> {
        if !path.exists() {
            tracing::debug!("[ConfigService] {} not found, using defaults", path.display());
            return Ok(SignupConfig::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            SignupError::io(format!("Failed to read config file at {}: {}", path.display(), e))
        })?;

        if content.trim().is_empty() {
            return Ok(SignupConfig::default());
        }

        let config: SignupConfig = toml::from_str(&content)?;
        tracing::info!("[ConfigService] Loaded config from {}", path.display());
        Ok(config)
    }
}
