//! Configuration service implementation.
//!
//! Loads `StorefrontConfig` from `config.toml` and layers environment
//! overrides on top. Priority: environment > file > built-in defaults.

use crate::paths::StorefrontPaths;
use std::fs;
use std::path::{Path, PathBuf};
use storefront_core::config::StorefrontConfig;
use storefront_core::error::{Result, StorefrontError};

pub const ENV_API_URL: &str = "STOREFRONT_API_URL";
pub const ENV_STORAGE_PATH: &str = "STOREFRONT_STORAGE_PATH";
pub const ENV_LOG: &str = "STOREFRONT_LOG";

#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
}

impl ConfigService {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Service for `<config dir>/storefront/config.toml`.
    pub fn default_location() -> Result<Self> {
        let path = StorefrontPaths::config_file().map_err(|e| StorefrontError::config(e.to_string()))?;
        Ok(Self::new(path))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the file and applies overrides from the process environment.
    pub fn load(&self) -> Result<StorefrontConfig> {
        let mut config = self.load_file()?;
        apply_overrides(&mut config, |key| std::env::var(key).ok());
        Ok(config)
    }

    /// Loads the file only. A missing or empty file yields defaults.
    pub fn load_file(&self) -> Result<StorefrontConfig> {
        if !self.path.exists() {
            tracing::debug!("[ConfigService] No config at {:?}, using defaults", self.path);
            return Ok(StorefrontConfig::default());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(StorefrontConfig::default());
        }

        toml::from_str(&content).map_err(|e| {
            StorefrontError::config(format!(
                "Failed to parse configuration file at {}: {}",
                self.path.display(),
                e
            ))
        })
    }

    pub fn save(&self, config: &StorefrontConfig) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(config)?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

/// Applies environment overrides using `lookup` to read variables.
pub fn apply_overrides(config: &mut StorefrontConfig, lookup: impl Fn(&str) -> Option<String>) {
    let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(url) = non_empty(ENV_API_URL) {
        config.api.base_url = url;
    }
    if let Some(path) = non_empty(ENV_STORAGE_PATH) {
        config.storage.path = Some(PathBuf::from(path));
    }
    if let Some(level) = non_empty(ENV_LOG) {
        config.logging.level = level;
    }

    config.api.base_url = config.api.base_url.trim_end_matches('/').to_string();
}

/// Where the persistent key-value file lives for this configuration.
pub fn storage_path(config: &StorefrontConfig) -> Result<PathBuf> {
    match &config.storage.path {
        Some(path) => Ok(path.clone()),
        None => StorefrontPaths::storage_file().map_err(|e| StorefrontError::config(e.to_string())),
    }
}
