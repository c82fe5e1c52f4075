//! Unified path management for storefront files.
//!
//! ```text
//! ~/.config/storefront/        # Config directory (platform dependent)
//! ├── config.toml              # Application configuration
//! └── storage.json             # Persistent key-value store (token, rewards)
//! ```

use std::path::PathBuf;

const APP_DIR: &str = "storefront";
const CONFIG_FILE: &str = "config.toml";
const STORAGE_FILE: &str = "storage.json";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Platform config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot determine config directory"),
        }
    }
}

impl std::error::Error for PathError {}

pub struct StorefrontPaths;

impl StorefrontPaths {
    /// Returns the storefront configuration directory (e.g. `~/.config/storefront/`).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::ConfigDirNotFound)
    }

    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }

    pub fn storage_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join(STORAGE_FILE))
    }
}
