//! Unified path management for launcher data.
//!
//! # Directory Structure
//!
//! ```text
//! <os-config>/fastlaunch/          # Config directory
//! ├── config.toml                  # Application configuration
//! └── logs/                        # Application logs
//!     └── fastlaunch.log.YYYY-MM-DD
//!
//! <os-data>/fastlaunch/            # Data directory
//! ├── shortcut/                    # Direct launch shortcuts (<id>.json)
//! ├── account_shortcut/            # Delegated launch shortcuts (<id>.json)
//! └── account/                     # Account cookie blobs (<name>.bytes)
//! ```
//!
//! When a base path is given, both directories collapse onto it. Tests use
//! this to keep everything inside a temporary directory.

use std::path::{Path, PathBuf};
use thiserror::Error;

const APP_NAME: &str = "fastlaunch";

/// The platform has no directory of the requested kind.
#[derive(Debug, Error)]
pub enum PathError {
    #[error("Cannot resolve the platform {0} directory")]
    PlatformDirMissing(&'static str),
}

impl From<PathError> for fastlaunch_core::LaunchError {
    fn from(err: PathError) -> Self {
        fastlaunch_core::LaunchError::config(err.to_string())
    }
}

/// Resolves every on-disk location the launcher owns.
#[derive(Debug, Clone, Default)]
pub struct FastLaunchPaths {
    base_path: Option<PathBuf>,
}

impl FastLaunchPaths {
    /// Creates a resolver. `None` uses the platform directories.
    pub fn new(base_path: Option<&Path>) -> Self {
        Self {
            base_path: base_path.map(Path::to_path_buf),
        }
    }

    /// Returns the configuration directory (e.g., `~/.config/fastlaunch/`).
    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        match &self.base_path {
            Some(base) => Ok(base.clone()),
            None => dirs::config_dir()
                .map(|dir| dir.join(APP_NAME))
                .ok_or(PathError::PlatformDirMissing("config")),
        }
    }

    /// Returns the data directory (e.g., `~/.local/share/fastlaunch/`).
    pub fn data_dir(&self) -> Result<PathBuf, PathError> {
        match &self.base_path {
            Some(base) => Ok(base.clone()),
            None => dirs::data_dir()
                .map(|dir| dir.join(APP_NAME))
                .ok_or(PathError::PlatformDirMissing("data")),
        }
    }

    pub fn config_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("config.toml"))
    }

    pub fn logs_dir(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("logs"))
    }

    /// Directory of direct launch shortcuts.
    pub fn shortcut_dir(&self) -> Result<PathBuf, PathError> {
        Ok(self.data_dir()?.join("shortcut"))
    }

    /// Directory of delegated launch shortcuts.
    pub fn account_shortcut_dir(&self) -> Result<PathBuf, PathError> {
        Ok(self.data_dir()?.join("account_shortcut"))
    }

    /// Directory of account cookie blobs.
    pub fn account_dir(&self) -> Result<PathBuf, PathError> {
        Ok(self.data_dir()?.join("account"))
    }

    /// Path of the cookie blob for an account name, e.g. `account/main.bytes`.
    pub fn account_file(&self, account: &str) -> Result<PathBuf, PathError> {
        Ok(self.account_dir()?.join(account).with_extension("bytes"))
    }
}
