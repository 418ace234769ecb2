//! JSON file backed shortcut repository.

use crate::paths::FastLaunchPaths;
use fastlaunch_core::error::{LaunchError, Result};
use fastlaunch_core::shortcut::{LauncherShortcutData, ShortcutData, ShortcutRepository};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Reads shortcuts from `<dir>/<id>.json`.
#[derive(Debug, Clone)]
pub struct JsonShortcutRepository {
    shortcut_dir: PathBuf,
    account_shortcut_dir: PathBuf,
}

impl JsonShortcutRepository {
    pub fn new(paths: &FastLaunchPaths) -> Result<Self> {
        Ok(Self::with_dirs(
            paths.shortcut_dir()?,
            paths.account_shortcut_dir()?,
        ))
    }

    pub fn with_dirs(shortcut_dir: PathBuf, account_shortcut_dir: PathBuf) -> Self {
        Self {
            shortcut_dir,
            account_shortcut_dir,
        }
    }

    fn file_path(dir: &Path, id: &str) -> PathBuf {
        dir.join(id).with_extension("json")
    }

    fn read<T: DeserializeOwned>(dir: &Path, id: &str) -> Result<T> {
        let path = Self::file_path(dir, id);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(LaunchError::not_found("shortcut", id));
            }
            Err(e) => return Err(e.into()),
        };
        tracing::debug!("Loaded shortcut {}", path.display());
        Ok(serde_json::from_str(&content)?)
    }

    fn write<T: Serialize>(dir: &Path, id: &str, data: &T) -> Result<()> {
        fs::create_dir_all(dir)?;
        let json = serde_json::to_string_pretty(data)?;
        fs::write(Self::file_path(dir, id), json)?;
        Ok(())
    }
}

impl ShortcutRepository for JsonShortcutRepository {
    fn load_shortcut(&self, id: &str) -> Result<ShortcutData> {
        Self::read(&self.shortcut_dir, id)
    }

    fn load_launcher_shortcut(&self, id: &str) -> Result<LauncherShortcutData> {
        Self::read(&self.account_shortcut_dir, id)
    }

    fn save_shortcut(&self, id: &str, data: &ShortcutData) -> Result<()> {
        Self::write(&self.shortcut_dir, id, data)
    }

    fn save_launcher_shortcut(&self, id: &str, data: &LauncherShortcutData) -> Result<()> {
        Self::write(&self.account_shortcut_dir, id, data)
    }
}
