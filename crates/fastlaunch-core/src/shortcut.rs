//! Shortcut descriptors and the repository that loads them.

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// A saved descriptor for launching a title directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortcutData {
    /// Product id as listed in the vendor client's config.
    pub product_id: String,
    /// Name of the account blob under the accounts directory, without extension.
    pub account_path: String,
    /// Extra arguments appended after the server-issued ones.
    #[serde(default)]
    pub game_args: String,
    /// Download a newer build before launching when the versions differ.
    #[serde(default = "default_auto_update")]
    pub auto_update: bool,
}

fn default_auto_update() -> bool {
    true
}

/// A saved descriptor for launching through the vendor client itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LauncherShortcutData {
    /// Name of the account blob under the accounts directory, without extension.
    pub account_path: String,
    /// Arguments passed to the vendor executable.
    #[serde(default)]
    pub dgp_args: String,
}

/// Loads shortcut descriptors by their opaque id.
///
/// Direct and delegated shortcuts live in separate directories, so the same
/// id may name one of each.
pub trait ShortcutRepository: Send + Sync {
    /// Loads `<shortcut-dir>/<id>.json`.
    ///
    /// # Errors
    ///
    /// `NotFound` when the file does not exist, `Serialization` when it is malformed.
    fn load_shortcut(&self, id: &str) -> Result<ShortcutData>;

    /// Loads `<account-shortcut-dir>/<id>.json`.
    fn load_launcher_shortcut(&self, id: &str) -> Result<LauncherShortcutData>;

    /// Writes a direct shortcut, replacing any existing one.
    fn save_shortcut(&self, id: &str, data: &ShortcutData) -> Result<()>;

    /// Writes a delegated shortcut, replacing any existing one.
    fn save_launcher_shortcut(&self, id: &str, data: &LauncherShortcutData) -> Result<()>;
}
