use crate::messages::Lang;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable that switches the launcher into develop mode.
pub const DEVELOP_ENV: &str = "FASTLAUNCH_DEVELOP";

const VENDOR_DIR: &str = "dmmgameplayer5";

/// How failures are surfaced and which policy checks run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RunMode {
    /// Admin check enforced, failures shown as an error report.
    #[default]
    Production,
    /// Admin check skipped, failures propagate straight to the console.
    Develop,
}

impl RunMode {
    /// Develop when `flag` is set or [`DEVELOP_ENV`] holds a truthy value.
    pub fn resolve(flag: bool) -> Self {
        let from_env = std::env::var(DEVELOP_ENV)
            .map(|v| is_truthy(&v))
            .unwrap_or(false);
        if flag || from_env {
            RunMode::Develop
        } else {
            RunMode::Production
        }
    }

    pub fn is_develop(&self) -> bool {
        matches!(self, RunMode::Develop)
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Application configuration, stored as `config.toml`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Install directory of the vendor client.
    pub dmm_game_player_program_folder: PathBuf,
    /// Executable name inside the install directory.
    pub dmm_game_player_executable: String,
    /// The vendor client's config document holding the product table.
    pub dmm_game_player_config_file: PathBuf,
    /// Where the vendor client reads its active session from.
    pub dmm_game_player_session_file: PathBuf,
    /// Directory receiving per-product DRM tokens.
    pub dmm_game_player_hidden_folder: PathBuf,
    pub api_base_url: String,
    pub user_agent: String,
    pub lang: Lang,
}

impl Default for AppConfig {
    fn default() -> Self {
        let vendor_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(VENDOR_DIR);
        Self {
            dmm_game_player_program_folder: PathBuf::from(r"C:\Program Files\DMMGamePlayer"),
            dmm_game_player_executable: "DMMGamePlayer.exe".to_string(),
            dmm_game_player_config_file: vendor_dir.join("dmmgame.cnf"),
            dmm_game_player_session_file: vendor_dir.join("session.bytes"),
            dmm_game_player_hidden_folder: vendor_dir.join(".drm"),
            api_base_url: "https://apidgp-gameplayer.games.dmm.com".to_string(),
            user_agent: "DMMGamePlayer5-Win/5.3.12 Electron/27.2.3".to_string(),
            lang: Lang::default(),
        }
    }
}
