//! Localized user-facing messages.

use serde::{Deserialize, Serialize};

/// Display language.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    #[default]
    Ja,
    En,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKey {
    /// The title requires administrator privileges.
    AdminError,
    /// The account blob had no login cookie before the vendor client ran.
    ExportError,
    /// The vendor client left no login cookie after it exited.
    ImportError,
    /// Title of the error report.
    LaunchFailed,
    /// Label of the download progress indicator.
    Downloading,
}

/// Looks up the message for `key` in `lang`.
pub fn t(lang: Lang, key: MessageKey) -> &'static str {
    match (lang, key) {
        (Lang::Ja, MessageKey::AdminError) => {
            "このゲームは管理者権限が必要です。管理者として実行してください。"
        }
        (Lang::En, MessageKey::AdminError) => {
            "This game requires administrator privileges. Run the launcher as administrator."
        }
        (Lang::Ja, MessageKey::ExportError) => {
            "アカウントのログイン情報がありません。アカウントを再度インポートしてください。"
        }
        (Lang::En, MessageKey::ExportError) => {
            "The account has no stored login. Import the account again."
        }
        (Lang::Ja, MessageKey::ImportError) => {
            "DMMGamePlayer からログイン情報を取得できませんでした。ログインした状態で終了してください。"
        }
        (Lang::En, MessageKey::ImportError) => {
            "No login was found after DMMGamePlayer exited. Stay logged in before closing it."
        }
        (Lang::Ja, MessageKey::LaunchFailed) => "起動に失敗しました",
        (Lang::En, MessageKey::LaunchFailed) => "Launch failed",
        (Lang::Ja, MessageKey::Downloading) => "ダウンロード中",
        (Lang::En, MessageKey::Downloading) => "Downloading",
    }
}
