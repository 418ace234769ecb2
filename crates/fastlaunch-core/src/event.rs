//! Events a launch worker sends to the hosting window.

use serde::Serialize;

/// Error text shown to the user when a launch fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorReport {
    /// Short message, the error's display text.
    pub message: String,
    /// Full cause chain, and a backtrace when one was captured.
    pub traceback: String,
    /// Whether dismissing the report terminates the application.
    pub quit: bool,
}

/// Notification from the worker to the host.
///
/// The worker never touches the host directly; it only sends these over an
/// unbounded channel and the host applies them on its own thread.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum LaunchEvent {
    /// An update download began; show a progress indicator.
    ProgressStarted,
    /// One more file of the update was written.
    Progress { fraction: f64, file: String },
    /// The update download finished; hide the indicator.
    ProgressFinished,
    /// Minimize the host window.
    Minimize,
    /// Show a blocking error report.
    ShowError(ErrorReport),
    /// The launch completed; close the host window.
    Close,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serializes_tagged() {
        let event = LaunchEvent::Progress {
            fraction: 0.5,
            file: "data/a.pak".into(),
        };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["type"], "Progress");
        assert_eq!(value["data"]["file"], "data/a.pak");

        let value = serde_json::to_value(LaunchEvent::Close).unwrap();
        assert_eq!(value["type"], "Close");
    }
}
