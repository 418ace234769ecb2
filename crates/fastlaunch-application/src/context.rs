use fastlaunch_core::config::{AppConfig, RunMode};
use fastlaunch_core::cookie::CookieStore;
use fastlaunch_core::dgp::DgpSessionFactory;
use fastlaunch_core::event::LaunchEvent;
use fastlaunch_core::process::ProcessRunner;
use fastlaunch_core::shortcut::ShortcutRepository;
use fastlaunch_infrastructure::FastLaunchPaths;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;

/// Everything one launch needs: collaborators, settings, and the channel to
/// the host.
///
/// A context is exclusively used by one launch at a time. Nothing guards two
/// launches that share an account blob.
pub struct LaunchContext {
    pub shortcuts: Arc<dyn ShortcutRepository>,
    pub cookies: Arc<dyn CookieStore>,
    pub sessions: Arc<dyn DgpSessionFactory>,
    pub processes: Arc<dyn ProcessRunner>,
    pub paths: FastLaunchPaths,
    pub config: AppConfig,
    pub mode: RunMode,
    pub events: UnboundedSender<LaunchEvent>,
}

impl LaunchContext {
    /// Sends an event to the host. A host that already went away is ignored.
    pub fn emit(&self, event: LaunchEvent) {
        let _ = self.events.send(event);
    }
}
