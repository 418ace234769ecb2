//! Runs a launch on a worker task and reports its outcome to the host.

use crate::client_launcher::ClientLauncher;
use crate::context::LaunchContext;
use crate::game_launcher::GameLauncher;
use anyhow::Context;
use fastlaunch_core::event::{ErrorReport, LaunchEvent};
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Which orchestrator to run, and for which shortcut.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchJob {
    /// Direct launch of `<shortcut-dir>/<id>.json`.
    Game(String),
    /// Delegated launch of `<account-shortcut-dir>/<id>.json`.
    Client(String),
}

/// Spawns `job` on its own task.
///
/// The handle resolves to the launch outcome. There is no cancellation: the
/// task runs until the launch succeeds, fails, or the child process exits.
pub fn spawn_launch(ctx: Arc<LaunchContext>, job: LaunchJob) -> JoinHandle<anyhow::Result<()>> {
    tokio::spawn(async move { run_launch(&ctx, job).await })
}

/// Runs `job` to completion on the current task.
///
/// On success the host is told to close. On failure in production the host
/// is told to minimize and show an error report that quits the application;
/// in develop mode no events are sent. Either way the error is returned.
pub async fn run_launch(ctx: &LaunchContext, job: LaunchJob) -> anyhow::Result<()> {
    let result = match &job {
        LaunchJob::Game(id) => GameLauncher::new(ctx)
            .launch(id)
            .await
            .with_context(|| format!("Failed to launch game shortcut '{}'", id)),
        LaunchJob::Client(id) => ClientLauncher::new(ctx)
            .launch(id)
            .await
            .with_context(|| format!("Failed to launch DMMGamePlayer shortcut '{}'", id)),
    };

    match result {
        Ok(()) => {
            ctx.emit(LaunchEvent::Close);
            Ok(())
        }
        Err(err) => {
            tracing::error!("{:#}", err);
            if !ctx.mode.is_develop() {
                ctx.emit(LaunchEvent::Minimize);
                ctx.emit(LaunchEvent::ShowError(error_report(&err)));
            }
            Err(err)
        }
    }
}

/// Builds the report shown for a failed launch.
///
/// The message is the innermost error's text; the traceback is the whole
/// context chain plus a backtrace when one was captured.
pub fn error_report(err: &anyhow::Error) -> ErrorReport {
    ErrorReport {
        message: err.root_cause().to_string(),
        traceback: format!("{:?}", err),
        quit: true,
    }
}
