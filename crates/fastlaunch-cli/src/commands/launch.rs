//! Wires the infrastructure into a launch context and acts as the host for
//! the launch worker.

use anyhow::{Context, Result};
use fastlaunch_application::{LaunchContext, LaunchJob, spawn_launch};
use fastlaunch_core::config::RunMode;
use fastlaunch_core::event::{ErrorReport, LaunchEvent};
use fastlaunch_core::messages::{Lang, MessageKey, t};
use fastlaunch_infrastructure::{
    ConfigService, FastLaunchPaths, FileCookieStore, JsonShortcutRepository,
    ReqwestSessionFactory, TokioProcessRunner,
};
use std::io::Write;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::sync::mpsc;

pub async fn run(job: LaunchJob, mode: RunMode, paths: FastLaunchPaths) -> Result<ExitCode> {
    let config_service = ConfigService::new(&paths)?;
    let config = config_service
        .load()
        .with_context(|| format!("Failed to load {}", config_service.path().display()))?;
    tracing::debug!("Loaded config from {}", config_service.path().display());

    let lang = config.lang;
    let (tx, mut rx) = mpsc::unbounded_channel();
    let ctx = LaunchContext {
        shortcuts: Arc::new(JsonShortcutRepository::new(&paths)?),
        cookies: Arc::new(FileCookieStore::new(
            config.dmm_game_player_session_file.clone(),
        )),
        sessions: Arc::new(ReqwestSessionFactory::new(&config)?),
        processes: Arc::new(TokioProcessRunner::new()),
        paths,
        config,
        mode,
        events: tx,
    };

    let handle = spawn_launch(Arc::new(ctx), job);

    let mut exit = ExitCode::SUCCESS;
    while let Some(event) = rx.recv().await {
        match event {
            LaunchEvent::ProgressStarted => {
                eprintln!("{}...", t(lang, MessageKey::Downloading));
            }
            LaunchEvent::Progress { fraction, file } => {
                eprint!("\r{:>3.0}% {}\x1b[K", fraction * 100.0, file);
                let _ = std::io::stderr().flush();
            }
            LaunchEvent::ProgressFinished => eprintln!(),
            LaunchEvent::Minimize => tracing::debug!("Host asked to minimize"),
            LaunchEvent::ShowError(report) => {
                show_error(lang, &report);
                if report.quit {
                    exit = ExitCode::FAILURE;
                }
            }
            LaunchEvent::Close => break,
        }
    }

    let outcome = handle.await.context("Launch task aborted")?;
    match outcome {
        Ok(()) => Ok(exit),
        Err(err) if mode.is_develop() => Err(err),
        Err(_) => Ok(ExitCode::FAILURE),
    }
}

fn show_error(lang: Lang, report: &ErrorReport) {
    eprintln!("{}", t(lang, MessageKey::LaunchFailed));
    eprintln!("{}", report.message);
    eprintln!();
    eprintln!("{}", report.traceback);
}
