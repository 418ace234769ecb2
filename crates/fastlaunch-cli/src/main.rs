use anyhow::Result;
use clap::{Parser, Subcommand};
use fastlaunch_application::LaunchJob;
use fastlaunch_core::config::RunMode;
use fastlaunch_infrastructure::FastLaunchPaths;
use std::process::ExitCode;

mod commands;
mod logging;

#[derive(Parser)]
#[command(name = "fastlaunch")]
#[command(about = "Launch DMM GAME PLAYER titles from a stored account session", long_about = None)]
struct Cli {
    /// Skip the administrator check and report failures on the console
    #[arg(long, global = true)]
    develop: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch a game directly through the launch API
    Launch {
        /// Shortcut id under the shortcut directory
        id: String,
    },
    /// Run DMMGamePlayer with an account's stored session
    Launcher {
        /// Shortcut id under the account shortcut directory
        id: String,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let mode = RunMode::resolve(cli.develop);
    let paths = FastLaunchPaths::default();

    let _guard = logging::init(&paths.logs_dir()?, mode)?;

    let job = match cli.command {
        Commands::Launch { id } => LaunchJob::Game(id),
        Commands::Launcher { id } => LaunchJob::Client(id),
    };

    commands::launch::run(job, mode, paths).await
}
