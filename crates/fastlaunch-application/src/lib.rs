pub mod client_launcher;
pub mod context;
pub mod game_launcher;
pub mod launch_task;
pub mod output;

pub use client_launcher::ClientLauncher;
pub use context::LaunchContext;
pub use game_launcher::GameLauncher;
pub use launch_task::{LaunchJob, run_launch, spawn_launch};
