//! Direct launch: authorize a title through the launch API and run its
//! executable without the vendor client.

use crate::context::LaunchContext;
use crate::output::drain_output;
use fastlaunch_core::error::{LaunchError, Result};
use fastlaunch_core::event::LaunchEvent;
use fastlaunch_core::messages::{MessageKey, t};
use fastlaunch_core::process::CommandSpec;
use fastlaunch_infrastructure::drm::write_drm_token;
use futures::TryStreamExt;
use std::path::PathBuf;

/// Splits an argument string on single spaces.
///
/// Arguments containing spaces cannot be expressed, and consecutive or
/// edge spaces produce empty arguments.
pub fn split_args(args: &str) -> Vec<String> {
    args.split(' ').map(str::to_string).collect()
}

pub struct GameLauncher<'a> {
    ctx: &'a LaunchContext,
}

impl<'a> GameLauncher<'a> {
    pub fn new(ctx: &'a LaunchContext) -> Self {
        Self { ctx }
    }

    /// Runs a direct launch for shortcut `id` until the game closes its output.
    pub async fn launch(&self, id: &str) -> Result<()> {
        let ctx = self.ctx;
        let data = ctx.shortcuts.load_shortcut(id)?;
        tracing::info!("Launching shortcut {} (product {})", id, data.product_id);

        let account_path = ctx.paths.account_file(&data.account_path)?;
        let session = ctx.sessions.open(ctx.cookies.read_bytes(&account_path)?)?;

        let mut dgp_config = session.get_config().await?;
        let game = dgp_config.find_product(&data.product_id)?;
        let game_type = game.game_type.clone();
        let install_dir = PathBuf::from(&game.detail.path);
        let installed_version = game.detail.version.clone();

        let response = session
            .launch(&data.product_id, &game_type)
            .await?
            .into_data()?;

        if let Some(token) = &response.drm_auth_token {
            let path = write_drm_token(
                &ctx.config.dmm_game_player_hidden_folder,
                &data.product_id,
                token,
            )?;
            tracing::info!("Wrote DRM token to {}", path.display());
        }

        if !ctx.mode.is_develop() && response.is_administrator && !ctx.processes.is_elevated() {
            return Err(LaunchError::AdminRequired(
                t(ctx.config.lang, MessageKey::AdminError).to_string(),
            ));
        }

        if response.latest_version != installed_version {
            if data.auto_update {
                tracing::info!(
                    "Updating {} from {} to {}",
                    data.product_id,
                    installed_version,
                    response.latest_version
                );
                let url = response.file_list_url.as_deref().ok_or_else(|| {
                    LaunchError::internal("update available but no file list url was issued")
                })?;

                ctx.emit(LaunchEvent::ProgressStarted);
                let mut download = session.download(url, &install_dir);
                while let Some(progress) = download.try_next().await? {
                    ctx.emit(LaunchEvent::Progress {
                        fraction: progress.fraction,
                        file: progress.file,
                    });
                }
                drop(download);
                ctx.emit(LaunchEvent::ProgressFinished);

                dgp_config.find_product_mut(&data.product_id)?.detail.version =
                    response.latest_version.clone();
                session.set_config(&dgp_config).await?;
            } else {
                tracing::warn!(
                    "{} is at {} but {} is available; auto update is off",
                    data.product_id,
                    installed_version,
                    response.latest_version
                );
            }
        }

        let mut args = split_args(&response.execute_args);
        args.extend(split_args(&data.game_args));

        let spec = CommandSpec::new(
            install_dir.join(&response.exec_file_name),
            args,
            install_dir,
        );
        let lines = ctx.processes.run(&spec).await?;
        drain_output(lines).await?;

        tracing::info!("Game process for {} closed its output", data.product_id);
        Ok(())
    }
}
