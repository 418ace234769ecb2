//! Delegated launch: hand a stored session to the vendor client, let it run,
//! and capture the session it leaves behind.

use crate::context::LaunchContext;
use crate::game_launcher::split_args;
use crate::output::drain_output;
use fastlaunch_core::cookie::{CookieJar, LOGIN_SECURE_ID};
use fastlaunch_core::error::{LaunchError, Result};
use fastlaunch_core::messages::{MessageKey, t};
use fastlaunch_core::process::CommandSpec;

pub struct ClientLauncher<'a> {
    ctx: &'a LaunchContext,
}

impl<'a> ClientLauncher<'a> {
    pub fn new(ctx: &'a LaunchContext) -> Self {
        Self { ctx }
    }

    /// Runs a delegated launch for shortcut `id`.
    ///
    /// A failure after the vendor client ran leaves the account blob as it
    /// was. Nothing the client did is rolled back.
    pub async fn launch(&self, id: &str) -> Result<()> {
        let ctx = self.ctx;
        let lang = ctx.config.lang;
        let data = ctx.shortcuts.load_launcher_shortcut(id)?;
        let account_path = ctx.paths.account_file(&data.account_path)?;
        tracing::info!("Launching DMMGamePlayer with account {}", data.account_path);

        let jar = ctx.cookies.read_bytes(&account_path)?;
        if !jar.contains(LOGIN_SECURE_ID) {
            return Err(LaunchError::SessionExport(
                t(lang, MessageKey::ExportError).to_string(),
            ));
        }
        ctx.cookies.write_current(&jar)?;

        let dgp = &ctx.config.dmm_game_player_program_folder;
        let spec = CommandSpec::new(
            dgp.join(&ctx.config.dmm_game_player_executable),
            split_args(&data.dgp_args),
            dgp,
        );
        let lines = ctx.processes.run(&spec).await?;
        drain_output(lines).await?;
        tracing::info!("DMMGamePlayer exited");

        let mut jar = match ctx.cookies.read_current() {
            Ok(jar) => jar,
            Err(e) if e.is_not_found() => CookieJar::new(),
            Err(e) => return Err(e),
        };
        if !jar.contains(LOGIN_SECURE_ID) {
            return Err(LaunchError::SessionImport(
                t(lang, MessageKey::ImportError).to_string(),
            ));
        }
        ctx.cookies.write_bytes(&account_path, &jar)?;

        jar.clear();
        ctx.cookies.write_current(&jar)?;
        tracing::info!("Saved session back to account {}", data.account_path);
        Ok(())
    }
}
