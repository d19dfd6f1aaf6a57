//! Full-screen TUI for UserHive.

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod overlays;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod theme;
pub mod update;

use std::io::{IsTerminal, stderr};

use anyhow::Result;
pub use runtime::{RuntimeDeps, TuiRuntime};
use userhive_core::api::DirectoryClient;
use userhive_core::config::{Config, Theme, paths};
use userhive_core::mirror::MirrorCache;
use userhive_core::session::SessionStore;

/// Runs the interactive user directory.
///
/// Must be called from within a tokio runtime; requests are spawned onto it.
///
/// `theme` overrides the configured theme for this run only.
///
/// # Errors
/// Returns an error if stderr is not a terminal, the client cannot be built,
/// or terminal I/O fails.
pub fn run_interactive(config: &Config, theme: Option<Theme>) -> Result<()> {
    if !stderr().is_terminal() {
        anyhow::bail!(
            "The interactive directory requires a terminal.\n\
             Use `userhive users list` for non-interactive access."
        );
    }

    let client = DirectoryClient::from_config(config)?;
    tracing::info!(base_url = client.base_url(), "starting interactive session");

    let deps = RuntimeDeps {
        client,
        sessions: SessionStore::default(),
        mirror: MirrorCache::default(),
        config_path: paths::config_path(),
    };
    let mut runtime = TuiRuntime::new(deps, theme.unwrap_or(config.theme))?;
    runtime.run()?;

    tracing::info!("interactive session ended");
    Ok(())
}
