//! Interactive mode.

use anyhow::Result;
use userhive_core::config::{Config, Theme};

pub fn run(config: &Config, theme: Option<Theme>) -> Result<()> {
    userhive_tui::run_interactive(config, theme)
}
