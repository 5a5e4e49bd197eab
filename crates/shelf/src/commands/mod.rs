//! CLI command implementations.

pub(crate) mod list;
pub(crate) mod serve;

use std::path::PathBuf;

use clap::Args;
use shelf_config::{CliSettings, Config};

use crate::error::CliError;

pub(crate) use list::ListArgs;
pub(crate) use serve::ServeArgs;

/// Flags shared by every command that reads the tutorials tree.
#[derive(Args)]
pub(crate) struct ConfigArgs {
    /// Path to configuration file (default: nearest shelf.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Tutorials root directory (overrides config).
    #[arg(short, long, env = "SHELF_ROOT")]
    root: Option<PathBuf>,
}

impl ConfigArgs {
    /// Load configuration, layering `overrides` and `--root` on top.
    pub(crate) fn load(self, overrides: CliSettings) -> Result<Config, CliError> {
        let settings = CliSettings {
            root: self.root.or(overrides.root),
            ..overrides
        };
        Ok(Config::load(self.config.as_deref(), Some(&settings))?)
    }
}
