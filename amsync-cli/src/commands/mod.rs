//! Subcommands and the root/config arguments they share.

pub mod diff;
pub mod show;
pub mod status;
pub mod sync;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use amsync_core::{config, SyncConfig};
use amsync_detector::discover_descriptors;

/// Batch root and config selection.
#[derive(Args, Debug)]
pub struct RootArgs {
    /// Directory whose immediate subdirectories hold the descriptors.
    #[arg(default_value = ".")]
    pub root: PathBuf,

    /// Config file (defaults to <ROOT>/amsync.yaml, then the user config).
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl RootArgs {
    /// Resolve the effective config for the root.
    pub fn load_config(&self) -> Result<SyncConfig> {
        config::resolve(&self.root, self.config.as_deref())
            .with_context(|| format!("failed to load config for '{}'", self.root.display()))
    }

    /// Discover descriptors under the root.
    pub fn descriptors(&self, config: &SyncConfig) -> Result<Vec<PathBuf>> {
        let found = discover_descriptors(&self.root, config)
            .with_context(|| format!("cannot scan '{}'", self.root.display()))?;
        Ok(found.into_iter().map(|d| d.path).collect())
    }
}

/// `path` relative to `root` for display; unchanged if outside it.
pub fn display_path(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}
