//! `amsync show <DESCRIPTOR>`: print what the extractor sees in one descriptor.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use amsync_core::config;
use amsync_sync::load_descriptor;

/// Arguments for `amsync show`.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Project descriptor to read.
    pub descriptor: PathBuf,

    /// Config file (defaults to ./amsync.yaml, then the user config).
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

impl ShowArgs {
    pub fn run(self) -> Result<()> {
        let config = config::resolve(Path::new("."), self.config.as_deref())
            .context("failed to load config")?;
        let descriptor = load_descriptor(&self.descriptor, &config)
            .with_context(|| format!("cannot read '{}'", self.descriptor.display()))?;

        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&descriptor)
                    .context("failed to serialize descriptor JSON")?
            );
            return Ok(());
        }

        println!("{} {}", "Assembly:".bold(), descriptor.assembly_name);
        println!("{} {}", "Target:".bold(), descriptor.output_kind);
        println!("{} ({})", "Sources".bold(), descriptor.sources.len());
        for source in &descriptor.sources {
            println!("  {source}");
        }
        println!("{} ({})", "Resources".bold(), descriptor.resources.len());
        for resource in &descriptor.resources {
            println!("  {resource}");
        }
        Ok(())
    }
}
