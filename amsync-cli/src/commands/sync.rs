//! `amsync sync`: create or patch manifests for every descriptor.

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use clap::Args;

use amsync_sync::{pipeline, BatchReport, WriteResult};

use super::{display_path, RootArgs};

/// Arguments for `amsync sync`.
#[derive(Args, Debug)]
pub struct SyncArgs {
    #[command(flatten)]
    pub root: RootArgs,

    /// Sync only these descriptors instead of discovering them under ROOT.
    #[arg(long = "descriptor", short = 'd', value_name = "PATH")]
    pub descriptors: Vec<PathBuf>,

    /// Show what would be written without actually writing any files.
    #[arg(long)]
    pub dry_run: bool,
}

impl SyncArgs {
    pub fn run(self) -> Result<()> {
        let config = self.root.load_config()?;
        let root = self.root.root.as_path();
        let announce = |path: &Path| println!("Updating {}", display_path(path, root));

        let report = if self.descriptors.is_empty() {
            pipeline::run(root, &config, self.dry_run, announce)?
        } else {
            pipeline::run_paths(&self.descriptors, root, &config, self.dry_run, announce)?
        };

        print_report(&report, root, self.dry_run);

        let failed = report.failures().count();
        if failed > 0 {
            bail!("{failed} descriptor(s) failed to sync");
        }
        Ok(())
    }
}

fn print_report(report: &BatchReport, root: &Path, dry_run: bool) {
    let prefix = if dry_run { "[dry-run] " } else { "" };

    if report.outcomes.is_empty() {
        println!("No descriptors found under '{}'.", root.display());
        return;
    }

    let mut written = 0;
    let mut unchanged = 0;
    for result in report.successes() {
        let shown = display_path(result.write.path(), root);
        match &result.write {
            WriteResult::Created { .. } => {
                written += 1;
                println!("  +  {shown} (created)");
            }
            WriteResult::Patched { .. } => {
                written += 1;
                println!("  ✎  {shown} (patched)");
            }
            WriteResult::WouldWrite { .. } => {
                written += 1;
                println!("  ~  {shown}");
            }
            WriteResult::Unchanged { .. } => {
                unchanged += 1;
                println!("  ·  {shown}");
            }
        }
    }
    for (descriptor, err) in report.failures() {
        eprintln!("  ✗  {}: {err}", display_path(descriptor, root));
    }

    println!(
        "{prefix}✓ {} descriptor(s) processed ({written} written, {unchanged} unchanged, {} failed)",
        report.outcomes.len(),
        report.failures().count(),
    );
}
