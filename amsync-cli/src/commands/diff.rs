//! `amsync diff [ROOT]`: show unified diffs for what sync would write.

use anyhow::{bail, Context, Result};
use clap::Args;

use amsync_sync::{diff_descriptor, renderer_for};

use super::{display_path, RootArgs};

/// Arguments for `amsync diff`.
#[derive(Args, Debug)]
pub struct DiffArgs {
    #[command(flatten)]
    pub root: RootArgs,
}

impl DiffArgs {
    pub fn run(self) -> Result<()> {
        let config = self.root.load_config()?;
        let root = self.root.root.as_path();
        let renderer = renderer_for(root, &config).context("failed to load manifest template")?;

        let mut any = false;
        let mut failed = 0;
        for descriptor in self.root.descriptors(&config)? {
            let diff = match diff_descriptor(&descriptor, root, &config, &renderer) {
                Ok(Some(diff)) => diff,
                Ok(None) => continue,
                Err(err) => {
                    failed += 1;
                    eprintln!("  ✗  {}: {err}", display_path(&descriptor, root));
                    continue;
                }
            };
            any = true;
            print!("{}", diff.unified_diff);
            if !diff.unified_diff.ends_with('\n') {
                println!();
            }
        }

        if !any && failed == 0 {
            println!("No differences under '{}'.", root.display());
        }
        if failed > 0 {
            bail!("{failed} descriptor(s) could not be diffed");
        }
        Ok(())
    }
}
