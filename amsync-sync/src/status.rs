//! Manifest status detection for `amsync status`.
//!
//! Signal precedence:
//! 1. `Malformed` (existing manifest has an unterminated generated block)
//! 2. `Missing` (no manifest next to the descriptor)
//! 3. `Stale` (sync would rewrite one or more generated blocks)
//! 4. `Current`

use std::path::Path;

use amsync_core::{BlockKeyword, SyncConfig};
use amsync_renderer::Renderer;

use crate::{
    loader::load_descriptor,
    patch::{current_blocks, GeneratedBlocks},
    writer::plan_manifest,
    SyncError,
};

/// Sync status of the manifest belonging to one descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestSignal {
    Missing,
    Current,
    Stale { blocks: Vec<BlockKeyword> },
    Malformed { keyword: BlockKeyword, line: usize },
}

impl ManifestSignal {
    /// Short lowercase label used in tables and JSON.
    pub fn label(&self) -> &'static str {
        match self {
            ManifestSignal::Missing => "missing",
            ManifestSignal::Current => "current",
            ManifestSignal::Stale { .. } => "stale",
            ManifestSignal::Malformed { .. } => "malformed",
        }
    }

    /// Whether `amsync sync` would change (or fail on) this manifest.
    pub fn needs_attention(&self) -> bool {
        !matches!(self, ManifestSignal::Current)
    }
}

/// Check the manifest next to `descriptor_path` without writing anything.
pub fn check(
    descriptor_path: &Path,
    config: &SyncConfig,
    renderer: &Renderer,
) -> Result<ManifestSignal, SyncError> {
    let descriptor = load_descriptor(descriptor_path, config)?;
    let plan = match plan_manifest(descriptor_path, &descriptor, config, renderer) {
        Ok(plan) => plan,
        Err(SyncError::MalformedManifest { keyword, line, .. }) => {
            return Ok(ManifestSignal::Malformed { keyword, line });
        }
        Err(err) => return Err(err),
    };

    let Some(existing) = plan.existing.as_deref() else {
        return Ok(ManifestSignal::Missing);
    };
    if plan.is_unchanged() {
        return Ok(ManifestSignal::Current);
    }

    let generated = GeneratedBlocks::from_descriptor(&descriptor);
    let found = current_blocks(existing).unwrap_or_default();
    let mut blocks: Vec<BlockKeyword> = BlockKeyword::all()
        .iter()
        .copied()
        .filter(|keyword| {
            let expected = generated.line(*keyword);
            found
                .iter()
                .any(|(k, text)| k == keyword && *text != expected)
        })
        .collect();
    if blocks.is_empty() {
        blocks = BlockKeyword::all().to_vec();
    }
    Ok(ManifestSignal::Stale { blocks })
}
