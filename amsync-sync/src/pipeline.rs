//! Batch pipeline: discover descriptors under a root and sync each one.
//!
//! Descriptors are processed strictly sequentially. A failure is recorded
//! against its descriptor and the batch moves on; only setup failures
//! (discovery, renderer construction) abort the run.

use std::path::{Path, PathBuf};

use amsync_core::SyncConfig;
use amsync_detector::{discover_descriptors, DescriptorKind, DiscoveredDescriptor};

use crate::{
    writer::{renderer_for, sync_discovered},
    SyncDescriptorResult, SyncError,
};

/// Per-descriptor outcomes of a batch run, in processing order.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<DescriptorOutcome>,
}

/// Outcome for one descriptor.
#[derive(Debug)]
pub struct DescriptorOutcome {
    pub descriptor: PathBuf,
    pub result: Result<SyncDescriptorResult, SyncError>,
}

impl BatchReport {
    /// Whether any descriptor failed.
    pub fn has_failures(&self) -> bool {
        self.outcomes.iter().any(|o| o.result.is_err())
    }

    /// Descriptors that failed, with their errors.
    pub fn failures(&self) -> impl Iterator<Item = (&Path, &SyncError)> {
        self.outcomes.iter().filter_map(|o| match &o.result {
            Ok(_) => None,
            Err(err) => Some((o.descriptor.as_path(), err)),
        })
    }

    /// Successful results.
    pub fn successes(&self) -> impl Iterator<Item = &SyncDescriptorResult> {
        self.outcomes.iter().filter_map(|o| o.result.as_ref().ok())
    }
}

/// Discover every descriptor under `root` and sync it.
///
/// `on_start` is called with each descriptor path before it is processed.
pub fn run(
    root: &Path,
    config: &SyncConfig,
    dry_run: bool,
    on_start: impl FnMut(&Path),
) -> Result<BatchReport, SyncError> {
    let discovered = discover_descriptors(root, config)?;
    run_discovered(&discovered, root, config, dry_run, on_start)
}

/// Sync an explicit list of descriptors.
pub fn run_paths(
    paths: &[PathBuf],
    root: &Path,
    config: &SyncConfig,
    dry_run: bool,
    on_start: impl FnMut(&Path),
) -> Result<BatchReport, SyncError> {
    let discovered: Vec<DiscoveredDescriptor> = paths
        .iter()
        .map(|p| DiscoveredDescriptor::classify(p.clone(), config))
        .collect();
    run_discovered(&discovered, root, config, dry_run, on_start)
}

fn run_discovered(
    discovered: &[DiscoveredDescriptor],
    root: &Path,
    config: &SyncConfig,
    dry_run: bool,
    mut on_start: impl FnMut(&Path),
) -> Result<BatchReport, SyncError> {
    let renderer = renderer_for(root, config)?;
    let mut report = BatchReport::default();
    for item in discovered {
        on_start(&item.path);
        if let DescriptorKind::SharedVariant { shared_items } = &item.kind {
            tracing::debug!("{} merges {}", item.path.display(), shared_items.display());
        }
        let result = sync_discovered(item, config, &renderer, dry_run);
        if let Err(err) = &result {
            tracing::warn!("sync failed for {}: {err}", item.path.display());
        }
        report.outcomes.push(DescriptorOutcome {
            descriptor: item.path.clone(),
            result,
        });
    }
    Ok(report)
}
