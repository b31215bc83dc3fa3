//! Manifest planning, atomic writer, and per-descriptor sync.
//!
//! ## `sync_descriptor`: protocol
//!
//! 1. Load and normalize the descriptor (plus shared items).
//! 2. Read the manifest if it exists (CRLF normalised to LF for planning).
//! 3. Plan: render the template (missing manifest) or patch the blocks.
//! 4. Compare with the on-disk text → skip if identical.
//! 5. Write to `<manifest>.amsync.tmp`, restoring CRLF if the whole manifest
//!    used it.
//! 6. Rename to final path (atomic on POSIX).

use std::borrow::Cow;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use amsync_core::{ProjectDescriptor, SyncConfig};
use amsync_detector::DiscoveredDescriptor;
use amsync_renderer::{ManifestContext, Renderer};

use crate::error::{io_err, SyncError};
use crate::loader::load_discovered;
use crate::patch::{patch_manifest, GeneratedBlocks};

// ---------------------------------------------------------------------------
// Write result
// ---------------------------------------------------------------------------

/// Outcome of synchronizing one manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteResult {
    /// Manifest did not exist and was instantiated from the template.
    Created { path: PathBuf },
    /// Existing manifest had its generated blocks rewritten.
    Patched { path: PathBuf },
    /// Planned content matches the manifest on disk; nothing was written.
    Unchanged { path: PathBuf },
    /// `--dry-run` mode: the manifest *would* have been written.
    WouldWrite { path: PathBuf },
}

impl WriteResult {
    /// Manifest path this result refers to.
    pub fn path(&self) -> &Path {
        match self {
            WriteResult::Created { path }
            | WriteResult::Patched { path }
            | WriteResult::Unchanged { path }
            | WriteResult::WouldWrite { path } => path,
        }
    }
}

// ---------------------------------------------------------------------------
// Planning
// ---------------------------------------------------------------------------

/// What sync would write for one manifest, next to what is there now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestPlan {
    /// Manifest path (descriptor directory + configured file name).
    pub path: PathBuf,
    /// Current manifest text, `None` when the file does not exist.
    pub existing: Option<String>,
    /// Text sync would leave on disk, with LF line endings.
    pub planned: String,
    /// The existing manifest ended every line with `\r\n`.
    pub crlf: bool,
}

impl ManifestPlan {
    /// Whether writing the plan would leave the manifest as it is.
    pub fn is_unchanged(&self) -> bool {
        self.existing.as_deref() == Some(self.planned.as_str())
    }

    /// Planned text in the manifest's own line-ending convention.
    pub fn on_disk_text(&self) -> Cow<'_, str> {
        if self.crlf {
            Cow::Owned(self.planned.replace('\n', "\r\n"))
        } else {
            Cow::Borrowed(&self.planned)
        }
    }
}

/// Build the renderer for a root, honouring a configured user template.
pub fn renderer_for(root: &Path, config: &SyncConfig) -> Result<Renderer, SyncError> {
    let renderer = match config.template_path(root) {
        Some(template) => Renderer::with_template(&template)?,
        None => Renderer::new()?,
    };
    Ok(renderer)
}

/// Plan the manifest for an already-loaded descriptor.
///
/// A missing manifest is planned from the template; an existing one is
/// patched. An unterminated generated block fails with
/// [`SyncError::MalformedManifest`].
pub fn plan_manifest(
    descriptor_path: &Path,
    descriptor: &ProjectDescriptor,
    config: &SyncConfig,
    renderer: &Renderer,
) -> Result<ManifestPlan, SyncError> {
    let path = config.manifest_path(descriptor_path);
    let (existing, crlf) = match read_existing(&path)? {
        Some(ExistingManifest { text, crlf }) => (Some(text), crlf),
        None => (None, false),
    };

    let planned = match existing.as_deref() {
        None => renderer.render(&ManifestContext::new(descriptor, config))?,
        Some(text) => patch_manifest(text, &GeneratedBlocks::from_descriptor(descriptor))
            .map_err(|e| SyncError::MalformedManifest {
                path: path.clone(),
                keyword: e.keyword,
                line: e.line,
            })?,
    };

    Ok(ManifestPlan {
        path,
        existing,
        planned,
        crlf,
    })
}

struct ExistingManifest {
    /// Content with LF line endings.
    text: String,
    crlf: bool,
}

fn read_existing(path: &Path) -> Result<Option<ExistingManifest>, SyncError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(Some(ExistingManifest {
            crlf: uses_crlf(&content),
            text: content.replace("\r\n", "\n"),
        })),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(err) => Err(io_err(path, err)),
    }
}

/// Every line break is `\r\n`. Mixed files are written back with LF.
fn uses_crlf(content: &str) -> bool {
    let crlf = content.matches("\r\n").count();
    crlf > 0 && crlf == content.matches('\n').count()
}

// ---------------------------------------------------------------------------
// atomic_write
// ---------------------------------------------------------------------------

/// Write a planned manifest, skipping the write when nothing changes.
pub(crate) fn atomic_write(plan: &ManifestPlan, dry_run: bool) -> Result<WriteResult, SyncError> {
    let tmp = PathBuf::from(format!("{}.amsync.tmp", plan.path.display()));
    atomic_write_with_tmp(plan, dry_run, &tmp)
}

fn atomic_write_with_tmp(
    plan: &ManifestPlan,
    dry_run: bool,
    tmp: &Path,
) -> Result<WriteResult, SyncError> {
    let path = plan.path.as_path();

    if plan.is_unchanged() {
        tracing::debug!("unchanged: {}", path.display());
        return Ok(WriteResult::Unchanged {
            path: path.to_path_buf(),
        });
    }

    if dry_run {
        tracing::info!("[dry-run] would write: {}", path.display());
        return Ok(WriteResult::WouldWrite {
            path: path.to_path_buf(),
        });
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
    }
    std::fs::write(tmp, plan.on_disk_text().as_bytes()).map_err(|e| io_err(tmp, e))?;

    if let Err(e) = std::fs::rename(tmp, path) {
        let _ = std::fs::remove_file(tmp);
        return Err(io_err(path, e));
    }

    tracing::info!("wrote: {}", path.display());
    Ok(match plan.existing {
        None => WriteResult::Created {
            path: path.to_path_buf(),
        },
        Some(_) => WriteResult::Patched {
            path: path.to_path_buf(),
        },
    })
}

// ---------------------------------------------------------------------------
// sync_descriptor
// ---------------------------------------------------------------------------

/// Outcome of syncing a single descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncDescriptorResult {
    pub descriptor: PathBuf,
    pub write: WriteResult,
}

/// Synchronize the manifest next to `descriptor_path`.
pub fn sync_descriptor(
    descriptor_path: &Path,
    config: &SyncConfig,
    renderer: &Renderer,
    dry_run: bool,
) -> Result<SyncDescriptorResult, SyncError> {
    let discovered = DiscoveredDescriptor::classify(descriptor_path.to_path_buf(), config);
    sync_discovered(&discovered, config, renderer, dry_run)
}

/// Synchronize the manifest of an already-classified descriptor.
pub fn sync_discovered(
    discovered: &DiscoveredDescriptor,
    config: &SyncConfig,
    renderer: &Renderer,
    dry_run: bool,
) -> Result<SyncDescriptorResult, SyncError> {
    let descriptor = load_discovered(discovered)?;
    let plan = plan_manifest(&discovered.path, &descriptor, config, renderer)?;
    let write = atomic_write(&plan, dry_run)?;
    Ok(SyncDescriptorResult {
        descriptor: discovered.path.clone(),
        write,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
