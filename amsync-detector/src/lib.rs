//! Descriptor discovery for `amsync-detector`.
//!
//! `discover_descriptors(root, config)` lists the project descriptors that the
//! batch driver synchronizes: files with the configured extension inside the
//! immediate subdirectories of `root`. Nested directories are not searched,
//! and descriptors lying directly in `root` are ignored.

use std::fs;
use std::path::{Path, PathBuf};

use amsync_core::{descriptor, SyncConfig};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// How a discovered descriptor is assembled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DescriptorKind {
    /// A single self-contained descriptor.
    Standalone,
    /// A shared-project variant whose sources continue in a shared-items fragment.
    SharedVariant { shared_items: PathBuf },
}

/// A descriptor found under the batch root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredDescriptor {
    /// Path of the descriptor file (root-joined).
    pub path: PathBuf,
    /// Standalone or shared-project variant.
    pub kind: DescriptorKind,
}

impl DiscoveredDescriptor {
    /// Classify `path` under `config`'s naming convention.
    pub fn classify(path: PathBuf, config: &SyncConfig) -> Self {
        let kind = match descriptor::shared_items_path(&path, config) {
            Some(shared_items) => DescriptorKind::SharedVariant { shared_items },
            None => DescriptorKind::Standalone,
        };
        Self { path, kind }
    }
}

/// Errors from descriptor discovery.
#[derive(Debug, Error)]
pub enum DetectError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("root directory '{path}' does not exist or is not a directory")]
    RootNotFound { path: PathBuf },
}

fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> DetectError {
    DetectError::Io {
        path: path.into(),
        source,
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Discover descriptors under `root`, sorted by path.
///
/// Subdirectories named in `config.exclude` are skipped. Unreadable
/// subdirectories are an error; the caller decides whether to abort.
pub fn discover_descriptors(
    root: &Path,
    config: &SyncConfig,
) -> Result<Vec<DiscoveredDescriptor>, DetectError> {
    if !root.is_dir() {
        return Err(DetectError::RootNotFound {
            path: root.to_path_buf(),
        });
    }

    let mut found = Vec::new();
    for dir in subdirectories(root)? {
        let excluded = dir
            .file_name()
            .map(|n| config.exclude.iter().any(|e| n == e.as_str()))
            .unwrap_or(false);
        if excluded {
            tracing::debug!("skipping excluded directory {}", dir.display());
            continue;
        }
        for path in files_with_extension(&dir, &config.descriptor_extension)? {
            found.push(DiscoveredDescriptor::classify(path, config));
        }
    }

    found.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(found)
}

// ---------------------------------------------------------------------------
// Directory helpers
// ---------------------------------------------------------------------------

fn subdirectories(root: &Path) -> Result<Vec<PathBuf>, DetectError> {
    let entries = fs::read_dir(root).map_err(|e| io_err(root, e))?;
    let mut dirs = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| io_err(root, e))?;
        let path = entry.path();
        if path.is_dir() {
            dirs.push(path);
        }
    }
    Ok(dirs)
}

fn files_with_extension(dir: &Path, extension: &str) -> Result<Vec<PathBuf>, DetectError> {
    let entries = fs::read_dir(dir).map_err(|e| io_err(dir, e))?;
    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| io_err(dir, e))?;
        let path = entry.path();
        let matches = path
            .extension()
            .and_then(|s| s.to_str())
            .is_some_and(|ext| ext == extension);
        if matches && path.is_file() {
            files.push(path);
        }
    }
    Ok(files)
}
