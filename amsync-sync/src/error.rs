//! Error types for amsync-sync.

use std::path::PathBuf;

use thiserror::Error;

use amsync_core::{BlockKeyword, ConfigError};
use amsync_detector::DetectError;
use amsync_renderer::RenderError;

/// All errors that can arise from sync operations.
///
/// Every variant is fatal for the descriptor being processed and nothing
/// more; the batch pipeline records it and moves on.
#[derive(Debug, Error)]
pub enum SyncError {
    /// An error from the rendering engine.
    #[error("render error: {0}")]
    Render(#[from] RenderError),

    /// An error loading the root configuration.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// An error discovering descriptors under the batch root.
    #[error("discovery error: {0}")]
    Detect(#[from] DetectError),

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The descriptor is a shared-project variant but its shared-items
    /// fragment could not be read.
    #[error("shared-items fragment {fragment} for {descriptor} is unreadable: {source}")]
    MissingAuxiliaryFragment {
        descriptor: PathBuf,
        fragment: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An existing manifest opens a generated block that is never closed by a
    /// blank line. The manifest is left untouched.
    #[error("malformed manifest {path}: {keyword} block opened at line {line} is not terminated by a blank line")]
    MalformedManifest {
        path: PathBuf,
        keyword: BlockKeyword,
        line: usize,
    },
}

/// Convenience constructor for [`SyncError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> SyncError {
    SyncError::Io {
        path: path.into(),
        source,
    }
}
