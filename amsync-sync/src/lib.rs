//! # amsync-sync
//!
//! Manifest patching, atomic writer, and batch orchestration.
//!
//! Call [`sync_descriptor`] to create or patch the manifest next to a single
//! descriptor, or [`pipeline::run`] to process every descriptor under a root.

pub mod diff;
pub mod error;
pub mod loader;
pub mod patch;
pub mod pipeline;
pub mod status;
pub mod writer;

pub use diff::{diff_descriptor, FileDiff};
pub use error::SyncError;
pub use loader::{load_descriptor, load_discovered};
pub use patch::{patch_manifest, GeneratedBlocks, UnterminatedBlock};
pub use pipeline::{BatchReport, DescriptorOutcome};
pub use status::ManifestSignal;
pub use writer::{
    plan_manifest, renderer_for, sync_descriptor, sync_discovered, ManifestPlan,
    SyncDescriptorResult, WriteResult,
};
