//! amsync core library: descriptor model, extraction, normalization, config.
//!
//! Public API surface:
//! - [`types`]: [`ProjectDescriptor`] and block keywords
//! - [`descriptor`]: best-effort extraction from project descriptor text
//! - [`normalize`]: deterministic ordering and block rendering
//! - [`config`]: per-root [`SyncConfig`] loading
//! - [`error`]: [`ConfigError`]

pub mod config;
pub mod descriptor;
pub mod error;
pub mod normalize;
pub mod types;

pub use config::SyncConfig;
pub use error::ConfigError;
pub use types::{BlockKeyword, ProjectDescriptor, DEFAULT_OUTPUT_KIND};
