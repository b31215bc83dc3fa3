//! # amsync-renderer
//!
//! Tera-based template engine that renders a brand-new build manifest from a
//! normalized [`amsync_core::ProjectDescriptor`].
//!
//! ## Usage
//!
//! ```rust,no_run
//! use amsync_core::{ProjectDescriptor, SyncConfig};
//! use amsync_renderer::{ManifestContext, Renderer};
//!
//! fn render(descriptor: &ProjectDescriptor) {
//!     if let Ok(renderer) = Renderer::new() {
//!         let ctx = ManifestContext::new(descriptor, &SyncConfig::default());
//!         if let Ok(text) = renderer.render(&ctx) {
//!             println!("{text}");
//!         }
//!     }
//! }
//! ```

pub mod context;
pub mod engine;
pub mod error;

pub use context::ManifestContext;
pub use engine::{Renderer, MANIFEST_TEMPLATE};
pub use error::RenderError;
