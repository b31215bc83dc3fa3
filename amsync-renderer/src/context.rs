//! Template context: serializable rendering payload built from a
//! [`ProjectDescriptor`] and the root's [`SyncConfig`].

use serde::{Deserialize, Serialize};

use amsync_core::{normalize::render_list, ProjectDescriptor, SyncConfig};

use crate::error::RenderError;

/// Flat rendering payload for the manifest template.
///
/// `sources` and `resources` are already rendered as continuation blocks, so
/// a template only has to place them after `SOURCES = ` / `RESOURCES = `.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestContext {
    pub assembly: String,
    pub target: String,
    pub link: String,
    pub sources: String,
    pub resources: String,
    pub include: String,
}

impl ManifestContext {
    /// Build a context from a normalized descriptor.
    pub fn new(descriptor: &ProjectDescriptor, config: &SyncConfig) -> Self {
        Self {
            assembly: descriptor.assembly_name.clone(),
            target: descriptor.output_kind.clone(),
            link: config.link_variable.clone(),
            sources: render_list(&descriptor.sources),
            resources: render_list(&descriptor.resources),
            include: config.include_directive.clone(),
        }
    }

    /// Convert into a [`tera::Context`].
    pub fn to_tera_context(&self) -> Result<tera::Context, RenderError> {
        Ok(tera::Context::from_serialize(self)?)
    }
}
