//! Deterministic ordering and block rendering for descriptor file lists.

use crate::types::ProjectDescriptor;

/// Separator between entries of a rendered block: a line continuation
/// followed by a tab-indented next line.
pub const CONTINUATION: &str = " \\\n\t";

/// Sort `sources` and `resources` ascending so output does not depend on
/// declaration or merge order.
pub fn normalize(mut descriptor: ProjectDescriptor) -> ProjectDescriptor {
    descriptor.sources.sort();
    descriptor.resources.sort();
    descriptor
}

/// Render a file list as a continuation-joined block, ready to follow
/// `SOURCES = ` or `RESOURCES = `.
pub fn render_list(entries: &[String]) -> String {
    entries.join(CONTINUATION)
}
