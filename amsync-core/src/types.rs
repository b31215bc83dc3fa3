//! Domain types for amsync.
//!
//! A [`ProjectDescriptor`] is built fresh from descriptor text on every run and
//! never persisted; the manifest on disk is the only persisted artifact.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Output kind used when a descriptor declares no `<OutputType>`.
pub const DEFAULT_OUTPUT_KIND: &str = "library";

// ---------------------------------------------------------------------------
// Block keywords
// ---------------------------------------------------------------------------

/// Keyword introducing a generated manifest block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BlockKeyword {
    Sources,
    Resources,
}

impl BlockKeyword {
    /// Both keywords in the order their blocks are flushed.
    pub fn all() -> &'static [BlockKeyword] {
        &[BlockKeyword::Sources, BlockKeyword::Resources]
    }

    /// The literal keyword as it appears at the start of a manifest line.
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockKeyword::Sources => "SOURCES",
            BlockKeyword::Resources => "RESOURCES",
        }
    }

    /// Whether `line` opens this block.
    ///
    /// The keyword must be followed by end of line or a non-identifier
    /// character, so `SOURCES_EXTRA = …` stays opaque.
    pub fn opens(&self, line: &str) -> bool {
        match line.strip_prefix(self.as_str()) {
            Some(rest) => !rest
                .chars()
                .next()
                .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_'),
            None => false,
        }
    }
}

impl fmt::Display for BlockKeyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ProjectDescriptor
// ---------------------------------------------------------------------------

/// File lists and identity extracted from one project descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectDescriptor {
    /// Logical build target name; empty when not declared.
    pub assembly_name: String,
    /// Output type marker, e.g. `library` or `exe`.
    pub output_kind: String,
    /// Forward-slash relative paths of compiled sources.
    #[serde(default)]
    pub sources: Vec<String>,
    /// Forward-slash paths of embedded resources.
    #[serde(default)]
    pub resources: Vec<String>,
}

impl Default for ProjectDescriptor {
    fn default() -> Self {
        Self {
            assembly_name: String::new(),
            output_kind: DEFAULT_OUTPUT_KIND.to_string(),
            sources: Vec::new(),
            resources: Vec::new(),
        }
    }
}

impl ProjectDescriptor {
    /// The file list owned by the given block.
    pub fn entries(&self, keyword: BlockKeyword) -> &[String] {
        match keyword {
            BlockKeyword::Sources => &self.sources,
            BlockKeyword::Resources => &self.resources,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
