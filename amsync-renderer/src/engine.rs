//! Tera rendering engine for new manifests.
//!
//! The embedded template produces:
//!
//! ```text
//! ASSEMBLY = <assembly>
//! TARGET = <target>
//!
//! LINK = <link>
//!
//! SOURCES = <sources>
//!
//! RESOURCES = <resources>
//!
//! include <include>
//! ```
//!
//! A root may replace it with its own `.tera` file; the context keys are the
//! same.

use std::path::{Path, PathBuf};

use tera::Tera;

use crate::context::ManifestContext;
use crate::error::RenderError;

/// Template name the manifest is registered and rendered under.
pub const MANIFEST_TEMPLATE: &str = "makefile.am.tera";

// Baked into the binary at compile time.
const EMBEDDED: &str = include_str!("templates/makefile.am.tera");

fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> RenderError {
    RenderError::Io {
        path: path.into(),
        source,
    }
}

fn normalize_line_endings(content: &str) -> String {
    content.replace("\r\n", "\n")
}

fn build_tera(user_template: Option<&Path>) -> Result<Tera, RenderError> {
    let source = match user_template {
        Some(path) => std::fs::read_to_string(path).map_err(|e| io_err(path, e))?,
        None => EMBEDDED.to_string(),
    };
    let mut tera = Tera::default();
    tera.add_raw_template(MANIFEST_TEMPLATE, &normalize_line_endings(&source))?;
    Ok(tera)
}

// ---------------------------------------------------------------------------
// Renderer
// ---------------------------------------------------------------------------

/// Tera-based manifest renderer.
///
/// Create once per root with [`Renderer::new`] or [`Renderer::with_template`]
/// and reuse for every descriptor.
pub struct Renderer {
    tera: Tera,
}

impl Renderer {
    /// Construct a [`Renderer`] with the embedded template.
    pub fn new() -> Result<Self, RenderError> {
        Ok(Renderer {
            tera: build_tera(None)?,
        })
    }

    /// Construct a [`Renderer`] from a user template file.
    pub fn with_template(path: &Path) -> Result<Self, RenderError> {
        Ok(Renderer {
            tera: build_tera(Some(path))?,
        })
    }

    /// Render the full text of a new manifest.
    pub fn render(&self, ctx: &ManifestContext) -> Result<String, RenderError> {
        let tera_ctx = ctx.to_tera_context()?;
        Ok(self.tera.render(MANIFEST_TEMPLATE, &tera_ctx)?)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
