//! Dry-run unified diff support for `amsync diff`.

use std::path::{Path, PathBuf};

use similar::TextDiff;

use amsync_core::SyncConfig;
use amsync_renderer::Renderer;

use crate::{loader::load_descriptor, writer::plan_manifest, SyncError};

/// A single manifest diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDiff {
    pub path: PathBuf,
    pub unified_diff: String,
}

/// Plan what `sync` would write for `descriptor_path` and compare it to the
/// manifest on disk (empty when missing).
///
/// No files are written. Returns `None` when sync would change nothing.
pub fn diff_descriptor(
    descriptor_path: &Path,
    root: &Path,
    config: &SyncConfig,
    renderer: &Renderer,
) -> Result<Option<FileDiff>, SyncError> {
    let descriptor = load_descriptor(descriptor_path, config)?;
    let plan = plan_manifest(descriptor_path, &descriptor, config, renderer)?;
    if plan.is_unchanged() {
        return Ok(None);
    }

    let existing = plan.existing.as_deref().unwrap_or("");
    let relative = plan.path.strip_prefix(root).unwrap_or(plan.path.as_path());
    let old_header = format!("a/{}", relative.display());
    let new_header = format!("b/{}", relative.display());
    let unified = TextDiff::from_lines(existing, &plan.planned)
        .unified_diff()
        .header(&old_header, &new_header)
        .context_radius(3)
        .to_string();

    Ok(Some(FileDiff {
        path: plan.path,
        unified_diff: unified,
    }))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use crate::sync_descriptor;

    use super::*;

    fn setup() -> (TempDir, PathBuf) {
        let root = TempDir::new().expect("root");
        let dir = root.path().join("Foo");
        fs::create_dir_all(&dir).expect("mkdir");
        let descriptor = dir.join("Foo.csproj");
        fs::write(
            &descriptor,
            r#"<AssemblyName>Foo</AssemblyName><Compile Include="A.cs" />"#,
        )
        .expect("write");
        (root, descriptor)
    }

    #[test]
    fn no_diff_after_clean_sync() {
        let (root, descriptor) = setup();
        let cfg = SyncConfig::default();
        let renderer = Renderer::new().expect("renderer");
        sync_descriptor(&descriptor, &cfg, &renderer, false).expect("sync");

        let diff = diff_descriptor(&descriptor, root.path(), &cfg, &renderer).expect("diff");
        assert!(diff.is_none(), "synced manifest should have no diff");
    }

    #[test]
    fn missing_manifest_diffs_against_empty() {
        let (root, descriptor) = setup();
        let cfg = SyncConfig::default();
        let renderer = Renderer::new().expect("renderer");

        let diff = diff_descriptor(&descriptor, root.path(), &cfg, &renderer)
            .expect("diff")
            .expect("some diff");
        assert!(diff.unified_diff.contains("--- a/Foo/Makefile.am"));
        assert!(diff.unified_diff.contains("+++ b/Foo/Makefile.am"));
        assert!(diff.unified_diff.contains("+ASSEMBLY = Foo"));
        assert!(!diff.path.exists(), "diff must not write");
    }

    #[test]
    fn new_source_produces_unified_diff() {
        let (root, descriptor) = setup();
        let cfg = SyncConfig::default();
        let renderer = Renderer::new().expect("renderer");
        sync_descriptor(&descriptor, &cfg, &renderer, false).expect("sync");

        fs::write(
            &descriptor,
            r#"<AssemblyName>Foo</AssemblyName><Compile Include="A.cs" /><Compile Include="B.cs" />"#,
        )
        .expect("edit descriptor");

        let diff = diff_descriptor(&descriptor, root.path(), &cfg, &renderer)
            .expect("diff")
            .expect("some diff");
        assert!(diff.unified_diff.contains("@@"));
        assert!(diff.unified_diff.contains("-SOURCES = A.cs"));
        assert!(diff.unified_diff.contains("+SOURCES = A.cs \\"));
        assert!(diff.unified_diff.contains("+\tB.cs"));
    }
}
