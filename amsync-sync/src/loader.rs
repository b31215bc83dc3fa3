//! Descriptor loading: the I/O around [`amsync_core::descriptor::extract`].

use std::path::Path;

use amsync_core::{descriptor, normalize::normalize, ProjectDescriptor, SyncConfig};
use amsync_detector::{DescriptorKind, DiscoveredDescriptor};

use crate::error::{io_err, SyncError};

/// Classify `path` and load it with [`load_discovered`].
pub fn load_descriptor(path: &Path, config: &SyncConfig) -> Result<ProjectDescriptor, SyncError> {
    load_discovered(&DiscoveredDescriptor::classify(path.to_path_buf(), config))
}

/// Read a descriptor (and its shared-items fragment, for shared-project
/// variants) and return the normalized [`ProjectDescriptor`].
///
/// An unreadable shared-items fragment is a hard failure: the naming
/// convention guarantees the fragment exists whenever it is looked up.
pub fn load_discovered(discovered: &DiscoveredDescriptor) -> Result<ProjectDescriptor, SyncError> {
    let path = discovered.path.as_path();
    tracing::debug!("reading descriptor {}", path.display());
    let primary = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;

    let shared_items = match &discovered.kind {
        DescriptorKind::Standalone => None,
        DescriptorKind::SharedVariant { shared_items } => {
            tracing::debug!("reading shared items {}", shared_items.display());
            let text = std::fs::read_to_string(shared_items).map_err(|source| {
                SyncError::MissingAuxiliaryFragment {
                    descriptor: path.to_path_buf(),
                    fragment: shared_items.clone(),
                    source,
                }
            })?;
            Some(text)
        }
    };

    Ok(normalize(descriptor::extract(&primary, shared_items.as_deref())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn loads_and_sorts_standalone_descriptor() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("Foo.csproj");
        fs::write(
            &path,
            r#"<AssemblyName>Foo</AssemblyName>
<Compile Include="Z.cs" />
<Compile Include="A\B.cs" />"#,
        )
        .unwrap();

        let d = load_descriptor(&path, &SyncConfig::default()).unwrap();
        assert_eq!(d.assembly_name, "Foo");
        assert_eq!(d.sources, vec!["A/B.cs", "Z.cs"]);
    }

    #[test]
    fn merges_shared_items_for_shared_variant() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("Foo.Net45.csproj");
        fs::write(&path, r#"<Compile Include="Platform.cs" />"#).unwrap();
        fs::write(
            tmp.path().join("Foo.projitems"),
            r#"<Compile Include="$(MSBuildThisFileDirectory)Core\Model.cs" />"#,
        )
        .unwrap();

        let d = load_descriptor(&path, &SyncConfig::default()).unwrap();
        assert_eq!(d.sources, vec!["Core/Model.cs", "Platform.cs"]);
    }

    #[test]
    fn missing_shared_items_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("Foo.Net45.csproj");
        fs::write(&path, r#"<Compile Include="Platform.cs" />"#).unwrap();

        let err = load_descriptor(&path, &SyncConfig::default()).unwrap_err();
        match err {
            SyncError::MissingAuxiliaryFragment { fragment, .. } => {
                assert!(fragment.ends_with("Foo.projitems"));
            }
            other => panic!("expected missing fragment, got {other:?}"),
        }
    }

    #[test]
    fn discovered_fragment_path_is_used() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("Foo.csproj");
        fs::write(&path, r#"<Compile Include="Main.cs" />"#).unwrap();
        let fragment = tmp.path().join("Elsewhere.projitems");
        fs::write(&fragment, r#"<Compile Include="Shared.cs" />"#).unwrap();

        let discovered = DiscoveredDescriptor {
            path,
            kind: DescriptorKind::SharedVariant {
                shared_items: fragment,
            },
        };
        let d = load_discovered(&discovered).unwrap();
        assert_eq!(d.sources, vec!["Main.cs", "Shared.cs"]);
    }

    #[test]
    fn missing_descriptor_is_io_error() {
        let tmp = TempDir::new().unwrap();
        let err = load_descriptor(&tmp.path().join("nope.csproj"), &SyncConfig::default())
            .unwrap_err();
        assert!(matches!(err, SyncError::Io { .. }));
    }
}
