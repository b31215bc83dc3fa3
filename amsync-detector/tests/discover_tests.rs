//! Descriptor discovery tests for `amsync-detector`.
//!
//! Each test gets an isolated `TempDir`, with no shared state.

use std::fs;
use std::path::PathBuf;

use amsync_core::SyncConfig;
use amsync_detector::{discover_descriptors, DescriptorKind, DetectError};
use rstest::rstest;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Helper
// ---------------------------------------------------------------------------

fn make_dir() -> TempDir {
    TempDir::new().expect("tempdir")
}

fn touch(dir: &TempDir, rel: &str) -> PathBuf {
    let path = dir.path().join(rel);
    fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
    fs::write(&path, "<Project />").expect("write fixture");
    path
}

// ---------------------------------------------------------------------------
// Discovery
// ---------------------------------------------------------------------------

#[test]
fn finds_descriptors_in_immediate_subdirectories_sorted() {
    let dir = make_dir();
    let b = touch(&dir, "VAS.Services/VAS.Services.csproj");
    let a = touch(&dir, "VAS.Core/VAS.Core.csproj");
    touch(&dir, "VAS.Core/Makefile.am");

    let found = discover_descriptors(dir.path(), &SyncConfig::default()).expect("discover");
    let paths: Vec<_> = found.iter().map(|d| d.path.clone()).collect();
    assert_eq!(paths, vec![a, b]);
    assert!(found.iter().all(|d| d.kind == DescriptorKind::Standalone));
}

#[rstest]
#[case("Top.csproj")]
#[case("VAS.Core/Nested/Deep.csproj")]
#[case("VAS.Core/notes.csproj.bak")]
fn ignores_descriptors_outside_first_level(#[case] rel: &str) {
    let dir = make_dir();
    touch(&dir, rel);
    let found = discover_descriptors(dir.path(), &SyncConfig::default()).expect("discover");
    assert!(found.is_empty(), "unexpected descriptors: {found:?}");
}

#[test]
fn classifies_shared_variants() {
    let dir = make_dir();
    touch(&dir, "VAS.Core/VAS.Core.Net45.csproj");
    touch(&dir, "VAS.Core/VAS.Core.projitems");

    let found = discover_descriptors(dir.path(), &SyncConfig::default()).expect("discover");
    assert_eq!(found.len(), 1);
    match &found[0].kind {
        DescriptorKind::SharedVariant { shared_items } => {
            assert!(shared_items.ends_with("VAS.Core/VAS.Core.projitems"));
        }
        other => panic!("expected shared variant, got {other:?}"),
    }
}

#[test]
fn honours_exclude_and_extension() {
    let dir = make_dir();
    touch(&dir, "Tests/Tests.csproj");
    let kept = touch(&dir, "Lib/Lib.fsproj");

    let config = SyncConfig {
        descriptor_extension: "fsproj".to_string(),
        exclude: vec!["Tests".to_string()],
        ..SyncConfig::default()
    };
    let found = discover_descriptors(dir.path(), &config).expect("discover");
    let paths: Vec<_> = found.into_iter().map(|d| d.path).collect();
    assert_eq!(paths, vec![kept]);
}

#[test]
fn missing_root_is_error() {
    let dir = make_dir();
    let missing = dir.path().join("nope");
    let err = discover_descriptors(&missing, &SyncConfig::default()).unwrap_err();
    assert!(matches!(err, DetectError::RootNotFound { .. }));
}
