use std::fs;
use std::path::Path;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

fn amsync_cmd(home: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("amsync"));
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env_remove("RUST_LOG");
    cmd
}

fn setup(root: &Path) {
    let core = root.join("VAS.Core");
    fs::create_dir_all(&core).unwrap();
    fs::write(
        core.join("VAS.Core.csproj"),
        r#"<AssemblyName>VAS.Core</AssemblyName><Compile Include="New.cs" />"#,
    )
    .unwrap();
    fs::write(
        core.join("Makefile.am"),
        "ASSEMBLY = VAS.Core\n\nSOURCES = Old.cs\n\nRESOURCES = \n\nEXTRA_DIST = x\n",
    )
    .unwrap();

    let fresh = root.join("VAS.Fresh");
    fs::create_dir_all(&fresh).unwrap();
    fs::write(fresh.join("VAS.Fresh.csproj"), r#"<Compile Include="A.cs" />"#).unwrap();
}

#[test]
fn status_json_reports_each_descriptor() {
    let home = TempDir::new().unwrap();
    let root = TempDir::new().unwrap();
    setup(root.path());

    let output = amsync_cmd(home.path())
        .args(["status", "--json"])
        .arg(root.path())
        .output()
        .expect("run status");
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(json["summary"]["descriptors"], 2);
    assert_eq!(json["summary"]["needs_sync"], 2);
    let manifests = json["manifests"].as_array().unwrap();
    assert_eq!(manifests[0]["descriptor"], "VAS.Core/VAS.Core.csproj");
    assert_eq!(manifests[0]["status"], "stale");
    assert_eq!(manifests[0]["detail"], "SOURCES out of date");
    assert_eq!(manifests[1]["status"], "missing");
}

#[test]
fn status_is_current_after_sync() {
    let home = TempDir::new().unwrap();
    let root = TempDir::new().unwrap();
    setup(root.path());

    amsync_cmd(home.path())
        .arg("sync")
        .arg(root.path())
        .assert()
        .success();

    amsync_cmd(home.path())
        .arg("status")
        .arg(root.path())
        .assert()
        .success()
        .stdout(contains("0 need sync"))
        .stdout(contains("CURRENT"));
}

#[test]
fn diff_shows_block_changes_without_writing() {
    let home = TempDir::new().unwrap();
    let root = TempDir::new().unwrap();
    setup(root.path());

    amsync_cmd(home.path())
        .arg("diff")
        .arg(root.path())
        .assert()
        .success()
        .stdout(contains("a/VAS.Core/Makefile.am"))
        .stdout(contains("-SOURCES = Old.cs"))
        .stdout(contains("+SOURCES = New.cs"));

    let manifest = fs::read_to_string(root.path().join("VAS.Core/Makefile.am")).unwrap();
    assert!(manifest.contains("SOURCES = Old.cs"));
    assert!(!root.path().join("VAS.Fresh/Makefile.am").exists());
}

#[test]
fn show_prints_extracted_lists_as_json() {
    let home = TempDir::new().unwrap();
    let root = TempDir::new().unwrap();
    setup(root.path());

    let output = amsync_cmd(home.path())
        .current_dir(root.path())
        .args(["show", "--json", "VAS.Core/VAS.Core.csproj"])
        .output()
        .expect("run show");
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(json["assembly_name"], "VAS.Core");
    assert_eq!(json["output_kind"], "library");
    assert_eq!(json["sources"], serde_json::json!(["New.cs"]));
}

#[test]
fn diff_continues_past_malformed_manifest() {
    let home = TempDir::new().unwrap();
    let root = TempDir::new().unwrap();
    let alpha = root.path().join("Alpha");
    fs::create_dir_all(&alpha).unwrap();
    fs::write(alpha.join("Alpha.csproj"), r#"<Compile Include="x.cs" />"#).unwrap();
    fs::write(alpha.join("Makefile.am"), "SOURCES = x.cs").unwrap();
    let beta = root.path().join("Beta");
    fs::create_dir_all(&beta).unwrap();
    fs::write(beta.join("Beta.csproj"), r#"<Compile Include="y.cs" />"#).unwrap();

    amsync_cmd(home.path())
        .arg("diff")
        .arg(root.path())
        .assert()
        .failure()
        .stdout(contains("b/Beta/Makefile.am"))
        .stdout(contains("+SOURCES = y.cs"))
        .stderr(contains("Alpha/Alpha.csproj"))
        .stderr(contains("1 descriptor(s) could not be diffed"));

    assert_eq!(fs::read_to_string(alpha.join("Makefile.am")).unwrap(), "SOURCES = x.cs");
}
