//! Per-root synchronizer configuration.
//!
//! # Lookup order
//!
//! ```text
//! --config <FILE>                       (explicit; must exist)
//! <root>/amsync.yaml                    (per-tree)
//! <config_dir>/amsync/config.yaml       (per-user)
//! built-in defaults
//! ```
//!
//! # API pattern
//!
//! - `resolve_at(root, explicit, config_dir)`: explicit config dir; used in tests
//! - `resolve(root, explicit)`: derives the config dir from `dirs::config_dir()`

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// File name of the per-tree config, looked up in the batch root.
pub const CONFIG_FILE_NAME: &str = "amsync.yaml";

/// Naming conventions and template constants for one synchronization root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SyncConfig {
    /// File name of the manifest written next to each descriptor.
    pub manifest_name: String,
    /// Extension (without dot) of descriptor files picked up by discovery.
    pub descriptor_extension: String,
    /// Descriptor file-name suffix marking the shared-project variant.
    pub shared_suffix: String,
    /// Suffix replacing `shared_suffix` to locate the shared-items fragment.
    pub shared_items_suffix: String,
    /// Opaque dependency variable emitted as `LINK = …` in new manifests.
    pub link_variable: String,
    /// Argument of the trailing `include` directive in new manifests.
    pub include_directive: String,
    /// Optional Tera template replacing the built-in one, relative to the root.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<PathBuf>,
    /// Immediate subdirectory names skipped by discovery.
    pub exclude: Vec<String>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            manifest_name: "Makefile.am".to_string(),
            descriptor_extension: "csproj".to_string(),
            shared_suffix: ".Net45.csproj".to_string(),
            shared_items_suffix: ".projitems".to_string(),
            link_variable: "$(REF_DEP_LONGOMATCH_ADDINS)".to_string(),
            include_directive: "$(top_srcdir)/build/build.mk".to_string(),
            template: None,
            exclude: Vec::new(),
        }
    }
}

impl SyncConfig {
    /// Manifest path for a descriptor: its parent directory plus `manifest_name`.
    pub fn manifest_path(&self, descriptor: &Path) -> PathBuf {
        descriptor
            .parent()
            .unwrap_or_else(|| Path::new(""))
            .join(&self.manifest_name)
    }

    /// Template path resolved against `root`, if one is configured.
    pub fn template_path(&self, root: &Path) -> Option<PathBuf> {
        self.template.as_ref().map(|t| root.join(t))
    }
}

/// Load a config file from `path`.
pub fn load(path: &Path) -> Result<SyncConfig, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    // An empty file means "all defaults"; serde_yaml rejects it as a map.
    if contents.trim().is_empty() {
        return Ok(SyncConfig::default());
    }
    serde_yaml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Resolve the effective config for `root`, with an explicit user config dir.
pub fn resolve_at(
    root: &Path,
    explicit: Option<&Path>,
    config_dir: Option<&Path>,
) -> Result<SyncConfig, ConfigError> {
    if let Some(path) = explicit {
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }
        return load(path);
    }

    let local = root.join(CONFIG_FILE_NAME);
    if local.is_file() {
        return load(&local);
    }

    if let Some(dir) = config_dir {
        let user = dir.join("amsync").join("config.yaml");
        if user.is_file() {
            return load(&user);
        }
    }

    Ok(SyncConfig::default())
}

/// `resolve_at` convenience wrapper using `dirs::config_dir()`.
pub fn resolve(root: &Path, explicit: Option<&Path>) -> Result<SyncConfig, ConfigError> {
    resolve_at(root, explicit, dirs::config_dir().as_deref())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn defaults_when_no_file() {
        let root = TempDir::new().unwrap();
        let cfg = resolve_at(root.path(), None, None).unwrap();
        assert_eq!(cfg, SyncConfig::default());
        assert_eq!(cfg.manifest_name, "Makefile.am");
    }

    #[test]
    fn local_file_overrides_defaults() {
        let root = TempDir::new().unwrap();
        fs::write(
            root.path().join(CONFIG_FILE_NAME),
            "manifest_name: Build.am\nexclude: [Tests]\n",
        )
        .unwrap();
        let cfg = resolve_at(root.path(), None, None).unwrap();
        assert_eq!(cfg.manifest_name, "Build.am");
        assert_eq!(cfg.exclude, vec!["Tests".to_string()]);
        assert_eq!(cfg.descriptor_extension, "csproj");
    }

    #[test]
    fn local_file_wins_over_user_file() {
        let root = TempDir::new().unwrap();
        let user = TempDir::new().unwrap();
        fs::create_dir_all(user.path().join("amsync")).unwrap();
        fs::write(
            user.path().join("amsync").join("config.yaml"),
            "manifest_name: User.am\n",
        )
        .unwrap();

        let cfg = resolve_at(root.path(), None, Some(user.path())).unwrap();
        assert_eq!(cfg.manifest_name, "User.am");

        fs::write(root.path().join(CONFIG_FILE_NAME), "manifest_name: Local.am\n").unwrap();
        let cfg = resolve_at(root.path(), None, Some(user.path())).unwrap();
        assert_eq!(cfg.manifest_name, "Local.am");
    }

    #[test]
    fn empty_file_is_defaults() {
        let root = TempDir::new().unwrap();
        fs::write(root.path().join(CONFIG_FILE_NAME), "\n").unwrap();
        let cfg = resolve_at(root.path(), None, None).unwrap();
        assert_eq!(cfg, SyncConfig::default());
    }

    #[test]
    fn unknown_key_is_parse_error_with_path() {
        let root = TempDir::new().unwrap();
        let path = root.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "manifest_nmae: typo.am\n").unwrap();
        let err = resolve_at(root.path(), None, None).unwrap_err();
        match err {
            ConfigError::Parse { path: p, .. } => assert_eq!(p, path),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn missing_explicit_config_is_not_found() {
        let root = TempDir::new().unwrap();
        let missing = root.path().join("nope.yaml");
        let err = resolve_at(root.path(), Some(&missing), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound { .. }));
    }

    #[test]
    fn manifest_path_is_sibling_of_descriptor() {
        let cfg = SyncConfig::default();
        let p = cfg.manifest_path(Path::new("/src/VAS.Core/VAS.Core.csproj"));
        assert_eq!(p, PathBuf::from("/src/VAS.Core/Makefile.am"));
    }
}
