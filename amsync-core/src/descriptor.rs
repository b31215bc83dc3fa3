//! Best-effort extraction of a [`ProjectDescriptor`] from descriptor text.
//!
//! Every field is pulled by its own pattern and defaults independently when
//! the markup is absent or malformed. Partial descriptors are normal input;
//! extraction never fails.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::config::SyncConfig;
use crate::types::{ProjectDescriptor, DEFAULT_OUTPUT_KIND};

/// Build-tool placeholder prefixed to shared-items compile entries.
pub const SHARED_ITEMS_PLACEHOLDER: &str = "$(MSBuildThisFileDirectory)";

/// Prefix rewritten on resource paths that point above the project directory.
const PARENT_PREFIX: &str = "../";
/// Build variable replacing [`PARENT_PREFIX`].
const TOP_SRCDIR_PREFIX: &str = "$(top_srcdir)/";

static ASSEMBLY_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<AssemblyName>([^<]*)</AssemblyName>").expect("valid regex"));
static OUTPUT_TYPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<OutputType>([^<]*)</OutputType>").expect("valid regex"));
static COMPILE_INCLUDE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<Compile\s+Include="([^"]*)""#).expect("valid regex"));
static RESOURCE_INCLUDE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<EmbeddedResource\s+Include="([^"]*)""#).expect("valid regex")
});

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Extract a descriptor from the primary project text and, for shared-project
/// variants, the shared-items fragment text.
///
/// Lists are returned in declaration order; see [`crate::normalize`] for sorting.
pub fn extract(primary: &str, shared_items: Option<&str>) -> ProjectDescriptor {
    let assembly_name = first_value(&ASSEMBLY_NAME, primary).unwrap_or_default();
    let output_kind = first_value(&OUTPUT_TYPE, primary)
        .filter(|kind| !kind.is_empty())
        .unwrap_or_else(|| DEFAULT_OUTPUT_KIND.to_string());

    let mut sources: Vec<String> = includes(&COMPILE_INCLUDE, primary)
        .map(to_forward_slashes)
        .collect();
    let resources = includes(&RESOURCE_INCLUDE, primary)
        .map(|path| rewrite_parent_prefix(to_forward_slashes(path)))
        .collect();

    if let Some(fragment) = shared_items {
        sources.extend(
            includes(&COMPILE_INCLUDE, fragment)
                .map(|path| strip_placeholder(to_forward_slashes(path))),
        );
    }

    ProjectDescriptor {
        assembly_name,
        output_kind,
        sources,
        resources,
    }
}

/// Path of the shared-items fragment for a shared-project variant descriptor.
///
/// `Foo/Foo.Net45.csproj` → `Foo/Foo.projitems`. Returns `None` when the
/// descriptor does not follow the shared-project naming convention.
pub fn shared_items_path(descriptor: &Path, config: &SyncConfig) -> Option<PathBuf> {
    let stem = shared_stem(descriptor, config)?;
    Some(descriptor.with_file_name(format!("{stem}{}", config.shared_items_suffix)))
}

// ---------------------------------------------------------------------------
// Field helpers
// ---------------------------------------------------------------------------

fn shared_stem<'a>(descriptor: &'a Path, config: &SyncConfig) -> Option<&'a str> {
    if config.shared_suffix.is_empty() {
        return None;
    }
    let name = descriptor.file_name()?.to_str()?;
    name.strip_suffix(config.shared_suffix.as_str())
        .filter(|stem| !stem.is_empty())
}

fn first_value(re: &Regex, text: &str) -> Option<String> {
    re.captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
}

fn includes<'t>(re: &'t Regex, text: &'t str) -> impl Iterator<Item = &'t str> + 't {
    re.captures_iter(text)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str())
}

fn to_forward_slashes(path: &str) -> String {
    path.replace('\\', "/")
}

fn rewrite_parent_prefix(path: String) -> String {
    match path.strip_prefix(PARENT_PREFIX) {
        Some(rest) => format!("{TOP_SRCDIR_PREFIX}{rest}"),
        None => path,
    }
}

fn strip_placeholder(path: String) -> String {
    match path.strip_prefix(SHARED_ITEMS_PLACEHOLDER) {
        Some(rest) => rest.to_string(),
        None => path,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
