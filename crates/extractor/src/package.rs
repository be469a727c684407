//! Package version detection

use docsync_core::error::{Error, Result, ResultExt};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static VERSION_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^\d+\.\d+\.\d+(-(alpha|beta|rc)(\.\d+)?)?$").ok());
static PRE_RELEASE_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"-(alpha|beta|rc)(\.\d+)?$").ok());

/// Version a documentation set is published under
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageVersion {
    /// `v`-prefixed version, e.g. `v3.0.0-beta.1`
    pub version: String,
    pub pre_release: bool,
}

#[derive(Deserialize)]
struct PackageJson {
    #[serde(default)]
    version: Option<String>,
}

/// Validate a bare semver string (`3.0.0`, `3.0.0-rc.2`)
pub fn parse_version(version: &str) -> Result<PackageVersion> {
    let (Some(valid), Some(pre_release)) = (
        VERSION_PATTERN.as_ref(),
        PRE_RELEASE_PATTERN.as_ref(),
    ) else {
        return Err(Error::config("Version patterns failed to compile"));
    };

    if !valid.is_match(version) {
        return Err(Error::invalid_version(version));
    }

    Ok(PackageVersion {
        version: format!("v{version}"),
        pre_release: pre_release.is_match(version),
    })
}

/// Read and validate the version from `package.json` in `package_dir`
pub fn read_package_version(package_dir: &Path) -> Result<PackageVersion> {
    let path = package_dir.join("package.json");
    let content = std::fs::read_to_string(&path)
        .context(format!("Failed to read {}", path.display()))?;
    let package: PackageJson = serde_json::from_str(&content)
        .map_err(|e| Error::parse(path.display().to_string(), e.to_string()))?;

    let version = package.version.unwrap_or_default();
    parse_version(&version)
}
