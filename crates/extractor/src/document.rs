//! Loading the TypeDoc JSON output

use docsync_core::error::{Error, Result, ResultExt};
use docsync_core::reflection::Reflection;
use std::path::Path;
use tracing::debug;

/// Read and parse the TypeDoc project reflection at `path`
pub fn read_document(path: &Path) -> Result<Reflection> {
    let content = std::fs::read_to_string(path)
        .context(format!("Failed to read TypeDoc JSON {}", path.display()))?;
    let document = parse_document(&content)
        .map_err(|e| Error::parse(path.display().to_string(), e.to_string()))?;

    debug!(
        path = %path.display(),
        modules = document.children.len(),
        "Loaded TypeDoc document"
    );
    Ok(document)
}

pub fn parse_document(content: &str) -> serde_json::Result<Reflection> {
    serde_json::from_str(content)
}
