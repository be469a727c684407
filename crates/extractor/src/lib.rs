//! TypeDoc documentation extraction
//!
//! Reads the JSON reflection tree TypeDoc produces for a package and turns it
//! into self-contained documentation pages:
//!
//! 1. **Index**: map every reflection id of the document to its node
//! 2. **Recover**: for each module, pull in the reflections its declarations
//!    reference from elsewhere, transitively
//! 3. **Assemble**: package each completed module into a page record
//!
//! Static Markdown documents configured next to the TypeDoc output become
//! pages as well.

#![deny(warnings)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

pub mod assembly;
pub mod comments;
pub mod document;
pub mod index;
pub mod markdown;
pub mod package;
pub mod recovery;
pub mod walker;

use docsync_core::config::DocsConfig;
use docsync_core::models::Page;
use serde::Serialize;
use std::path::Path;
use tracing::info;

pub use assembly::{assemble_pages, classify_module, ModuleReflection};
pub use document::read_document;
pub use index::{build_index, ReflectionIndex};
pub use markdown::read_markdown_pages;
pub use package::{read_package_version, PackageVersion};
pub use recovery::{collect_references, complete_reflection, recover, CompletedReflection, RecoveredSet};
pub use walker::walk_type;

// Re-export error types from core
pub use docsync_core::error::{Error, Result};

/// Everything published for one package version
#[derive(Debug, Clone, Serialize)]
pub struct Extraction {
    pub version: PackageVersion,
    /// TypeDoc pages in document order, followed by the Markdown pages
    pub pages: Vec<Page>,
}

/// Read the package version, the TypeDoc document and the static docs
///
/// Relative paths in `docs` resolve against `base_dir`.
pub fn extract(docs: &DocsConfig, base_dir: &Path) -> Result<Extraction> {
    let version = read_package_version(&docs.resolve(base_dir, &docs.package))?;
    info!(version = %version.version, pre_release = version.pre_release, "Detected package version");

    let document = read_document(&docs.resolve(base_dir, &docs.json))?;
    let typedoc_pages = assemble_pages(&document, docs, &version.version)?;
    let markdown_pages = read_markdown_pages(docs, base_dir, &version.version)?;

    let pages: Vec<Page> = typedoc_pages
        .into_iter()
        .map(Page::from)
        .chain(markdown_pages.into_iter().map(Page::from))
        .collect();

    info!(pages = pages.len(), "Extraction complete");
    Ok(Extraction { version, pages })
}
