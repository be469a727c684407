//! Static Markdown pages

use docsync_core::config::{DocsConfig, StaticDoc};
use docsync_core::error::{Result, ResultExt};
use docsync_core::models::{MarkdownPage, PageBase};
use std::path::Path;

/// Read every configured static document into a page
///
/// Markdown pages are available in every configured submodule.
pub fn read_markdown_pages(
    docs: &DocsConfig,
    base_dir: &Path,
    version: &str,
) -> Result<Vec<MarkdownPage>> {
    docs.files
        .iter()
        .map(|file| read_markdown_page(docs, file, base_dir, version))
        .collect()
}

fn read_markdown_page(
    docs: &DocsConfig,
    file: &StaticDoc,
    base_dir: &Path,
    version: &str,
) -> Result<MarkdownPage> {
    let path = docs.resolve(base_dir, &file.path);
    let markdown = std::fs::read_to_string(&path)
        .context(format!("Failed to read static doc {}", path.display()))?;

    Ok(MarkdownPage {
        base: PageBase {
            package: docs.package_name.clone(),
            version: version.to_string(),
            slug: file.slug.clone(),
            category: file.category.clone(),
            title: file.title.clone(),
            summary: file.summary.clone(),
            submodules: docs.submodules.clone(),
        },
        markdown,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use docsync_core::models::Submodule;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    fn static_doc(slug: &str, path: &str) -> StaticDoc {
        StaticDoc {
            slug: slug.to_string(),
            category: "General".to_string(),
            title: slug.replace('-', " "),
            summary: format!("{slug} summary"),
            path: PathBuf::from(path),
        }
    }

    #[test]
    fn test_reads_pages_relative_to_base_dir() {
        let dir = tempfile::TempDir::new().expect("Failed to create temp dir");
        std::fs::create_dir(dir.path().join("docs")).expect("Failed to create docs dir");
        std::fs::write(dir.path().join("docs/gettingStarted.md"), "# Getting Started\n")
            .expect("Failed to write markdown");
        std::fs::write(dir.path().join("docs/fp.md"), "# FP\n").expect("Failed to write markdown");

        let docs = DocsConfig {
            files: vec![
                static_doc("Getting-Started", "docs/gettingStarted.md"),
                static_doc("FP-Guide", "docs/fp.md"),
            ],
            ..Default::default()
        };

        let pages = read_markdown_pages(&docs, dir.path(), "v3.0.0").expect("pages read");
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].base.slug, "Getting-Started");
        assert_eq!(pages[0].base.title, "Getting Started");
        assert_eq!(pages[0].base.version, "v3.0.0");
        assert_eq!(pages[0].base.submodules, vec![Submodule::Default, Submodule::Fp]);
        assert_eq!(pages[0].markdown, "# Getting Started\n");
        assert_eq!(pages[1].markdown, "# FP\n");
    }

    #[test]
    fn test_missing_file_fails() {
        let dir = tempfile::TempDir::new().expect("Failed to create temp dir");
        let docs = DocsConfig {
            files: vec![static_doc("Missing", "docs/missing.md")],
            ..Default::default()
        };

        let err = read_markdown_pages(&docs, dir.path(), "v3.0.0").expect_err("file is missing");
        assert!(err.to_string().contains("Failed to read static doc"));
    }
}
