//! Integration tests for the Postgres document store
//!
//! These need a reachable Postgres configured through the `POSTGRES_*`
//! variables. Run with `cargo test -- --ignored`.

use anyhow::{Context, Result};
use docsync_core::models::{Page, PageBase, PageKind, Submodule, TypeDocPage, VersionPreview};
use docsync_core::Config;
use docsync_storage::{DocumentStore, PostgresDocumentStore};
use pretty_assertions::assert_eq;
use std::future::Future;
use std::path::Path;
use std::time::Duration;
use uuid::Uuid;

async fn with_timeout<F>(duration: Duration, test: F) -> Result<()>
where
    F: Future<Output = Result<()>>,
{
    tokio::time::timeout(duration, test)
        .await
        .context("Test timed out")?
}

/// Connect with the environment's Postgres settings and apply migrations
async fn setup_store() -> Result<PostgresDocumentStore> {
    // No config file: defaults plus the POSTGRES_* overrides
    let config = Config::from_file(Path::new("docsync-test-absent.toml"))?;
    let store = PostgresDocumentStore::connect(&config.storage).await?;
    store.initialize().await?;
    Ok(store)
}

/// Package name no other test run uses
fn unique_package() -> String {
    format!("pkg-{}", Uuid::new_v4())
}

fn preview(version: &str, created_at: i64) -> VersionPreview {
    VersionPreview {
        version: version.to_string(),
        pre_release: false,
        created_at,
        submodules: Submodule::ALL.to_vec(),
    }
}

fn page(package: &str, version: &str, slug: &str) -> Page {
    TypeDocPage {
        base: PageBase {
            package: package.to_string(),
            version: version.to_string(),
            slug: slug.to_string(),
            category: "Common Helpers".to_string(),
            title: slug.to_string(),
            summary: String::new(),
            submodules: vec![Submodule::Default],
        },
        name: slug.to_string(),
        doc: "{}".to_string(),
        kind: PageKind::Function,
        pure: false,
    }
    .into()
}

#[tokio::test]
#[ignore = "requires Postgres (POSTGRES_HOST)"]
async fn test_upsert_package_appends_preview_once() -> Result<()> {
    with_timeout(Duration::from_secs(30), async {
        let store = setup_store().await?;
        let package = unique_package();

        store.upsert_package(&package, &preview("v1.0.0", 1)).await?;
        store.upsert_package(&package, &preview("v1.0.0", 1)).await?;
        store.upsert_package(&package, &preview("v2.0.0", 2)).await?;

        let stored = store.get_package(&package).await?.context("package exists")?;
        assert_eq!(stored.versions, vec![preview("v1.0.0", 1), preview("v2.0.0", 2)]);
        Ok(())
    })
    .await
}

#[tokio::test]
#[ignore = "requires Postgres (POSTGRES_HOST)"]
async fn test_remove_version_keeps_order_of_remaining_versions() -> Result<()> {
    with_timeout(Duration::from_secs(30), async {
        let store = setup_store().await?;
        let package = unique_package();
        for (i, version) in ["v1.0.0", "v2.0.0", "v3.0.0"].into_iter().enumerate() {
            store.upsert_package(&package, &preview(version, i as i64)).await?;
        }
        store
            .insert_pages(&[page(&package, "v2.0.0", "format"), page(&package, "v3.0.0", "max")])
            .await?;

        let removed = store.remove_version(&package, "v2.0.0").await?;
        assert!(removed.package_updated);
        assert_eq!(removed.pages_removed, 1);

        let stored = store.get_package(&package).await?.context("package exists")?;
        assert_eq!(stored.versions, vec![preview("v1.0.0", 0), preview("v3.0.0", 2)]);
        assert_eq!(store.list_pages(&package, "v3.0.0").await?.len(), 1);

        let again = store.remove_version(&package, "v2.0.0").await?;
        assert!(!again.package_updated);
        Ok(())
    })
    .await
}

#[tokio::test]
#[ignore = "requires Postgres (POSTGRES_HOST)"]
async fn test_list_pages_in_insertion_order() -> Result<()> {
    with_timeout(Duration::from_secs(30), async {
        let store = setup_store().await?;
        let package = unique_package();

        let first = store
            .insert_pages(&[page(&package, "v1.0.0", "max"), page(&package, "v1.0.0", "add")])
            .await?;
        store.insert_pages(&[page(&package, "v1.0.0", "format")]).await?;
        assert_eq!(first.len(), 2);

        let slugs: Vec<String> = store
            .list_pages(&package, "v1.0.0")
            .await?
            .iter()
            .map(|page| page.slug().to_string())
            .collect();
        assert_eq!(slugs, vec!["max", "add", "format"]);
        Ok(())
    })
    .await
}
