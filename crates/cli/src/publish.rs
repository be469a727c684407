//! Writing an extraction to the document store

use docsync_core::config::Config;
use docsync_core::error::Result;
use docsync_core::models::{Page, Version};
use docsync_extractor::Extraction;
use docsync_storage::{DocumentStore, RemovedVersion};
use futures::future::try_join_all;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Ids assigned by the store to a published version
#[derive(Debug, Clone)]
pub struct PublishReport {
    pub version_id: Uuid,
    /// Page ids in the order of the extraction's pages
    pub page_ids: Vec<Uuid>,
}

/// Build the version record indexing every page of the extraction
pub fn build_version(config: &Config, extraction: &Extraction, created_at: i64) -> Version {
    Version {
        package: config.docs.package_name.clone(),
        version: extraction.version.version.clone(),
        pre_release: extraction.version.pre_release,
        pages: extraction.pages.iter().map(Page::preview).collect(),
        created_at,
        categories: config.docs.categories.clone(),
        submodules: config.docs.submodules.clone(),
    }
}

/// Publish the package entry, the version record and the pages
///
/// The three writes run concurrently, as do the page batches. The first
/// failure aborts the publish; nothing already written is rolled back.
pub async fn publish(
    store: &dyn DocumentStore,
    config: &Config,
    extraction: &Extraction,
) -> Result<PublishReport> {
    let created_at = chrono::Utc::now().timestamp_millis();
    let version = build_version(config, extraction, created_at);
    let preview = version.preview();
    let batch_size = config.storage.max_pages_per_batch.max(1);

    info!(
        package = %version.package,
        version = %version.version,
        pages = extraction.pages.len(),
        "Publishing"
    );

    let batches = extraction.pages.chunks(batch_size).map(|batch| async move {
        let ids = store.insert_pages(batch).await?;
        debug!(count = ids.len(), "Page batch stored");
        Ok::<_, docsync_core::Error>(ids)
    });

    let ((), version_id, batch_ids) = futures::try_join!(
        store.upsert_package(&version.package, &preview),
        store.insert_version(&version),
        try_join_all(batches),
    )?;

    let page_ids: Vec<Uuid> = batch_ids.into_iter().flatten().collect();
    info!(%version_id, pages = page_ids.len(), "Published");

    Ok(PublishReport {
        version_id,
        page_ids,
    })
}

/// Remove a published version from the package entry and delete its records
pub async fn rollback(
    store: &dyn DocumentStore,
    package: &str,
    version: &str,
) -> Result<RemovedVersion> {
    let removed = store.remove_version(package, version).await?;
    if removed.package_updated {
        info!(
            package,
            version,
            versions = removed.versions_removed,
            pages = removed.pages_removed,
            "Rolled back"
        );
    } else {
        warn!(package, version, "Version was not listed in the package entry");
    }
    Ok(removed)
}
