//! In-memory document store for testing

#![allow(clippy::unwrap_used)]

use crate::{DocumentStore, RemovedVersion};
use async_trait::async_trait;
use docsync_core::error::{Error, Result};
use docsync_core::models::{Package, Page, Version, VersionPreview};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

#[derive(Debug, Default)]
struct MockData {
    packages: HashMap<String, Package>,
    versions: Vec<(Uuid, Version)>,
    pages: Vec<(Uuid, Page)>,
    page_batches: usize,
    fail_page_inserts: bool,
}

/// Mock document store keeping every record in memory
///
/// Clones share the same data.
#[derive(Debug, Clone)]
pub struct MockDocumentStore {
    data: Arc<Mutex<MockData>>,
}

impl MockDocumentStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self {
            data: Arc::new(Mutex::new(MockData::default())),
        }
    }

    /// Make every following `insert_pages` call fail
    pub fn fail_page_inserts(&self) {
        self.data.lock().unwrap().fail_page_inserts = true;
    }

    /// Get number of version records stored
    pub fn version_count(&self) -> usize {
        self.data.lock().unwrap().versions.len()
    }

    /// Get number of page records stored
    pub fn page_count(&self) -> usize {
        self.data.lock().unwrap().pages.len()
    }

    /// Get number of `insert_pages` calls that stored pages
    pub fn page_batch_count(&self) -> usize {
        self.data.lock().unwrap().page_batches
    }

    /// Ids of every stored page
    pub fn page_ids(&self) -> Vec<Uuid> {
        self.data
            .lock()
            .unwrap()
            .pages
            .iter()
            .map(|(id, _)| *id)
            .collect()
    }
}

impl Default for MockDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for MockDocumentStore {
    async fn initialize(&self) -> Result<()> {
        // Mock - no migrations needed
        Ok(())
    }

    async fn upsert_package(&self, name: &str, version: &VersionPreview) -> Result<()> {
        let mut data = self.data.lock().unwrap();
        let package = data
            .packages
            .entry(name.to_string())
            .or_insert_with(|| Package {
                name: name.to_string(),
                versions: Vec::new(),
            });

        if !package.versions.contains(version) {
            package.versions.push(version.clone());
        }
        Ok(())
    }

    async fn insert_version(&self, version: &Version) -> Result<Uuid> {
        let version_id = Uuid::new_v4();
        self.data
            .lock()
            .unwrap()
            .versions
            .push((version_id, version.clone()));
        Ok(version_id)
    }

    async fn insert_pages(&self, pages: &[Page]) -> Result<Vec<Uuid>> {
        let mut data = self.data.lock().unwrap();
        if data.fail_page_inserts {
            return Err(Error::storage("Mock page insert failure"));
        }

        let ids: Vec<Uuid> = pages.iter().map(|_| Uuid::new_v4()).collect();
        data.pages
            .extend(ids.iter().copied().zip(pages.iter().cloned()));
        data.page_batches += 1;
        Ok(ids)
    }

    async fn remove_version(&self, package: &str, version: &str) -> Result<RemovedVersion> {
        let mut data = self.data.lock().unwrap();

        let package_updated = match data.packages.get_mut(package) {
            Some(entry) => {
                let before = entry.versions.len();
                entry.versions.retain(|v| v.version != version);
                entry.versions.len() != before
            }
            None => false,
        };

        let versions_before = data.versions.len();
        data.versions
            .retain(|(_, v)| !(v.package == package && v.version == version));
        let versions_removed = (versions_before - data.versions.len()) as u64;

        let pages_before = data.pages.len();
        data.pages.retain(|(_, page)| {
            let base = page.base();
            !(base.package == package && base.version == version)
        });
        let pages_removed = (pages_before - data.pages.len()) as u64;

        Ok(RemovedVersion {
            package_updated,
            versions_removed,
            pages_removed,
        })
    }

    async fn get_package(&self, name: &str) -> Result<Option<Package>> {
        Ok(self.data.lock().unwrap().packages.get(name).cloned())
    }

    async fn get_version(&self, package: &str, version: &str) -> Result<Option<Version>> {
        let data = self.data.lock().unwrap();
        Ok(data
            .versions
            .iter()
            .rev()
            .find(|(_, v)| v.package == package && v.version == version)
            .map(|(_, v)| v.clone()))
    }

    async fn list_pages(&self, package: &str, version: &str) -> Result<Vec<Page>> {
        let data = self.data.lock().unwrap();
        Ok(data
            .pages
            .iter()
            .filter(|(_, page)| {
                let base = page.base();
                base.package == package && base.version == version
            })
            .map(|(_, page)| page.clone())
            .collect())
    }
}
