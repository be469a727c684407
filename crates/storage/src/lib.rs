//! Document store for published documentation
//!
//! A package version is stored as three kinds of records: the package entry
//! listing version previews, the version entry indexing its pages, and one
//! record per page.

#![deny(warnings)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

pub mod error;
mod factory;
mod mock;
mod postgres;

// Export factory functions
pub use factory::{create_and_initialize_store, create_document_store};
pub use mock::MockDocumentStore;
pub use postgres::PostgresDocumentStore;

use async_trait::async_trait;
use docsync_core::models::{Package, Page, Version, VersionPreview};
use docsync_core::Error;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What a version removal deleted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemovedVersion {
    /// Whether the package entry listed the version
    pub package_updated: bool,
    pub versions_removed: u64,
    pub pages_removed: u64,
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Prepare the backend (schema migrations)
    async fn initialize(&self) -> Result<(), Error>;

    /// Add a version preview to the package, creating the package if needed
    ///
    /// A preview equal to one already listed is not added again.
    async fn upsert_package(&self, name: &str, version: &VersionPreview) -> Result<(), Error>;

    /// Store a version record under a new id
    async fn insert_version(&self, version: &Version) -> Result<Uuid, Error>;

    /// Store pages as one batch; every page gets a new id, returned in input order
    async fn insert_pages(&self, pages: &[Page]) -> Result<Vec<Uuid>, Error>;

    /// Drop a version from the package entry and delete its version and page records
    async fn remove_version(&self, package: &str, version: &str) -> Result<RemovedVersion, Error>;

    async fn get_package(&self, name: &str) -> Result<Option<Package>, Error>;

    /// Latest version record stored for `package` and `version`
    async fn get_version(&self, package: &str, version: &str) -> Result<Option<Version>, Error>;

    /// Pages of a version in insertion order
    async fn list_pages(&self, package: &str, version: &str) -> Result<Vec<Page>, Error>;
}
