use crate::error::StorageError;
use crate::{mock::MockDocumentStore, DocumentStore, PostgresDocumentStore};
use docsync_core::{config::StorageConfig, Error};
use std::sync::Arc;
use tracing::debug;

/// Creates a document store based on configuration.
///
/// # Errors
/// Returns an error if the provider is unknown or the backend cannot be reached
pub async fn create_document_store(config: &StorageConfig) -> Result<Arc<dyn DocumentStore>, Error> {
    debug!(provider = %config.provider, "Creating document store");
    match config.provider.as_str() {
        "postgres" => {
            let store = PostgresDocumentStore::connect(config).await?;
            Ok(Arc::new(store) as Arc<dyn DocumentStore>)
        }
        "mock" => Ok(Arc::new(MockDocumentStore::new()) as Arc<dyn DocumentStore>),
        other => Err(StorageError::InvalidConfig(format!(
            "Unknown storage provider '{other}', expected 'postgres' or 'mock'"
        ))
        .into()),
    }
}

/// Creates a document store and runs its initialization (migrations).
pub async fn create_and_initialize_store(
    config: &StorageConfig,
) -> Result<Arc<dyn DocumentStore>, Error> {
    let store = create_document_store(config).await?;
    store.initialize().await?;
    Ok(store)
}
