use docsync_core::config::StorageConfig;
use docsync_core::Error;
use docsync_storage::{create_and_initialize_store, create_document_store, DocumentStore};

fn mock_config() -> StorageConfig {
    StorageConfig {
        provider: "mock".to_string(),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_factory_creates_mock_store() {
    let store = create_document_store(&mock_config()).await.unwrap();

    assert!(store.initialize().await.is_ok());
    assert!(store.get_package("date-fns").await.unwrap().is_none());
}

#[tokio::test]
async fn test_factory_initializes_mock_store() {
    let store = create_and_initialize_store(&mock_config()).await.unwrap();

    let _store: &dyn DocumentStore = &*store;
}

#[tokio::test]
async fn test_factory_rejects_unknown_provider() {
    let config = StorageConfig {
        provider: "sqlite".to_string(),
        ..Default::default()
    };

    let err = match create_document_store(&config).await {
        Ok(_) => panic!("unknown provider must be rejected"),
        Err(err) => err,
    };
    assert!(matches!(err, Error::Storage(_)));
    assert!(err.to_string().contains("Unknown storage provider 'sqlite'"));
}
