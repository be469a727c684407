use docsync_core::Error as CoreError;
use thiserror::Error;

/// Storage-specific error types
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<StorageError> for CoreError {
    fn from(err: StorageError) -> Self {
        CoreError::storage(err.to_string())
    }
}

impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        StorageError::BackendError(err.to_string())
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::SerializationError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_converts_into_core_storage_error() {
        let err: CoreError = StorageError::InvalidConfig("unknown provider 'x'".to_string()).into();
        assert!(matches!(err, CoreError::Storage(_)));
        assert_eq!(
            err.to_string(),
            "Storage error: Invalid configuration: unknown provider 'x'"
        );
    }
}
