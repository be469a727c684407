use crate::error::StorageError;
use crate::{DocumentStore, RemovedVersion};
use async_trait::async_trait;
use docsync_core::config::StorageConfig;
use docsync_core::error::{Error, Result};
use docsync_core::models::{Package, Page, Version, VersionPreview};
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::{debug, info};
use uuid::Uuid;

/// Document store backed by PostgreSQL, one JSONB document per record
pub struct PostgresDocumentStore {
    pool: PgPool,
}

impl PostgresDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect using the storage configuration
    pub async fn connect(config: &StorageConfig) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.postgres_pool_size)
            .connect(&config.postgres_url())
            .await
            .map_err(|e| {
                StorageError::ConnectionFailed(format!(
                    "{}:{}/{}: {e}",
                    config.postgres_host, config.postgres_port, config.postgres_database
                ))
            })?;

        debug!(
            host = %config.postgres_host,
            database = %config.postgres_database,
            "Connected to Postgres"
        );
        Ok(Self::new(pool))
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<Value> {
    serde_json::to_value(value).map_err(|e| Error::from(StorageError::from(e)))
}

fn from_json<T: serde::de::DeserializeOwned>(value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|e| Error::from(StorageError::from(e)))
}

#[async_trait]
impl DocumentStore for PostgresDocumentStore {
    async fn initialize(&self) -> Result<()> {
        sqlx::migrate!("../../migrations")
            .run(&self.pool)
            .await
            .map_err(|e| StorageError::MigrationFailed(e.to_string()))?;
        info!("Database migrations applied");
        Ok(())
    }

    async fn upsert_package(&self, name: &str, version: &VersionPreview) -> Result<()> {
        let preview = Value::Array(vec![to_json(version)?]);

        sqlx::query(
            "INSERT INTO packages (name, versions) VALUES ($1, $2)
             ON CONFLICT (name) DO UPDATE SET
                versions = CASE
                    WHEN packages.versions @> EXCLUDED.versions THEN packages.versions
                    ELSE packages.versions || EXCLUDED.versions
                END,
                updated_at = NOW()",
        )
        .bind(name)
        .bind(&preview)
        .execute(&self.pool)
        .await
        .map_err(|e| Error::storage(format!("Failed to upsert package: {e}")))?;

        Ok(())
    }

    async fn insert_version(&self, version: &Version) -> Result<Uuid> {
        let version_id = Uuid::new_v4();

        sqlx::query(
            "INSERT INTO versions (version_id, package, version, pre_release, created_at, data)
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(version_id)
        .bind(&version.package)
        .bind(&version.version)
        .bind(version.pre_release)
        .bind(version.created_at)
        .bind(to_json(version)?)
        .execute(&self.pool)
        .await
        .map_err(|e| Error::storage(format!("Failed to insert version: {e}")))?;

        Ok(version_id)
    }

    async fn insert_pages(&self, pages: &[Page]) -> Result<Vec<Uuid>> {
        if pages.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| Error::storage(format!("Failed to begin transaction: {e}")))?;

        let mut ids = Vec::with_capacity(pages.len());
        for page in pages {
            let base = page.base();
            let page_id: Uuid = sqlx::query_scalar(
                "INSERT INTO pages (page_id, package, version, page_type, slug, data)
                 VALUES ($1, $2, $3, $4, $5, $6)
                 RETURNING page_id",
            )
            .bind(Uuid::new_v4())
            .bind(&base.package)
            .bind(&base.version)
            .bind(page.page_type().to_string())
            .bind(&base.slug)
            .bind(to_json(page)?)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| Error::storage(format!("Failed to insert page {}: {e}", base.slug)))?;
            ids.push(page_id);
        }

        tx.commit()
            .await
            .map_err(|e| Error::storage(format!("Failed to commit transaction: {e}")))?;

        debug!(count = ids.len(), "Inserted page batch");
        Ok(ids)
    }

    async fn remove_version(&self, package: &str, version: &str) -> Result<RemovedVersion> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| Error::storage(format!("Failed to begin transaction: {e}")))?;

        let package_updated = sqlx::query(
            "UPDATE packages SET
                versions = COALESCE(
                    (SELECT jsonb_agg(e.value ORDER BY e.ord)
                     FROM jsonb_array_elements(packages.versions) WITH ORDINALITY AS e(value, ord)
                     WHERE e.value->>'version' <> $2),
                    '[]'::jsonb
                ),
                updated_at = NOW()
             WHERE name = $1
               AND EXISTS (
                    SELECT 1 FROM jsonb_array_elements(packages.versions) AS v(value)
                    WHERE v.value->>'version' = $2
               )",
        )
        .bind(package)
        .bind(version)
        .execute(&mut *tx)
        .await
        .map_err(|e| Error::storage(format!("Failed to update package versions: {e}")))?
        .rows_affected()
            > 0;

        let versions_removed = sqlx::query("DELETE FROM versions WHERE package = $1 AND version = $2")
            .bind(package)
            .bind(version)
            .execute(&mut *tx)
            .await
            .map_err(|e| Error::storage(format!("Failed to delete versions: {e}")))?
            .rows_affected();

        let pages_removed = sqlx::query("DELETE FROM pages WHERE package = $1 AND version = $2")
            .bind(package)
            .bind(version)
            .execute(&mut *tx)
            .await
            .map_err(|e| Error::storage(format!("Failed to delete pages: {e}")))?
            .rows_affected();

        tx.commit()
            .await
            .map_err(|e| Error::storage(format!("Failed to commit transaction: {e}")))?;

        Ok(RemovedVersion {
            package_updated,
            versions_removed,
            pages_removed,
        })
    }

    async fn get_package(&self, name: &str) -> Result<Option<Package>> {
        let versions: Option<Value> =
            sqlx::query_scalar("SELECT versions FROM packages WHERE name = $1")
                .bind(name)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| Error::storage(format!("Failed to get package: {e}")))?;

        versions
            .map(|versions| {
                Ok(Package {
                    name: name.to_string(),
                    versions: from_json(versions)?,
                })
            })
            .transpose()
    }

    async fn get_version(&self, package: &str, version: &str) -> Result<Option<Version>> {
        let data: Option<Value> = sqlx::query_scalar(
            "SELECT data FROM versions
             WHERE package = $1 AND version = $2
             ORDER BY created_at DESC
             LIMIT 1",
        )
        .bind(package)
        .bind(version)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| Error::storage(format!("Failed to get version: {e}")))?;

        data.map(from_json).transpose()
    }

    async fn list_pages(&self, package: &str, version: &str) -> Result<Vec<Page>> {
        let rows: Vec<Value> = sqlx::query_scalar(
            "SELECT data FROM pages WHERE package = $1 AND version = $2 ORDER BY seq",
        )
        .bind(package)
        .bind(version)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| Error::storage(format!("Failed to list pages: {e}")))?;

        rows.into_iter().map(from_json).collect()
    }
}
