//! Postgres-backed document store.
//!
//! One JSONB table (`document`) holds every collection; see
//! `migrations/0001_create_document_store.sql`. Queries are bound at
//! runtime, so no database is needed at compile time.

use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};

use super::store::{Collection, DocumentStore, Filter, StoreError};

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Document store over a Postgres pool.
#[derive(Debug, Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    /// Wrap an existing pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The underlying pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn find(&self, collection: Collection, filter: Filter) -> Result<Vec<Value>, StoreError> {
        let rows = match filter {
            Filter::All => {
                sqlx::query("SELECT doc FROM document WHERE collection = $1 ORDER BY id")
                    .bind(collection.as_str())
                    .fetch_all(&self.pool)
                    .await?
            }
            Filter::Eq { field, value } => {
                sqlx::query(
                    "SELECT doc FROM document WHERE collection = $1 AND doc ->> $2 = $3 ORDER BY id",
                )
                .bind(collection.as_str())
                .bind(field)
                .bind(value)
                .fetch_all(&self.pool)
                .await?
            }
        };

        rows.into_iter()
            .map(|row| row.try_get::<Value, _>("doc").map_err(StoreError::from))
            .collect()
    }

    async fn insert_many(
        &self,
        collection: Collection,
        docs: Vec<Value>,
    ) -> Result<u64, StoreError> {
        let mut tx = self.pool.begin().await?;
        for doc in &docs {
            sqlx::query("INSERT INTO document (collection, doc) VALUES ($1, $2)")
                .bind(collection.as_str())
                .bind(doc)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;

        Ok(u64::try_from(docs.len()).unwrap_or(u64::MAX))
    }

    async fn delete_all(&self, collection: Collection) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM document WHERE collection = $1")
            .bind(collection.as_str())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
