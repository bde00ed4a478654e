//! The document store abstraction.
//!
//! The backend treats its database as a document store: named collections
//! of JSON documents, consumed through find / insert / delete. Postgres
//! JSONB backs it in production ([`super::PgDocumentStore`]); tests use the
//! in-memory implementation ([`super::MemoryDocumentStore`]).

use core::fmt;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Named document collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Bikes,
    Accessories,
    Logos,
    Dealers,
    Messages,
    Contacts,
    Users,
}

impl Collection {
    /// The collection's storage name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bikes => "bikes",
            Self::Accessories => "accessories",
            Self::Logos => "logos",
            Self::Dealers => "dealers",
            Self::Messages => "messages",
            Self::Contacts => "contacts",
            Self::Users => "users",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Document match criteria.
///
/// `Eq` compares one top-level field against a string value, which covers
/// every lookup this service performs (user-by-email).
#[derive(Debug, Clone)]
pub enum Filter {
    /// Match every document in the collection.
    All,
    /// Match documents whose `field` equals `value`.
    Eq {
        field: &'static str,
        value: String,
    },
}

/// Errors from the document store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The underlying database failed.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Find / insert / delete access to the document database.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch matching documents in insertion order.
    async fn find(&self, collection: Collection, filter: Filter) -> Result<Vec<Value>, StoreError>;

    /// Append documents, preserving their order. Returns the count inserted.
    async fn insert_many(
        &self,
        collection: Collection,
        docs: Vec<Value>,
    ) -> Result<u64, StoreError>;

    /// Delete every document in the collection. Returns the count removed.
    async fn delete_all(&self, collection: Collection) -> Result<u64, StoreError>;

    /// Connectivity check for readiness probes.
    async fn ping(&self) -> Result<(), StoreError>;
}
