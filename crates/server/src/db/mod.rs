//! Persistence for the catalog store.
//!
//! All data - catalog documents, messages, contacts, users - lives in one
//! logical document store ([`DocumentStore`]), addressed by collection.
//! Production uses Postgres JSONB; tests use the in-memory implementation.
//! Typed repositories ([`catalog::CatalogRepository`],
//! [`users::UserRepository`]) sit on top and own the serde boundary.
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p chainring-cli -- migrate
//! ```

pub mod catalog;
pub mod memory;
pub mod postgres;
pub mod store;
pub mod users;

pub use memory::MemoryDocumentStore;
pub use postgres::{PgDocumentStore, create_pool};
pub use store::{Collection, DocumentStore, Filter, StoreError};

use thiserror::Error;

/// Errors from the typed repositories layered over the document store.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The document store failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// A stored document does not deserialize to its expected shape.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// A uniqueness rule was violated.
    #[error("conflict: {0}")]
    Conflict(String),
}
