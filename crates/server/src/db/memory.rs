//! In-memory document store for tests and local experiments.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use serde_json::Value;

use super::store::{Collection, DocumentStore, Filter, StoreError};

/// A document store held entirely in process memory.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    collections: Mutex<HashMap<Collection, Vec<Value>>>,
}

impl MemoryDocumentStore {
    /// An empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<Collection, Vec<Value>>> {
        self.collections
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

fn matches(doc: &Value, filter: &Filter) -> bool {
    match filter {
        Filter::All => true,
        Filter::Eq { field, value } => doc
            .get(field)
            .and_then(Value::as_str)
            .is_some_and(|v| v == value.as_str()),
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn find(&self, collection: Collection, filter: Filter) -> Result<Vec<Value>, StoreError> {
        let collections = self.lock();
        Ok(collections
            .get(&collection)
            .map(|docs| {
                docs.iter()
                    .filter(|doc| matches(doc, &filter))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn insert_many(
        &self,
        collection: Collection,
        docs: Vec<Value>,
    ) -> Result<u64, StoreError> {
        let count = u64::try_from(docs.len()).unwrap_or(u64::MAX);
        self.lock().entry(collection).or_default().extend(docs);
        Ok(count)
    }

    async fn delete_all(&self, collection: Collection) -> Result<u64, StoreError> {
        let removed = self
            .lock()
            .remove(&collection)
            .map_or(0, |docs| u64::try_from(docs.len()).unwrap_or(u64::MAX));
        Ok(removed)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn test_insert_and_find_preserve_order() {
        let store = MemoryDocumentStore::new();
        store
            .insert_many(
                Collection::Bikes,
                vec![json!({"id": "b1"}), json!({"id": "b2"})],
            )
            .await
            .unwrap();
        store
            .insert_many(Collection::Bikes, vec![json!({"id": "b3"})])
            .await
            .unwrap();

        let docs = store.find(Collection::Bikes, Filter::All).await.unwrap();
        let ids: Vec<_> = docs
            .iter()
            .map(|d| d.get("id").unwrap().as_str().unwrap().to_owned())
            .collect();
        assert_eq!(ids, vec!["b1", "b2", "b3"]);
    }

    #[tokio::test]
    async fn test_find_with_eq_filter() {
        let store = MemoryDocumentStore::new();
        store
            .insert_many(
                Collection::Users,
                vec![
                    json!({"email": "a@example.com"}),
                    json!({"email": "b@example.com"}),
                ],
            )
            .await
            .unwrap();

        let docs = store
            .find(
                Collection::Users,
                Filter::Eq {
                    field: "email",
                    value: "b@example.com".to_owned(),
                },
            )
            .await
            .unwrap();
        assert_eq!(docs.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_all_reports_count() {
        let store = MemoryDocumentStore::new();
        store
            .insert_many(Collection::Logos, vec![json!({}), json!({})])
            .await
            .unwrap();

        assert_eq!(store.delete_all(Collection::Logos).await.unwrap(), 2);
        assert_eq!(store.delete_all(Collection::Logos).await.unwrap(), 0);
        assert!(
            store
                .find(Collection::Logos, Filter::All)
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn test_collections_are_isolated() {
        let store = MemoryDocumentStore::new();
        store
            .insert_many(Collection::Bikes, vec![json!({"id": "b1"})])
            .await
            .unwrap();

        assert!(
            store
                .find(Collection::Accessories, Filter::All)
                .await
                .unwrap()
                .is_empty()
        );
    }
}
