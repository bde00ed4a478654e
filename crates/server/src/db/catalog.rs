//! Catalog repository: typed access to the catalog collections.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use chainring_core::{Accessory, Bike, ContactMessage, Dealer, DealerMessage, Logo};

use super::store::{Collection, DocumentStore, Filter};
use super::RepositoryError;

/// Repository for catalog documents, messages, and contacts.
pub struct CatalogRepository<'a> {
    store: &'a dyn DocumentStore,
}

impl<'a> CatalogRepository<'a> {
    /// Create a repository over the given store.
    #[must_use]
    pub const fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store }
    }

    /// All bikes, in insertion order.
    ///
    /// # Errors
    ///
    /// `RepositoryError::Store` if the query fails,
    /// `RepositoryError::DataCorruption` if a stored document is malformed.
    pub async fn list_bikes(&self) -> Result<Vec<Bike>, RepositoryError> {
        self.list(Collection::Bikes).await
    }

    /// All accessories, in insertion order.
    ///
    /// # Errors
    ///
    /// See [`Self::list_bikes`].
    pub async fn list_accessories(&self) -> Result<Vec<Accessory>, RepositoryError> {
        self.list(Collection::Accessories).await
    }

    /// All brand logos, in insertion order.
    ///
    /// # Errors
    ///
    /// See [`Self::list_bikes`].
    pub async fn list_logos(&self) -> Result<Vec<Logo>, RepositoryError> {
        self.list(Collection::Logos).await
    }

    /// All dealers, in insertion order.
    ///
    /// # Errors
    ///
    /// See [`Self::list_bikes`].
    pub async fn list_dealers(&self) -> Result<Vec<Dealer>, RepositoryError> {
        self.list(Collection::Dealers).await
    }

    /// Append bikes without touching existing documents.
    ///
    /// # Errors
    ///
    /// `RepositoryError::Store` if the insert fails.
    pub async fn import_bikes(&self, bikes: Vec<Bike>) -> Result<u64, RepositoryError> {
        self.append(Collection::Bikes, &bikes).await
    }

    /// Replace the logo collection wholesale.
    ///
    /// # Errors
    ///
    /// `RepositoryError::Store` if the replace fails.
    pub async fn import_logos(&self, logos: Vec<Logo>) -> Result<u64, RepositoryError> {
        self.replace(Collection::Logos, &logos).await
    }

    /// Replace the accessory collection wholesale.
    ///
    /// # Errors
    ///
    /// `RepositoryError::Store` if the replace fails.
    pub async fn import_accessories(
        &self,
        accessories: Vec<Accessory>,
    ) -> Result<u64, RepositoryError> {
        self.replace(Collection::Accessories, &accessories).await
    }

    /// Replace the dealer collection wholesale.
    ///
    /// # Errors
    ///
    /// `RepositoryError::Store` if the replace fails.
    pub async fn import_dealers(&self, dealers: Vec<Dealer>) -> Result<u64, RepositoryError> {
        self.replace(Collection::Dealers, &dealers).await
    }

    /// Store a dealer-directed message.
    ///
    /// # Errors
    ///
    /// `RepositoryError::Store` if the insert fails.
    pub async fn create_message(&self, message: &DealerMessage) -> Result<(), RepositoryError> {
        self.store
            .insert_many(Collection::Messages, vec![to_doc(message)?])
            .await?;
        Ok(())
    }

    /// Store a contact form submission.
    ///
    /// # Errors
    ///
    /// `RepositoryError::Store` if the insert fails.
    pub async fn create_contact(&self, message: &ContactMessage) -> Result<(), RepositoryError> {
        self.store
            .insert_many(Collection::Contacts, vec![to_doc(message)?])
            .await?;
        Ok(())
    }

    async fn list<T: DeserializeOwned>(
        &self,
        collection: Collection,
    ) -> Result<Vec<T>, RepositoryError> {
        let docs = self.store.find(collection, Filter::All).await?;
        docs.into_iter()
            .map(|doc| {
                serde_json::from_value(doc).map_err(|e| {
                    RepositoryError::DataCorruption(format!("invalid {collection} document: {e}"))
                })
            })
            .collect()
    }

    async fn append<T: Serialize>(
        &self,
        collection: Collection,
        items: &[T],
    ) -> Result<u64, RepositoryError> {
        let docs = to_docs(items)?;
        Ok(self.store.insert_many(collection, docs).await?)
    }

    async fn replace<T: Serialize>(
        &self,
        collection: Collection,
        items: &[T],
    ) -> Result<u64, RepositoryError> {
        let docs = to_docs(items)?;
        self.store.delete_all(collection).await?;
        Ok(self.store.insert_many(collection, docs).await?)
    }
}

fn to_doc<T: Serialize>(item: &T) -> Result<Value, RepositoryError> {
    serde_json::to_value(item)
        .map_err(|e| RepositoryError::DataCorruption(format!("failed to serialize document: {e}")))
}

fn to_docs<T: Serialize>(items: &[T]) -> Result<Vec<Value>, RepositoryError> {
    items.iter().map(to_doc).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chainring_core::{Email, ItemId};
    use rust_decimal::Decimal;

    use crate::db::MemoryDocumentStore;

    use super::*;

    fn bike(id: &str, price: i64) -> Bike {
        Bike {
            id: ItemId::new(id),
            name: format!("bike {id}"),
            image: format!("/img/{id}.jpg"),
            price: Decimal::from(price),
            color: "black".to_owned(),
            rating: 4.2,
        }
    }

    fn logo(id: &str) -> Logo {
        Logo {
            id: ItemId::new(id),
            name: format!("brand {id}"),
            image: format!("/img/{id}.svg"),
        }
    }

    #[tokio::test]
    async fn test_bike_import_appends() {
        let store = MemoryDocumentStore::new();
        let repo = CatalogRepository::new(&store);

        repo.import_bikes(vec![bike("b1", 1000), bike("b2", 1400)])
            .await
            .unwrap();
        repo.import_bikes(vec![bike("b3", 900)]).await.unwrap();

        let bikes = repo.list_bikes().await.unwrap();
        assert_eq!(bikes.len(), 3);
        assert_eq!(bikes.first().unwrap().id, ItemId::new("b1"));
    }

    #[tokio::test]
    async fn test_logo_import_replaces() {
        let store = MemoryDocumentStore::new();
        let repo = CatalogRepository::new(&store);

        repo.import_logos(vec![logo("l1"), logo("l2")]).await.unwrap();
        let count = repo.import_logos(vec![logo("l3")]).await.unwrap();

        assert_eq!(count, 1);
        let logos = repo.list_logos().await.unwrap();
        assert_eq!(logos.len(), 1);
        assert_eq!(logos.first().unwrap().id, ItemId::new("l3"));
    }

    #[tokio::test]
    async fn test_corrupt_document_is_reported() {
        let store = MemoryDocumentStore::new();
        store
            .insert_many(Collection::Bikes, vec![serde_json::json!({"name": 42})])
            .await
            .unwrap();

        let err = CatalogRepository::new(&store).list_bikes().await.unwrap_err();
        assert!(matches!(err, RepositoryError::DataCorruption(_)));
    }

    #[tokio::test]
    async fn test_messages_roundtrip_through_store() {
        let store = MemoryDocumentStore::new();
        let repo = CatalogRepository::new(&store);

        let message = DealerMessage::new(
            ItemId::new("d1"),
            "Sam".to_owned(),
            Email::parse("sam@example.com").unwrap(),
            "Do you stock gravel tires?".to_owned(),
        );
        repo.create_message(&message).await.unwrap();

        let docs = store.find(Collection::Messages, Filter::All).await.unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(
            docs.first().unwrap().get("dealerId").unwrap().as_str(),
            Some("d1")
        );
    }
}
