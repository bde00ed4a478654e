//! Catalog data cache.
//!
//! Read-only catalog lists fetched from the backend and held in an
//! in-process TTL cache for the page session. The backend always returns
//! the full collection; narrowing happens here, through the pure filter
//! functions at the bottom of this module.
//!
//! A failed fetch is logged and surfaced as an empty list. It never
//! propagates: catalog availability must not block the cart.

use std::time::Duration;

use moka::future::Cache;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use url::Url;

use chainring_core::{Accessory, Bike, Dealer, Logo, NewContactMessage, NewDealerMessage};

use crate::http::rejection_message;

/// How long a fetched collection stays fresh.
const CACHE_TTL: Duration = Duration::from_secs(60);

/// Cache key per catalog collection.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
enum CacheKey {
    Bikes,
    Accessories,
    Logos,
    Dealers,
}

/// Cached collection values.
#[derive(Debug, Clone)]
enum CacheValue {
    Bikes(Vec<Bike>),
    Accessories(Vec<Accessory>),
    Logos(Vec<Logo>),
    Dealers(Vec<Dealer>),
}

/// Errors from the catalog endpoints.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request never completed or returned a non-success status.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The endpoint path could not be joined onto the base URL.
    #[error("invalid endpoint url: {0}")]
    Url(#[from] url::ParseError),

    /// The server rejected a submission (validation failure).
    #[error("{message}")]
    Rejected {
        /// Server-provided reason.
        message: String,
    },
}

/// Client for the catalog read endpoints and message submissions.
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: Url,
    cache: Cache<CacheKey, CacheValue>,
}

impl CatalogClient {
    /// Create a client for the backend at `base_url`.
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            cache: Cache::builder()
                .max_capacity(8)
                .time_to_live(CACHE_TTL)
                .build(),
        }
    }

    /// All bikes; empty on fetch failure.
    pub async fn bikes(&self) -> Vec<Bike> {
        if let Some(CacheValue::Bikes(bikes)) = self.cache.get(&CacheKey::Bikes).await {
            return bikes;
        }
        match self.fetch::<Bike>("/api/bikes").await {
            Ok(bikes) => {
                self.cache
                    .insert(CacheKey::Bikes, CacheValue::Bikes(bikes.clone()))
                    .await;
                bikes
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to fetch bikes, showing an empty list");
                Vec::new()
            }
        }
    }

    /// All accessories; empty on fetch failure.
    pub async fn accessories(&self) -> Vec<Accessory> {
        if let Some(CacheValue::Accessories(items)) = self.cache.get(&CacheKey::Accessories).await
        {
            return items;
        }
        match self.fetch::<Accessory>("/api/accessories").await {
            Ok(items) => {
                self.cache
                    .insert(CacheKey::Accessories, CacheValue::Accessories(items.clone()))
                    .await;
                items
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to fetch accessories, showing an empty list");
                Vec::new()
            }
        }
    }

    /// All brand logos; empty on fetch failure.
    pub async fn logos(&self) -> Vec<Logo> {
        if let Some(CacheValue::Logos(logos)) = self.cache.get(&CacheKey::Logos).await {
            return logos;
        }
        match self.fetch::<Logo>("/api/logo").await {
            Ok(logos) => {
                self.cache
                    .insert(CacheKey::Logos, CacheValue::Logos(logos.clone()))
                    .await;
                logos
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to fetch logos, showing an empty list");
                Vec::new()
            }
        }
    }

    /// All dealers; empty on fetch failure.
    pub async fn dealers(&self) -> Vec<Dealer> {
        if let Some(CacheValue::Dealers(dealers)) = self.cache.get(&CacheKey::Dealers).await {
            return dealers;
        }
        match self.fetch::<Dealer>("/api/dealers").await {
            Ok(dealers) => {
                self.cache
                    .insert(CacheKey::Dealers, CacheValue::Dealers(dealers.clone()))
                    .await;
                dealers
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to fetch dealers, showing an empty list");
                Vec::new()
            }
        }
    }

    /// Submit a question to a dealer.
    ///
    /// # Errors
    ///
    /// [`ClientError::Rejected`] on validation failure,
    /// [`ClientError::Network`] on transport failure.
    pub async fn send_dealer_message(
        &self,
        message: &NewDealerMessage,
    ) -> Result<(), ClientError> {
        self.submit("/api/messages", message).await
    }

    /// Submit the contact form.
    ///
    /// # Errors
    ///
    /// [`ClientError::Rejected`] on validation failure,
    /// [`ClientError::Network`] on transport failure.
    pub async fn send_contact(&self, message: &NewContactMessage) -> Result<(), ClientError> {
        self.submit("/api/contact", message).await
    }

    async fn fetch<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, ClientError> {
        let url = self.base_url.join(path)?;
        let response = self.http.get(url).send().await?.error_for_status()?;
        Ok(response.json().await?)
    }

    async fn submit<T: serde::Serialize>(&self, path: &str, body: &T) -> Result<(), ClientError> {
        let url = self.base_url.join(path)?;
        let response = self.http.post(url).json(body).send().await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(ClientError::Rejected {
                message: rejection_message(response).await,
            })
        }
    }
}

// =============================================================================
// Client-side filtering
// =============================================================================

/// Accessories in the given category (case-insensitive).
#[must_use]
pub fn accessories_in_category<'a>(items: &'a [Accessory], category: &str) -> Vec<&'a Accessory> {
    items
        .iter()
        .filter(|item| item.category.eq_ignore_ascii_case(category))
        .collect()
}

/// Accessories at or under the given price.
#[must_use]
pub fn accessories_under(items: &[Accessory], max_price: Decimal) -> Vec<&Accessory> {
    items.iter().filter(|item| item.price <= max_price).collect()
}

/// Bikes at or under the given price.
#[must_use]
pub fn bikes_under(items: &[Bike], max_price: Decimal) -> Vec<&Bike> {
    items.iter().filter(|item| item.price <= max_price).collect()
}

/// Bikes whose name contains the query (case-insensitive); everything for a
/// blank query.
#[must_use]
pub fn bikes_matching<'a>(items: &'a [Bike], query: &str) -> Vec<&'a Bike> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return items.iter().collect();
    }
    items
        .iter()
        .filter(|item| item.name.to_lowercase().contains(&query))
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chainring_core::ItemId;

    use super::*;

    fn bike(id: &str, name: &str, price: i64) -> Bike {
        Bike {
            id: ItemId::new(id),
            name: name.to_owned(),
            image: format!("/img/{id}.jpg"),
            price: Decimal::from(price),
            color: "black".to_owned(),
            rating: 4.0,
        }
    }

    fn accessory(id: &str, category: &str, price: i64) -> Accessory {
        Accessory {
            id: ItemId::new(id),
            name: format!("accessory {id}"),
            price: Decimal::from(price),
            image: format!("/img/{id}.jpg"),
            description: String::new(),
            category: category.to_owned(),
        }
    }

    #[test]
    fn test_accessories_in_category_ignores_case() {
        let items = vec![
            accessory("a1", "Helmets", 120),
            accessory("a2", "lights", 35),
            accessory("a3", "helmets", 90),
        ];

        let helmets = accessories_in_category(&items, "HELMETS");
        assert_eq!(helmets.len(), 2);
        assert!(helmets.iter().all(|a| a.category.eq_ignore_ascii_case("helmets")));
    }

    #[test]
    fn test_price_filters_are_inclusive() {
        let bikes = vec![bike("b1", "Summit", 1000), bike("b2", "Boulevard", 700)];
        let cheap = bikes_under(&bikes, Decimal::from(700));
        assert_eq!(cheap.len(), 1);
        assert_eq!(cheap.first().unwrap().id, ItemId::new("b2"));

        let items = vec![accessory("a1", "lights", 35), accessory("a2", "lights", 36)];
        assert_eq!(accessories_under(&items, Decimal::from(35)).len(), 1);
    }

    #[test]
    fn test_bikes_matching_name_search() {
        let bikes = vec![
            bike("b1", "Summit Trail 29er", 1000),
            bike("b2", "City Boulevard", 700),
        ];

        assert_eq!(bikes_matching(&bikes, "summit").len(), 1);
        assert_eq!(bikes_matching(&bikes, "  ").len(), 2);
        assert!(bikes_matching(&bikes, "gravel").is_empty());
    }
}
