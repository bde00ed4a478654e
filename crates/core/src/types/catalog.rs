//! Catalog document types.
//!
//! These mirror the JSON documents held by the catalog store and served by
//! the read endpoints. Prices are decimals serialized as plain JSON numbers.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::id::ItemId;

/// A bicycle in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bike {
    #[serde(default = "ItemId::generate")]
    pub id: ItemId,
    pub name: String,
    pub image: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub color: String,
    pub rating: f32,
}

/// A bike accessory in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Accessory {
    #[serde(default = "ItemId::generate")]
    pub id: ItemId,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub image: String,
    pub description: String,
    pub category: String,
}

/// A brand logo shown on the storefront.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Logo {
    #[serde(default = "ItemId::generate")]
    pub id: ItemId,
    pub name: String,
    pub image: String,
}

/// A dealer listed in the dealer directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dealer {
    #[serde(default = "ItemId::generate")]
    pub id: ItemId,
    pub name: String,
    pub location: String,
    pub phone: String,
    pub email: String,
    #[serde(rename = "mapUrl")]
    pub map_url: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    #[test]
    fn test_bike_price_deserializes_from_json_number() {
        let bike: Bike = serde_json::from_str(
            r#"{"id":"b1","name":"Summit 29er","image":"/img/summit.jpg","price":1299.5,"color":"matte black","rating":4.5}"#,
        )
        .unwrap();

        assert_eq!(bike.price, Decimal::new(12995, 1));
        assert_eq!(bike.id, ItemId::new("b1"));
    }

    #[test]
    fn test_missing_id_is_generated() {
        let logo: Logo =
            serde_json::from_str(r#"{"name":"Veloce","image":"/img/veloce.svg"}"#).unwrap();
        assert!(!logo.id.as_str().is_empty());
    }

    #[test]
    fn test_dealer_map_url_wire_name() {
        let dealer = Dealer {
            id: ItemId::new("d1"),
            name: "Ridgeline Cycles".to_owned(),
            location: "Portland, OR".to_owned(),
            phone: "555-0142".to_owned(),
            email: "hello@ridgeline.example".to_owned(),
            map_url: "https://maps.example/ridgeline".to_owned(),
        };

        let json = serde_json::to_value(&dealer).unwrap();
        assert!(json.get("mapUrl").is_some());
        assert!(json.get("map_url").is_none());
    }
}
