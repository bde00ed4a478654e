//! The cart state machine.
//!
//! A cart is an ordered collection of denormalized catalog snapshots, unique
//! by item id, owned by a single browsing session. Every mutation rewrites
//! the full persisted snapshot; loading tolerates a missing or corrupt
//! snapshot by starting empty.
//!
//! Invariants:
//!
//! - every line has `quantity >= 1`; decrements clamp at 1 instead of
//!   removing the line
//! - adding an id already in the cart is rejected as [`CartError::AlreadyInCart`]
//!   and leaves the existing line untouched
//! - adding requires an [`AuthToken`]

mod error;
pub mod storage;

pub use error::CartError;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use chainring_core::{Accessory, Bike, ItemId};

use crate::auth::AuthToken;
use storage::CartStorage;

const fn quantity_one() -> u32 {
    1
}

/// A single cart line: the add-time snapshot of a catalog item plus a
/// quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: ItemId,
    pub name: String,
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default = "quantity_one")]
    pub quantity: u32,
}

impl CartItem {
    /// Price times quantity for this line.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

impl From<&Bike> for CartItem {
    fn from(bike: &Bike) -> Self {
        Self {
            id: bike.id.clone(),
            name: bike.name.clone(),
            image: bike.image.clone(),
            color: Some(bike.color.clone()),
            price: bike.price,
            quantity: 1,
        }
    }
}

impl From<&Accessory> for CartItem {
    fn from(accessory: &Accessory) -> Self {
        Self {
            id: accessory.id.clone(),
            name: accessory.name.clone(),
            image: accessory.image.clone(),
            color: None,
            price: accessory.price,
            quantity: 1,
        }
    }
}

/// Cart contents: an ordered collection of [`CartItem`] unique by id.
///
/// Serializes transparently as a JSON array, which is also the persisted
/// snapshot format.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// The lines in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether an item with this id is already in the cart.
    #[must_use]
    pub fn contains(&self, id: &ItemId) -> bool {
        self.items.iter().any(|item| item.id == *id)
    }

    /// Look up a line by id.
    #[must_use]
    pub fn get(&self, id: &ItemId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id == *id)
    }

    /// Sum of `price * quantity` over all lines; zero when empty.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Restore the quantity invariant on snapshots from older or foreign
    /// writers (a stored `0` means `1`).
    fn enforce_quantity_floor(&mut self) {
        for item in &mut self.items {
            item.quantity = item.quantity.max(1);
        }
    }
}

/// The session's cart service: owns the [`Cart`], applies mutations, and
/// persists a snapshot after each one.
///
/// Constructed once per session and passed by reference to whatever drives
/// it; there is no ambient global cart.
#[derive(Debug)]
pub struct CartStore<S: CartStorage> {
    cart: Cart,
    storage: S,
    // Set after the first storage failure; the cart then lives in memory
    // only for the rest of the session.
    persistence_lost: bool,
}

impl<S: CartStorage> CartStore<S> {
    /// Load the persisted cart, or start empty.
    ///
    /// Never fails: a missing snapshot is an empty cart, an unparsable one
    /// is discarded with a warning, and an unreadable store degrades the
    /// session to memory-only persistence.
    pub fn load(storage: S) -> Self {
        let mut persistence_lost = false;
        let mut cart = match storage.read() {
            Ok(Some(snapshot)) => match serde_json::from_str::<Cart>(&snapshot) {
                Ok(cart) => cart,
                Err(err) => {
                    tracing::warn!(error = %err, "discarding unparsable cart snapshot");
                    Cart::default()
                }
            },
            Ok(None) => Cart::default(),
            Err(err) => {
                tracing::warn!(error = %err, "cart storage unreadable, continuing in memory only");
                persistence_lost = true;
                Cart::default()
            }
        };
        cart.enforce_quantity_floor();

        Self {
            cart,
            storage,
            persistence_lost,
        }
    }

    /// The current cart contents.
    #[must_use]
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Sum of `price * quantity` over the cart; zero when empty.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.cart.total()
    }

    /// Whether mutations are still being persisted durably.
    #[must_use]
    pub const fn is_persistent(&self) -> bool {
        !self.persistence_lost
    }

    /// Add an item to the cart.
    ///
    /// The stored line always starts at quantity 1, whatever the snapshot
    /// carried.
    ///
    /// # Errors
    ///
    /// - [`CartError::NotAuthenticated`] without a token; the cart is unchanged.
    /// - [`CartError::AlreadyInCart`] when the id is already present; the
    ///   existing line and its quantity are unchanged.
    pub fn add(&mut self, item: CartItem, token: Option<&AuthToken>) -> Result<&Cart, CartError> {
        if token.is_none() {
            return Err(CartError::NotAuthenticated);
        }
        if self.cart.contains(&item.id) {
            return Err(CartError::AlreadyInCart { name: item.name });
        }

        self.cart.items.push(CartItem { quantity: 1, ..item });
        self.persist();
        Ok(&self.cart)
    }

    /// Remove the line with this id; a no-op when absent.
    pub fn remove(&mut self, id: &ItemId) -> &Cart {
        self.cart.items.retain(|item| item.id != *id);
        self.persist();
        &self.cart
    }

    /// Shift a line's quantity by `delta`, clamping at 1.
    ///
    /// Decrementing never removes the line and never goes below 1; an absent
    /// id is a no-op.
    pub fn adjust_quantity(&mut self, id: &ItemId, delta: i64) -> &Cart {
        if let Some(item) = self.cart.items.iter_mut().find(|item| item.id == *id) {
            let next = i64::from(item.quantity).saturating_add(delta).max(1);
            item.quantity = u32::try_from(next).unwrap_or(u32::MAX);
            self.persist();
        }
        &self.cart
    }

    /// Empty the cart and remove the persisted snapshot.
    pub fn clear(&mut self) -> &Cart {
        self.cart.items.clear();
        if !self.persistence_lost
            && let Err(err) = self.storage.clear()
        {
            tracing::warn!(error = %err, "cart storage clear failed, continuing in memory only");
            self.persistence_lost = true;
        }
        &self.cart
    }

    fn persist(&mut self) {
        if self.persistence_lost {
            return;
        }

        let snapshot = match serde_json::to_string(&self.cart) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                tracing::warn!(error = %err, "failed to serialize cart snapshot");
                return;
            }
        };

        if let Err(err) = self.storage.write(&snapshot) {
            tracing::warn!(error = %err, "cart storage write failed, continuing in memory only");
            self.persistence_lost = true;
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chainring_core::Email;
    use rust_decimal::Decimal;

    use super::storage::{CartStorage, MemoryStorage, StorageError};
    use super::*;

    fn token() -> AuthToken {
        AuthToken::new(Email::parse("rider@example.com").unwrap())
    }

    fn item(id: &str, price: i64) -> CartItem {
        CartItem {
            id: ItemId::new(id),
            name: format!("item {id}"),
            image: format!("/img/{id}.jpg"),
            color: None,
            price: Decimal::from(price),
            quantity: 1,
        }
    }

    #[test]
    fn test_add_to_empty_cart() {
        let mut store = CartStore::load(MemoryStorage::new());
        let auth = token();

        let cart = store.add(item("b1", 1000), Some(&auth)).unwrap();

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get(&ItemId::new("b1")).unwrap().quantity, 1);
        assert_eq!(store.total(), Decimal::from(1000));
    }

    #[test]
    fn test_add_requires_authentication() {
        let mut store = CartStore::load(MemoryStorage::new());

        let err = store.add(item("b1", 1000), None).unwrap_err();

        assert_eq!(err, CartError::NotAuthenticated);
        assert!(store.cart().is_empty());
    }

    #[test]
    fn test_duplicate_add_is_rejected_and_leaves_cart_unchanged() {
        let mut store = CartStore::load(MemoryStorage::new());
        let auth = token();

        store.add(item("b1", 1000), Some(&auth)).unwrap();
        store.adjust_quantity(&ItemId::new("b1"), 2);
        let before = store.cart().clone();

        let err = store.add(item("b1", 1000), Some(&auth)).unwrap_err();

        assert!(matches!(err, CartError::AlreadyInCart { ref name } if name == "item b1"));
        assert_eq!(store.cart(), &before);
        assert_eq!(store.cart().get(&ItemId::new("b1")).unwrap().quantity, 3);
    }

    #[test]
    fn test_add_forces_quantity_to_one() {
        let mut store = CartStore::load(MemoryStorage::new());
        let auth = token();

        let mut seeded = item("b1", 500);
        seeded.quantity = 9;
        store.add(seeded, Some(&auth)).unwrap();

        assert_eq!(store.cart().get(&ItemId::new("b1")).unwrap().quantity, 1);
    }

    #[test]
    fn test_quantity_floor_clamps_at_one() {
        let mut store = CartStore::load(MemoryStorage::new());
        let auth = token();
        store.add(item("b1", 1000), Some(&auth)).unwrap();

        store.adjust_quantity(&ItemId::new("b1"), -1);
        assert_eq!(store.cart().get(&ItemId::new("b1")).unwrap().quantity, 1);

        store.adjust_quantity(&ItemId::new("b1"), -100);
        assert_eq!(store.cart().get(&ItemId::new("b1")).unwrap().quantity, 1);

        store.adjust_quantity(&ItemId::new("b1"), 3);
        assert_eq!(store.cart().get(&ItemId::new("b1")).unwrap().quantity, 4);
    }

    #[test]
    fn test_adjust_quantity_on_absent_id_is_noop() {
        let mut store = CartStore::load(MemoryStorage::new());
        let auth = token();
        store.add(item("b1", 1000), Some(&auth)).unwrap();

        store.adjust_quantity(&ItemId::new("missing"), 5);

        assert_eq!(store.cart().len(), 1);
        assert_eq!(store.cart().get(&ItemId::new("b1")).unwrap().quantity, 1);
    }

    #[test]
    fn test_remove_then_total_is_zero() {
        let mut store = CartStore::load(MemoryStorage::new());
        let auth = token();
        store.add(item("b1", 500), Some(&auth)).unwrap();
        store.adjust_quantity(&ItemId::new("b1"), 1);

        store.remove(&ItemId::new("b1"));

        assert!(store.cart().is_empty());
        assert_eq!(store.total(), Decimal::ZERO);
    }

    #[test]
    fn test_remove_absent_id_is_trivially_ok() {
        let mut store = CartStore::load(MemoryStorage::new());
        store.remove(&ItemId::new("ghost"));
        assert!(store.cart().is_empty());
    }

    #[test]
    fn test_total_sums_price_times_quantity() {
        let mut store = CartStore::load(MemoryStorage::new());
        let auth = token();
        store.add(item("b1", 1000), Some(&auth)).unwrap();
        store.add(item("a1", 250), Some(&auth)).unwrap();
        store.adjust_quantity(&ItemId::new("a1"), 3);

        assert_eq!(store.total(), Decimal::from(1000 + 250 * 4));
    }

    #[test]
    fn test_clear_is_absorbing() {
        let mut store = CartStore::load(MemoryStorage::new());
        let auth = token();
        store.add(item("b1", 1000), Some(&auth)).unwrap();
        store.add(item("a1", 250), Some(&auth)).unwrap();

        store.clear();
        assert!(store.cart().is_empty());
        assert_eq!(store.total(), Decimal::ZERO);

        store.clear();
        assert!(store.cart().is_empty());
    }

    #[test]
    fn test_load_save_roundtrip() {
        let storage = MemoryStorage::new();
        {
            let mut store = CartStore::load(storage.clone());
            let auth = token();
            store.add(item("b1", 1000), Some(&auth)).unwrap();
            store.adjust_quantity(&ItemId::new("b1"), 1);
        }

        let reloaded = CartStore::load(storage);
        assert_eq!(reloaded.cart().len(), 1);
        assert_eq!(reloaded.cart().get(&ItemId::new("b1")).unwrap().quantity, 2);
        assert_eq!(reloaded.total(), Decimal::from(2000));
    }

    #[test]
    fn test_load_corrupt_snapshot_degrades_to_empty() {
        let store = CartStore::load(MemoryStorage::with_snapshot("not json at all {"));
        assert!(store.cart().is_empty());
        assert!(store.is_persistent());
    }

    #[test]
    fn test_load_normalizes_zero_quantity_to_one() {
        let snapshot = r#"[{"id":"b1","name":"Summit","image":"/img/b1.jpg","price":1000,"quantity":0}]"#;
        let store = CartStore::load(MemoryStorage::with_snapshot(snapshot));
        assert_eq!(store.cart().get(&ItemId::new("b1")).unwrap().quantity, 1);
    }

    #[test]
    fn test_load_defaults_missing_quantity_to_one() {
        let snapshot = r#"[{"id":"b1","name":"Summit","image":"/img/b1.jpg","price":1000}]"#;
        let store = CartStore::load(MemoryStorage::with_snapshot(snapshot));
        assert_eq!(store.cart().get(&ItemId::new("b1")).unwrap().quantity, 1);
    }

    /// Storage that accepts nothing; drives the degraded-persistence path.
    #[derive(Debug, Default)]
    struct BrokenStorage;

    impl CartStorage for BrokenStorage {
        fn read(&self) -> Result<Option<String>, StorageError> {
            Ok(None)
        }

        fn write(&mut self, _snapshot: &str) -> Result<(), StorageError> {
            Err(StorageError::Io(std::io::Error::other("disk full")))
        }

        fn clear(&mut self) -> Result<(), StorageError> {
            Err(StorageError::Io(std::io::Error::other("disk full")))
        }
    }

    #[test]
    fn test_failed_write_degrades_to_memory_only() {
        let mut store = CartStore::load(BrokenStorage);
        let auth = token();

        store.add(item("b1", 1000), Some(&auth)).unwrap();

        assert!(!store.is_persistent());
        assert_eq!(store.cart().len(), 1);

        // mutations keep working in memory
        store.add(item("a1", 250), Some(&auth)).unwrap();
        store.adjust_quantity(&ItemId::new("a1"), 4);
        assert_eq!(store.total(), Decimal::from(1000 + 250 * 5));
    }

    #[test]
    fn test_cart_item_from_catalog_documents() {
        let bike = Bike {
            id: ItemId::new("b1"),
            name: "Summit 29er".to_owned(),
            image: "/img/summit.jpg".to_owned(),
            price: Decimal::from(1299),
            color: "matte black".to_owned(),
            rating: 4.5,
        };
        let line = CartItem::from(&bike);
        assert_eq!(line.color.as_deref(), Some("matte black"));
        assert_eq!(line.quantity, 1);

        let accessory = Accessory {
            id: ItemId::new("a1"),
            name: "Clip pedals".to_owned(),
            price: Decimal::from(89),
            image: "/img/pedals.jpg".to_owned(),
            description: "Dual-sided clip pedals".to_owned(),
            category: "components".to_owned(),
        };
        let line = CartItem::from(&accessory);
        assert!(line.color.is_none());
        assert_eq!(line.price, Decimal::from(89));
    }
}
