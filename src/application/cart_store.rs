use bigdecimal::BigDecimal;

use crate::domain::cart::{Cart, QuantityChange};
use crate::domain::errors::DomainError;
use crate::domain::ports::KeyValueStore;
use crate::domain::product::Product;
use crate::infrastructure::models::{decode_cart, encode_cart};

/// The session cart, mirrored to durable storage after every mutation.
pub struct CartStore<S> {
    cart: Cart,
    storage: S,
    key: String,
}

impl<S: KeyValueStore> CartStore<S> {
    /// Loads the cart saved under `key`. Missing, unreadable or corrupt data
    /// yields an empty cart.
    pub fn load(storage: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let cart = match storage.get(&key) {
            Ok(Some(raw)) => Self::deserialize(&raw),
            Ok(None) => Cart::new(),
            Err(e) => {
                log::warn!("Could not read stored cart '{}', starting empty: {}", key, e);
                Cart::new()
            }
        };
        log::debug!("Loaded cart with {} line(s)", cart.lines().len());
        Self { cart, storage, key }
    }

    /// Never fails: a corrupt payload is logged and replaced by an empty cart.
    pub fn deserialize(raw: &str) -> Cart {
        match decode_cart(raw) {
            Ok(cart) => cart,
            Err(e) => {
                log::warn!("{}; treating cart as empty", e);
                Cart::new()
            }
        }
    }

    pub fn serialize(&self) -> Result<String, DomainError> {
        encode_cart(&self.cart)
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Returns the line's quantity after the add.
    pub fn add_item(&mut self, product: &Product) -> u32 {
        let quantity = self.cart.add(product);
        log::debug!("Cart: product {} now at quantity {}", product.id, quantity);
        self.persist();
        quantity
    }

    pub fn remove_item(&mut self, product_id: u64) -> bool {
        let removed = self.cart.remove(product_id);
        if removed {
            log::debug!("Cart: removed product {}", product_id);
        }
        self.persist();
        removed
    }

    pub fn update_quantity(&mut self, product_id: u64, delta: i64) -> QuantityChange {
        let change = self.cart.update_quantity(product_id, delta);
        match change {
            QuantityChange::Missing => {}
            QuantityChange::Updated(q) => {
                log::debug!("Cart: product {} now at quantity {}", product_id, q);
                self.persist();
            }
            QuantityChange::Removed => {
                log::debug!("Cart: removed product {}", product_id);
                self.persist();
            }
        }
        change
    }

    pub fn total_item_count(&self) -> u64 {
        self.cart.total_item_count()
    }

    pub fn total_price(&self) -> BigDecimal {
        self.cart.total_price()
    }

    /// Synchronous write; a failure is logged and the in-memory cart kept.
    fn persist(&mut self) {
        let result = self
            .serialize()
            .and_then(|raw| self.storage.set(&self.key, &raw));
        if let Err(e) = result {
            log::error!("Failed to persist cart '{}': {}", self.key, e);
        }
    }
}
