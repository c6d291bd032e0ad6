// SPDX-FileCopyrightText: 2026 KisanMitra Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Cart state and line-item mutations.
//!
//! The cart is one JSON array under its own key. Each mutation reads it,
//! changes it, writes it back and then publishes a [`CartSnapshot`]. Lines are
//! keyed by product id: there is never more than one line per product and no
//! line ever has quantity zero.

use std::sync::Arc;

use chrono::Duration;
use kisanmitra_config::KisanConfig;
use kisanmitra_core::{CartItem, KeyValueStore, KisanError, Product};
use kisanmitra_storage::{JsonCollection, StorageKeys};
use rust_decimal::Decimal;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::notify::{CartNotifier, CartSnapshot};
use crate::pricing::DeliveryPolicy;

/// Keys and checkout rules used by a [`CartManager`].
#[derive(Debug, Clone, PartialEq)]
pub struct CartSettings {
    pub cart_key: String,
    pub orders_key: String,
    pub delivery: DeliveryPolicy,
    pub order_id_prefix: String,
    /// `None` when the configured window cannot be represented.
    pub delivery_window: Option<Duration>,
}

impl CartSettings {
    pub fn from_config(config: &KisanConfig) -> Self {
        let keys = StorageKeys::from_config(&config.storage);
        Self {
            cart_key: keys.cart().to_string(),
            orders_key: keys.orders().to_string(),
            delivery: DeliveryPolicy::from_config(&config.cart),
            order_id_prefix: config.cart.order_id_prefix.clone(),
            delivery_window: Duration::try_hours(config.cart.delivery_window_hours.max(0)),
        }
    }
}

impl Default for CartSettings {
    fn default() -> Self {
        Self::from_config(&KisanConfig::default())
    }
}

/// Owns the cart and order history persisted in a [`KeyValueStore`].
pub struct CartManager {
    pub(crate) store: Arc<dyn KeyValueStore>,
    pub(crate) settings: CartSettings,
    notifier: CartNotifier,
}

impl CartManager {
    pub fn new(store: Arc<dyn KeyValueStore>, settings: CartSettings) -> Self {
        let initial = JsonCollection::<CartItem>::new(store.as_ref(), settings.cart_key.as_str())
            .load();
        Self {
            store,
            settings,
            notifier: CartNotifier::new(initial),
        }
    }

    pub fn with_config(store: Arc<dyn KeyValueStore>, config: &KisanConfig) -> Self {
        Self::new(store, CartSettings::from_config(config))
    }

    pub fn settings(&self) -> &CartSettings {
        &self.settings
    }

    pub(crate) fn cart(&self) -> JsonCollection<'_, CartItem> {
        JsonCollection::new(self.store.as_ref(), self.settings.cart_key.as_str())
    }

    /// Publish the stored cart to subscribers.
    pub(crate) fn notify(&self) {
        let revision = self.notifier.publish(self.get_cart());
        debug!(revision, "cart change published");
    }

    fn mutate_cart(&self, change: impl FnOnce(&mut Vec<CartItem>)) {
        let cart = self.cart();
        let mut items = cart.load();
        change(&mut items);
        cart.save(&items);
        self.notify();
    }

    /// Add one unit of `product`. An existing line keeps its captured price
    /// and only gains quantity.
    pub fn add_to_cart(&self, product: &Product) -> Result<(), KisanError> {
        product.validate()?;
        self.mutate_cart(|items| {
            match items.iter_mut().find(|i| i.id == product.id) {
                Some(line) => line.quantity = line.quantity.saturating_add(1),
                None => items.push(CartItem::from_product(product)),
            }
        });
        debug!(product_id = %product.id, "added to cart");
        Ok(())
    }

    /// Remove one unit, dropping the line when it reaches zero.
    pub fn remove_from_cart(&self, product_id: &str) {
        self.mutate_cart(|items| {
            if let Some(pos) = items.iter().position(|i| i.id == product_id) {
                if items[pos].quantity > 1 {
                    items[pos].quantity -= 1;
                } else {
                    items.remove(pos);
                }
            }
        });
    }

    /// Set a line's quantity. Zero or less deletes the line; unknown ids are ignored.
    pub fn update_quantity(&self, product_id: &str, quantity: i64) {
        if quantity <= 0 {
            self.delete_item(product_id);
            return;
        }
        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        self.mutate_cart(|items| {
            if let Some(line) = items.iter_mut().find(|i| i.id == product_id) {
                line.quantity = quantity;
            }
        });
    }

    /// Remove a line regardless of quantity.
    pub fn delete_item(&self, product_id: &str) {
        self.mutate_cart(|items| items.retain(|i| i.id != product_id));
    }

    /// Empty the cart. Returns `false` when the stored cart could be neither
    /// removed nor overwritten, in which case it still holds its lines.
    pub fn clear_cart(&self) -> bool {
        let cart = self.cart();
        let cleared = cart.clear() || cart.try_save(&[]).is_ok();
        if !cleared {
            warn!(key = %self.settings.cart_key, "cart could not be cleared");
        }
        self.notify();
        cleared
    }

    pub fn get_cart(&self) -> Vec<CartItem> {
        self.cart().load()
    }

    /// Total units across all lines.
    pub fn get_cart_count(&self) -> u64 {
        self.get_cart().iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// Σ price × quantity.
    pub fn get_cart_subtotal(&self) -> Decimal {
        self.get_cart().iter().map(CartItem::line_total).sum()
    }

    /// Same as [`get_cart_subtotal`](Self::get_cart_subtotal); fees and
    /// discounts only apply at checkout.
    pub fn get_cart_total(&self) -> Decimal {
        self.get_cart_subtotal()
    }

    /// Σ (original price − price) × quantity.
    pub fn get_cart_savings(&self) -> Decimal {
        self.get_cart().iter().map(CartItem::line_savings).sum()
    }

    /// Receive a snapshot after every cart mutation.
    ///
    /// The receiver starts with the latest snapshot already visible through
    /// `borrow()`.
    pub fn subscribe(&self) -> watch::Receiver<CartSnapshot> {
        self.notifier.subscribe()
    }

    pub fn latest_snapshot(&self) -> CartSnapshot {
        self.notifier.latest()
    }
}

impl std::fmt::Debug for CartManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartManager")
            .field("store", &self.store.name())
            .field("settings", &self.settings)
            .finish()
    }
}
