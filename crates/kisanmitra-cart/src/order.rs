// SPDX-FileCopyrightText: 2026 KisanMitra Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Checkout and order history.

use chrono::Utc;
use kisanmitra_core::{CheckoutRequest, KisanError, Order, OrderStatus, Product};
use kisanmitra_storage::JsonCollection;
use rust_decimal::Decimal;
use tracing::{debug, error, info, warn};

use crate::cart::CartManager;
use crate::pricing::OrderTotals;

/// Outcome of [`CartManager::update_order_status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusChange {
    /// The order moved and the history was written.
    Applied { from: OrderStatus, to: OrderStatus },
    /// Nothing was written: the order already had this status, or the write failed.
    Unchanged,
    /// The transition is not allowed from the order's current status.
    Rejected {
        current: OrderStatus,
        requested: OrderStatus,
    },
    /// No order has this id.
    NotFound,
}

impl CartManager {
    fn orders(&self) -> JsonCollection<'_, Order> {
        JsonCollection::new(self.store.as_ref(), self.settings.orders_key.as_str())
    }

    /// Turn the cart into an order, most recent first in the history, and
    /// empty the cart.
    ///
    /// The history is written before the cart is cleared. If that write fails
    /// the cart is left untouched and the error is returned. If the cart then
    /// cannot be cleared, the order is taken back out of the history and a
    /// storage error is returned.
    pub fn create_order(&self, request: &CheckoutRequest) -> Result<Order, KisanError> {
        if request.discount.is_sign_negative() && !request.discount.is_zero() {
            return Err(KisanError::Validation(format!(
                "discount must be non-negative, got {}",
                request.discount
            )));
        }

        let items = self.get_cart();
        if items.is_empty() {
            return Err(KisanError::EmptyCart);
        }

        let subtotal = items.iter().map(|i| i.line_total()).sum::<Decimal>();
        let totals = OrderTotals::compute(subtotal, request.discount, &self.settings.delivery);
        let now = Utc::now();
        let order = Order {
            id: format!("{}{}", self.settings.order_id_prefix, now.timestamp_millis()),
            status: OrderStatus::Processing,
            items,
            subtotal: totals.subtotal,
            discount: totals.discount,
            delivery_fee: totals.delivery_fee,
            total: totals.total,
            order_date: now,
            estimated_delivery: self
                .settings
                .delivery_window
                .and_then(|window| now.checked_add_signed(window)),
            delivery_date: None,
            address: request.address.clone(),
            payment_method: request.payment_method.clone(),
        };

        let history = self.orders();
        let mut orders = history.load();
        orders.insert(0, order.clone());
        if let Err(e) = history.try_save(&orders) {
            error!(order_id = %order.id, error = %e, "order not persisted, cart kept");
            return Err(e);
        }

        if !self.clear_cart() {
            orders.remove(0);
            return Err(match history.try_save(&orders) {
                Ok(()) => {
                    error!(order_id = %order.id, "cart could not be cleared, order withdrawn");
                    KisanError::storage("cart could not be cleared after checkout")
                }
                Err(e) => {
                    error!(order_id = %order.id, error = %e, "order kept but cart could not be cleared");
                    e
                }
            });
        }
        info!(order_id = %order.id, total = %order.total, lines = order.items.len(), "order placed");
        Ok(order)
    }

    /// Order history, most recent first.
    pub fn get_orders(&self) -> Vec<Order> {
        self.orders().load()
    }

    pub fn get_order(&self, order_id: &str) -> Option<Order> {
        self.get_orders().into_iter().find(|o| o.id == order_id)
    }

    /// Move an order along its status machine. Moving to `Delivered` stamps
    /// the delivery date.
    pub fn update_order_status(&self, order_id: &str, status: OrderStatus) -> StatusChange {
        let history = self.orders();
        let mut orders = history.load();
        let Some(order) = orders.iter_mut().find(|o| o.id == order_id) else {
            debug!(order_id, "status update for unknown order");
            return StatusChange::NotFound;
        };

        let current = order.status;
        if current == status {
            return StatusChange::Unchanged;
        }
        if !current.can_transition_to(status) {
            warn!(order_id, %current, requested = %status, "illegal order transition ignored");
            return StatusChange::Rejected {
                current,
                requested: status,
            };
        }

        order.status = status;
        if status == OrderStatus::Delivered {
            order.delivery_date = Some(Utc::now());
        }
        if history.save(&orders) {
            info!(order_id, from = %current, to = %status, "order status changed");
            StatusChange::Applied {
                from: current,
                to: status,
            }
        } else {
            StatusChange::Unchanged
        }
    }

    /// Put each line of a past order back in the cart once. Returns the number
    /// of lines added.
    pub fn reorder(&self, order_id: &str) -> Result<usize, KisanError> {
        let order = self.get_order(order_id).ok_or_else(|| KisanError::NotFound {
            entity: "order",
            id: order_id.to_string(),
        })?;
        for item in &order.items {
            self.add_to_cart(&Product::from(item))?;
        }
        Ok(order.items.len())
    }
}
