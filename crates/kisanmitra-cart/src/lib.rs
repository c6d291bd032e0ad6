// SPDX-FileCopyrightText: 2026 KisanMitra Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Cart, checkout and order history for the KisanMitra shop.
//!
//! [`CartManager`] is constructed once per process around a shared
//! [`KeyValueStore`](kisanmitra_core::KeyValueStore) and handed to callers.
//! Cart changes are published on a watch channel; see [`CartManager::subscribe`].

pub mod cart;
pub mod notify;
pub mod order;
pub mod pricing;

pub use cart::{CartManager, CartSettings};
pub use notify::{CartNotifier, CartSnapshot};
pub use order::StatusChange;
pub use pricing::{DeliveryPolicy, OrderTotals};
