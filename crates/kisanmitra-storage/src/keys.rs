// SPDX-FileCopyrightText: 2026 KisanMitra Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persisted key layout.

use kisanmitra_config::StorageConfig;
use kisanmitra_core::UserId;

/// Per-user collection kinds stored under `{prefix}{kind}_{user_id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionKind {
    Listings,
    Diagnoses,
    Advisories,
    Activities,
}

impl CollectionKind {
    pub const ALL: [CollectionKind; 4] = [
        CollectionKind::Listings,
        CollectionKind::Diagnoses,
        CollectionKind::Advisories,
        CollectionKind::Activities,
    ];

    fn segment(self) -> &'static str {
        match self {
            CollectionKind::Listings => "listings",
            CollectionKind::Diagnoses => "diagnoses",
            CollectionKind::Advisories => "advisories",
            CollectionKind::Activities => "activities",
        }
    }
}

/// Builds every key the data layer reads or writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    prefix: String,
    cart: String,
    orders: String,
}

impl StorageKeys {
    pub fn new(
        prefix: impl Into<String>,
        cart: impl Into<String>,
        orders: impl Into<String>,
    ) -> Self {
        Self {
            prefix: prefix.into(),
            cart: cart.into(),
            orders: orders.into(),
        }
    }

    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(
            config.key_prefix.clone(),
            config.cart_key.clone(),
            config.orders_key.clone(),
        )
    }

    pub fn collection(&self, kind: CollectionKind, user: &UserId) -> String {
        format!("{}{}_{}", self.prefix, kind.segment(), user)
    }

    pub fn listings(&self, user: &UserId) -> String {
        self.collection(CollectionKind::Listings, user)
    }

    pub fn diagnoses(&self, user: &UserId) -> String {
        self.collection(CollectionKind::Diagnoses, user)
    }

    pub fn advisories(&self, user: &UserId) -> String {
        self.collection(CollectionKind::Advisories, user)
    }

    pub fn activities(&self, user: &UserId) -> String {
        self.collection(CollectionKind::Activities, user)
    }

    /// Registry of every user who has logged in on this device.
    pub fn users(&self) -> String {
        format!("{}users", self.prefix)
    }

    /// Record of the logged-in user.
    pub fn current_user(&self) -> String {
        format!("{}user", self.prefix)
    }

    /// Raw id of the logged-in user.
    pub fn current_user_id(&self) -> String {
        format!("{}user_id", self.prefix)
    }

    pub fn cart(&self) -> &str {
        &self.cart
    }

    pub fn orders(&self) -> &str {
        &self.orders
    }
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self::from_config(&StorageConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout() {
        let keys = StorageKeys::default();
        let user = UserId::new("42");
        assert_eq!(keys.listings(&user), "kisanmitra_listings_42");
        assert_eq!(keys.diagnoses(&user), "kisanmitra_diagnoses_42");
        assert_eq!(keys.advisories(&user), "kisanmitra_advisories_42");
        assert_eq!(keys.activities(&user), "kisanmitra_activities_42");
        assert_eq!(keys.users(), "kisanmitra_users");
        assert_eq!(keys.current_user(), "kisanmitra_user");
        assert_eq!(keys.current_user_id(), "kisanmitra_user_id");
        assert_eq!(keys.cart(), "hariyali_mitra_cart");
        assert_eq!(keys.orders(), "hariyali_mitra_orders");
    }

    #[test]
    fn custom_prefix() {
        let keys = StorageKeys::new("t_", "c", "o");
        assert_eq!(keys.listings(&UserId::new("u")), "t_listings_u");
        assert_eq!(keys.users(), "t_users");
    }
}
