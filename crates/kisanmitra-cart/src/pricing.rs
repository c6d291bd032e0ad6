// SPDX-FileCopyrightText: 2026 KisanMitra Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Delivery fee and order total calculation.

use kisanmitra_config::CartConfig;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Flat delivery fee waived at or above a subtotal threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryPolicy {
    pub free_threshold: Decimal,
    pub flat_fee: Decimal,
}

impl DeliveryPolicy {
    pub fn new(free_threshold: Decimal, flat_fee: Decimal) -> Self {
        Self {
            free_threshold,
            flat_fee,
        }
    }

    pub fn from_config(config: &CartConfig) -> Self {
        Self::new(config.free_delivery_threshold, config.delivery_fee)
    }

    /// Fee charged for an order with this subtotal.
    pub fn fee_for(&self, subtotal: Decimal) -> Decimal {
        if subtotal >= self.free_threshold {
            Decimal::ZERO
        } else {
            self.flat_fee
        }
    }
}

impl Default for DeliveryPolicy {
    fn default() -> Self {
        Self::from_config(&CartConfig::default())
    }
}

/// Money breakdown of one order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderTotals {
    pub subtotal: Decimal,
    pub discount: Decimal,
    pub delivery_fee: Decimal,
    pub total: Decimal,
}

impl OrderTotals {
    /// `total = subtotal - discount + delivery_fee`, exact in decimal.
    pub fn compute(subtotal: Decimal, discount: Decimal, policy: &DeliveryPolicy) -> Self {
        let delivery_fee = policy.fee_for(subtotal);
        Self {
            subtotal,
            discount,
            delivery_fee,
            total: subtotal - discount + delivery_fee,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fee_waived_at_threshold() {
        let policy = DeliveryPolicy::default();
        assert_eq!(policy.fee_for(Decimal::from(499)), Decimal::from(40));
        assert_eq!(policy.fee_for(Decimal::from(500)), Decimal::ZERO);
        assert_eq!(policy.fee_for(Decimal::from(1200)), Decimal::ZERO);
    }

    #[test]
    fn totals_follow_the_order_law() {
        let totals = OrderTotals::compute(
            Decimal::from(200),
            Decimal::from(10),
            &DeliveryPolicy::default(),
        );
        assert_eq!(totals.delivery_fee, Decimal::from(40));
        assert_eq!(totals.total, Decimal::from(230));
    }

    #[test]
    fn fractional_amounts_are_exact() {
        let subtotal = Decimal::new(4999, 1); // 499.9
        let discount = Decimal::new(1, 1); // 0.1
        let totals = OrderTotals::compute(subtotal, discount, &DeliveryPolicy::default());
        assert_eq!(totals.total, Decimal::new(5398, 1));
        assert_eq!(
            totals.total,
            totals.subtotal - totals.discount + totals.delivery_fee
        );
    }
}
