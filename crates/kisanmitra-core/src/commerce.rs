// SPDX-FileCopyrightText: 2026 KisanMitra Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shop catalogue, cart line and order types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::KisanError;

fn default_in_stock() -> bool {
    true
}

/// A shop product as offered to the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub brand: String,
    pub price: Decimal,
    /// Pre-discount reference price. `None` means no discount.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<Decimal>,
    #[serde(default)]
    pub size: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
}

impl Product {
    /// Minimal product with the given id, name and price; other fields defaulted.
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: Decimal) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            brand: String::new(),
            price,
            original_price: None,
            size: String::new(),
            category: String::new(),
            features: Vec::new(),
            in_stock: true,
        }
    }

    pub fn with_original_price(mut self, original: Decimal) -> Self {
        self.original_price = Some(original);
        self
    }

    /// Reject products that cannot become a cart line.
    pub fn validate(&self) -> Result<(), KisanError> {
        if self.id.trim().is_empty() {
            return Err(KisanError::Validation("product id must not be empty".into()));
        }
        if self.price.is_sign_negative() && !self.price.is_zero() {
            return Err(KisanError::Validation(format!(
                "product {} has negative price {}",
                self.id, self.price
            )));
        }
        if let Some(original) = self.original_price {
            if original.is_sign_negative() && !original.is_zero() {
                return Err(KisanError::Validation(format!(
                    "product {} has negative original price {}",
                    self.id, original
                )));
            }
        }
        Ok(())
    }
}

/// One line in the cart. `id` is the product id and is unique within a cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub brand: String,
    pub price: Decimal,
    pub original_price: Decimal,
    pub quantity: u32,
    #[serde(default)]
    pub size: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
}

impl CartItem {
    /// Snapshot a product into a new line with quantity 1.
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            brand: product.brand.clone(),
            price: product.price,
            original_price: product.original_price.unwrap_or(product.price),
            quantity: 1,
            size: product.size.clone(),
            category: product.category.clone(),
            features: product.features.clone(),
            in_stock: product.in_stock,
        }
    }

    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }

    pub fn line_savings(&self) -> Decimal {
        (self.original_price - self.price) * Decimal::from(self.quantity)
    }
}

impl From<&CartItem> for Product {
    fn from(item: &CartItem) -> Self {
        Self {
            id: item.id.clone(),
            name: item.name.clone(),
            brand: item.brand.clone(),
            price: item.price,
            original_price: Some(item.original_price),
            size: item.size.clone(),
            category: item.category.clone(),
            features: item.features.clone(),
            in_stock: item.in_stock,
        }
    }
}

/// Order fulfilment state.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum OrderStatus {
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// Whether an order may move from `self` to `next`.
    ///
    /// Same-status moves are not transitions and return `false`.
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (self, next),
            (Processing, Shipped)
                | (Processing, Delivered)
                | (Shipped, Delivered)
                | (Processing, Cancelled)
                | (Shipped, Cancelled)
        )
    }
}

/// A placed order. Items are a frozen copy of the cart at checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub status: OrderStatus,
    pub items: Vec<CartItem>,
    pub subtotal: Decimal,
    pub discount: Decimal,
    pub delivery_fee: Decimal,
    pub total: Decimal,
    pub order_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_delivery: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_date: Option<DateTime<Utc>>,
    pub address: String,
    pub payment_method: String,
}

/// Checkout input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub address: String,
    pub payment_method: String,
    #[serde(default)]
    pub discount: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn cart_item_from_product_defaults_original_price() {
        let p = Product::new("p1", "Neem Oil", Decimal::from(100));
        let item = CartItem::from_product(&p);
        assert_eq!(item.quantity, 1);
        assert_eq!(item.original_price, Decimal::from(100));
        assert_eq!(item.line_savings(), Decimal::ZERO);
    }

    #[test]
    fn line_totals_scale_with_quantity() {
        let p = Product::new("p1", "Urea", Decimal::from(100)).with_original_price(Decimal::from(120));
        let mut item = CartItem::from_product(&p);
        item.quantity = 3;
        assert_eq!(item.line_total(), Decimal::from(300));
        assert_eq!(item.line_savings(), Decimal::from(60));
    }

    #[test]
    fn product_validation() {
        assert!(Product::new("p1", "x", Decimal::from(5)).validate().is_ok());
        assert!(Product::new("p1", "x", Decimal::ZERO).validate().is_ok());
        assert!(matches!(
            Product::new(" ", "x", Decimal::from(5)).validate(),
            Err(KisanError::Validation(_))
        ));
        assert!(matches!(
            Product::new("p1", "x", Decimal::from(-5)).validate(),
            Err(KisanError::Validation(_))
        ));
    }

    #[test]
    fn product_json_defaults() {
        let p: Product =
            serde_json::from_str(r#"{"id":"p9","name":"Seeds","price":45.5}"#).unwrap();
        assert!(p.in_stock);
        assert!(p.features.is_empty());
        assert_eq!(p.price, Decimal::new(455, 1));
    }

    #[test]
    fn order_status_transitions() {
        use OrderStatus::*;
        assert!(Processing.can_transition_to(Shipped));
        assert!(Processing.can_transition_to(Delivered));
        assert!(Shipped.can_transition_to(Delivered));
        assert!(Shipped.can_transition_to(Cancelled));
        assert!(!Shipped.can_transition_to(Processing));
        assert!(!Processing.can_transition_to(Processing));
        for terminal in [Delivered, Cancelled] {
            assert!(terminal.is_terminal());
            for next in [Processing, Shipped, Delivered, Cancelled] {
                assert!(!terminal.can_transition_to(next));
            }
        }
    }

    #[test]
    fn order_status_parses_lowercase() {
        assert_eq!(OrderStatus::from_str("shipped").unwrap(), OrderStatus::Shipped);
        assert_eq!(OrderStatus::Cancelled.to_string(), "cancelled");
    }
}
