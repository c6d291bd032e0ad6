// SPDX-FileCopyrightText: 2026 KisanMitra Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Farmer-owned records persisted as per-user JSON collections.
//!
//! Field names serialize in camelCase so existing device stores stay
//! readable.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::types::UserId;

/// A farmer account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub state: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub joined_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Lifecycle of a marketplace listing. Only `Active -> Sold` is a legal move.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ListingStatus {
    Active,
    Sold,
    Expired,
}

/// Whether the seller arranges transport to the market.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, Serialize, Deserialize)]
pub enum Transport {
    Yes,
    #[default]
    No,
}

/// A crop-sale offer on the marketplace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: String,
    pub user_id: UserId,
    pub crop: String,
    pub quantity: String,
    pub price_per_kg: Decimal,
    pub market: String,
    #[serde(default)]
    pub transport: Transport,
    #[serde(default)]
    pub views: u32,
    #[serde(default)]
    pub inquiries: u32,
    pub total_price: Decimal,
    pub status: ListingStatus,
    /// Free-form label shown to buyers, such as "2 days ago".
    #[serde(default)]
    pub posted_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sold_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sold_price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buyer: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Listing {
    pub fn is_active(&self) -> bool {
        self.status == ListingStatus::Active
    }

    pub fn is_sold(&self) -> bool {
        self.status == ListingStatus::Sold
    }

    /// Move an active listing to sold, recording date, price and buyer together.
    ///
    /// Returns `false` and leaves the listing untouched if it is not active.
    pub fn mark_sold(&mut self, price: Decimal, buyer: &str, at: DateTime<Utc>) -> bool {
        if !self.is_active() {
            return false;
        }
        self.status = ListingStatus::Sold;
        self.sold_date = Some(at);
        self.sold_price = Some(price);
        self.buyer = Some(buyer.to_string());
        true
    }
}

/// Treatment state recorded against a diagnosis.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TreatmentStatus {
    Active,
    Completed,
    Discontinued,
}

/// One plant-health analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnosis {
    pub id: String,
    pub user_id: UserId,
    pub crop_name: String,
    pub diagnosis: String,
    /// Model confidence, 0 to 100.
    pub confidence: u8,
    #[serde(default)]
    pub treatment: String,
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TreatmentStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub treatment_start_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub treatment_end_date: Option<DateTime<Utc>>,
}

impl Diagnosis {
    /// When the diagnosis was recorded: `createdAt`, falling back to `date`.
    pub fn recorded_at(&self) -> DateTime<Utc> {
        self.created_at.unwrap_or(self.date)
    }
}

/// A saved advisory note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvisoryRecord {
    pub id: String,
    pub user_id: UserId,
    pub title: String,
    pub content: String,
    pub category: String,
    pub saved_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// One entry in a user's activity log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserActivity {
    pub id: String,
    pub user_id: UserId,
    pub action: String,
    #[serde(default)]
    pub data: serde_json::Value,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn listing(status: ListingStatus) -> Listing {
        Listing {
            id: "l1".into(),
            user_id: UserId::new("u1"),
            crop: "Tomato".into(),
            quantity: "100 kg".into(),
            price_per_kg: Decimal::from(25),
            market: "Azadpur Mandi".into(),
            transport: Transport::Yes,
            views: 0,
            inquiries: 0,
            total_price: Decimal::from(2500),
            status,
            posted_date: "today".into(),
            sold_date: None,
            sold_price: None,
            buyer: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn mark_sold_sets_all_sale_fields() {
        let mut l = listing(ListingStatus::Active);
        let at = Utc::now();
        assert!(l.mark_sold(Decimal::from(2400), "Delhi Wholesaler", at));
        assert_eq!(l.status, ListingStatus::Sold);
        assert_eq!(l.sold_date, Some(at));
        assert_eq!(l.sold_price, Some(Decimal::from(2400)));
        assert_eq!(l.buyer.as_deref(), Some("Delhi Wholesaler"));
    }

    #[test]
    fn mark_sold_rejects_non_active() {
        for status in [ListingStatus::Sold, ListingStatus::Expired] {
            let mut l = listing(status);
            assert!(!l.mark_sold(Decimal::from(1), "x", Utc::now()));
            assert_eq!(l.status, status);
            assert!(l.sold_price.is_none());
        }
    }

    #[test]
    fn listing_uses_camel_case_fields() {
        let json = serde_json::to_value(listing(ListingStatus::Active)).unwrap();
        assert!(json.get("pricePerKg").is_some());
        assert_eq!(json["status"], "active");
        assert_eq!(json["transport"], "Yes");
        assert!(json.get("soldPrice").is_none());
    }

    #[test]
    fn diagnosis_recorded_at_falls_back_to_date() {
        let date = Utc::now() - Duration::days(3);
        let mut d = Diagnosis {
            id: "d1".into(),
            user_id: UserId::new("u1"),
            crop_name: "Tomato".into(),
            diagnosis: "Early Blight".into(),
            confidence: 85,
            treatment: String::new(),
            date,
            created_at: None,
            status: None,
            treatment_start_date: None,
            treatment_end_date: None,
        };
        assert_eq!(d.recorded_at(), date);

        let created = Utc::now();
        d.created_at = Some(created);
        assert_eq!(d.recorded_at(), created);
    }

    #[test]
    fn legacy_user_record_with_numeric_id_parses() {
        let raw = r#"{"id":1712345678901,"name":"Ramesh","phone":"9876543210",
            "location":"Nashik","state":"Maharashtra",
            "joinedDate":"2024-04-05T10:00:00Z","createdAt":"2024-04-05T10:00:00Z"}"#;
        let user: User = serde_json::from_str(raw).unwrap();
        assert_eq!(user.id.as_str(), "1712345678901");
        assert!(user.avatar.is_none());
    }
}
