// SPDX-FileCopyrightText: 2026 KisanMitra Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Input shapes accepted by the repositories.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use kisanmitra_core::Transport;

/// Phone login or signup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub phone: String,
    pub name: String,
    pub location: String,
    pub state: String,
}

/// Profile fields a user may edit. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub location: Option<String>,
    pub state: Option<String>,
    pub avatar: Option<String>,
}

impl ProfileUpdate {
    /// Names of the fields this update touches.
    pub fn changed_fields(&self) -> Vec<&'static str> {
        [
            ("name", self.name.is_some()),
            ("location", self.location.is_some()),
            ("state", self.state.is_some()),
            ("avatar", self.avatar.is_some()),
        ]
        .into_iter()
        .filter_map(|(field, set)| set.then_some(field))
        .collect()
    }
}

/// A listing as entered on the sell form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewListing {
    pub crop: String,
    pub quantity: String,
    pub price_per_kg: Decimal,
    pub market: String,
    pub transport: Transport,
    pub total_price: Decimal,
    pub posted_date: String,
}

/// Result of one plant-disease analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewDiagnosis {
    pub crop_name: String,
    pub diagnosis: String,
    /// Raw model confidence; clamped to 0..=100 on save.
    pub confidence: i64,
    pub treatment: String,
}

/// An advisory article the user chose to keep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAdvisory {
    pub title: String,
    pub content: String,
    pub category: String,
}
