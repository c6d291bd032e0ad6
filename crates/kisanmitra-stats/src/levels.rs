// SPDX-FileCopyrightText: 2026 KisanMitra Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Farmer level tiers and the sales-based rating heuristic.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Experience tier derived from sales history.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, Serialize, Deserialize,
)]
pub enum FarmerLevel {
    #[default]
    #[strum(serialize = "New Farmer")]
    #[serde(rename = "New Farmer")]
    New,
    #[strum(serialize = "Active Farmer")]
    #[serde(rename = "Active Farmer")]
    Active,
    #[strum(serialize = "Experienced Farmer")]
    #[serde(rename = "Experienced Farmer")]
    Experienced,
    #[strum(serialize = "Advanced Farmer")]
    #[serde(rename = "Advanced Farmer")]
    Advanced,
    #[strum(serialize = "Expert Farmer")]
    #[serde(rename = "Expert Farmer")]
    Expert,
}

/// (level, minimum sales, minimum earnings), checked top to bottom.
const TIERS: [(FarmerLevel, u32, i64); 4] = [
    (FarmerLevel::Expert, 50, 100_000),
    (FarmerLevel::Advanced, 20, 50_000),
    (FarmerLevel::Experienced, 5, 10_000),
    (FarmerLevel::Active, 1, 0),
];

impl FarmerLevel {
    /// First tier whose sales and earnings floors are both met.
    pub fn for_record(successful_sales: u32, total_earnings: Decimal) -> Self {
        TIERS
            .iter()
            .find(|(_, min_sales, min_earnings)| {
                successful_sales >= *min_sales && total_earnings >= Decimal::from(*min_earnings)
            })
            .map(|(level, _, _)| *level)
            .unwrap_or_default()
    }
}

/// Displayed rating: a step function of completed sales.
pub fn rating_for_sales(successful_sales: u32) -> f64 {
    match successful_sales {
        s if s > 10 => 4.8,
        s if s > 5 => 4.5,
        s if s > 0 => 4.2,
        _ => 4.0,
    }
}
