// SPDX-FileCopyrightText: 2026 KisanMitra Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Demo data for a freshly logged-in farmer.

use kisanmitra_core::{KisanError, Transport};
use rust_decimal::Decimal;
use tracing::info;

use crate::database::Database;
use crate::models::{NewAdvisory, NewDiagnosis, NewListing};
use crate::queries::{advisories, diagnoses, listings, users};

/// What [`seed_sample_data`] created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedSummary {
    pub listing_ids: Vec<String>,
    pub sold_listing_id: Option<String>,
    pub diagnosis_id: String,
    pub advisory_id: String,
}

fn sample_listings() -> [NewListing; 2] {
    [
        NewListing {
            crop: "🍅 Tomato".into(),
            quantity: "100 kg".into(),
            price_per_kg: Decimal::from(25),
            market: "Azadpur Mandi".into(),
            transport: Transport::Yes,
            total_price: Decimal::from(2500),
            posted_date: "2 days ago".into(),
        },
        NewListing {
            crop: "🌾 Wheat".into(),
            quantity: "50 kg".into(),
            price_per_kg: Decimal::from(22),
            market: "Ghazipur Mandi".into(),
            transport: Transport::No,
            total_price: Decimal::from(1100),
            posted_date: "1 day ago".into(),
        },
    ]
}

/// Add two listings (the tomato one sold), one diagnosis and one advisory
/// for the logged-in user.
pub fn seed_sample_data(db: &Database) -> Result<SeedSummary, KisanError> {
    let user_id = users::current_user_id(db)
        .ok_or_else(|| KisanError::Validation("no user is logged in".into()))?;

    let mut listing_ids = Vec::new();
    let mut sold_listing_id = None;
    for input in sample_listings() {
        let is_tomato = input.crop.contains("Tomato");
        let listing = listings::create_listing(db, &user_id, input);
        if is_tomato
            && listings::mark_listing_as_sold(
                db,
                &user_id,
                &listing.id,
                Decimal::from(2500),
                "Delhi Wholesaler",
            )
        {
            sold_listing_id = Some(listing.id.clone());
        }
        listing_ids.push(listing.id);
    }

    let diagnosis = diagnoses::create_diagnosis(
        db,
        &user_id,
        NewDiagnosis {
            crop_name: "Tomato".into(),
            diagnosis: "Early Blight".into(),
            confidence: 85,
            treatment: "Apply copper fungicide spray".into(),
        },
    );

    let advisory = advisories::save_advisory(
        db,
        &user_id,
        NewAdvisory {
            title: "Optimal Irrigation for Tomatoes".into(),
            content: "Water tomatoes deeply but less frequently to encourage deep root growth."
                .into(),
            category: "Irrigation".into(),
        },
    );

    info!(user_id = %user_id, "sample data seeded");
    Ok(SeedSummary {
        listing_ids,
        sold_listing_id,
        diagnosis_id: diagnosis.id,
        advisory_id: advisory.id,
    })
}
