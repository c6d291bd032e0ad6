// SPDX-FileCopyrightText: 2026 KisanMitra Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Entity builders for tests.

use chrono::{DateTime, Duration, Utc};
use kisanmitra_core::{
    Diagnosis, Listing, ListingStatus, Product, Transport, TreatmentStatus, User, UserId,
    new_record_id,
};
use kisanmitra_storage::LoginRequest;
use rust_decimal::Decimal;

pub fn user(id: &str) -> User {
    let now = Utc::now();
    User {
        id: UserId::new(id),
        name: "Test Farmer".into(),
        phone: format!("98{id:0>8}"),
        location: "Nashik".into(),
        state: "Maharashtra".into(),
        avatar: None,
        joined_date: now,
        created_at: now,
        updated_at: None,
    }
}

pub fn login(phone: &str) -> LoginRequest {
    LoginRequest {
        phone: phone.into(),
        name: "Test Farmer".into(),
        location: "Nashik".into(),
        state: "Maharashtra".into(),
    }
}

/// An active listing worth `total` rupees.
pub fn listing(user: &UserId, total: i64) -> Listing {
    Listing {
        id: new_record_id(),
        user_id: user.clone(),
        crop: "Onion".into(),
        quantity: "10 kg".into(),
        price_per_kg: Decimal::from(total) / Decimal::from(10),
        market: "Lasalgaon".into(),
        transport: Transport::No,
        views: 0,
        inquiries: 0,
        total_price: Decimal::from(total),
        status: ListingStatus::Active,
        posted_date: "today".into(),
        sold_date: None,
        sold_price: None,
        buyer: None,
        created_at: Utc::now(),
    }
}

/// A listing already sold for `price`.
pub fn sold_listing(user: &UserId, price: i64) -> Listing {
    let mut l = listing(user, price);
    l.mark_sold(Decimal::from(price), "Test Buyer", Utc::now());
    l
}

/// A diagnosis recorded `age` ago with the given status.
pub fn diagnosis_aged(user: &UserId, age: Duration, status: Option<TreatmentStatus>) -> Diagnosis {
    let at: DateTime<Utc> = Utc::now() - age;
    Diagnosis {
        id: new_record_id(),
        user_id: user.clone(),
        crop_name: "Tomato".into(),
        diagnosis: "Early Blight".into(),
        confidence: 85,
        treatment: "Apply copper fungicide spray".into(),
        date: at,
        created_at: Some(at),
        status,
        treatment_start_date: None,
        treatment_end_date: None,
    }
}

pub fn product(id: &str, price: i64, original: i64) -> Product {
    Product::new(id, format!("Product {id}"), Decimal::from(price))
        .with_original_price(Decimal::from(original))
}
