// SPDX-FileCopyrightText: 2026 KisanMitra Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the KisanMitra data layer.
//!
//! This crate provides the error type, the persisted domain records, and the
//! [`KeyValueStore`] trait every storage backend implements.

pub mod commerce;
pub mod error;
pub mod records;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use commerce::{CartItem, CheckoutRequest, Order, OrderStatus, Product};
pub use error::KisanError;
pub use records::{
    AdvisoryRecord, Diagnosis, Listing, ListingStatus, Transport, TreatmentStatus, User,
    UserActivity,
};
pub use traits::KeyValueStore;
pub use types::{HealthStatus, UserId, new_record_id};
