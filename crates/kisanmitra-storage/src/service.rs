// SPDX-FileCopyrightText: 2026 KisanMitra Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Repository facade handed to application code.
//!
//! Constructed once per process and passed to callers. Every method delegates
//! to the query modules; none of them surface storage failures.

use kisanmitra_config::KisanConfig;
use kisanmitra_core::{
    AdvisoryRecord, Diagnosis, KisanError, Listing, TreatmentStatus, User, UserActivity, UserId,
};
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::{debug, warn};

use crate::activity;
use crate::database::Database;
use crate::keys::CollectionKind;
use crate::models::{LoginRequest, NewAdvisory, NewDiagnosis, NewListing, ProfileUpdate};
use crate::queries::{advisories, diagnoses, listings, users};
use crate::seed::{self, SeedSummary};

/// Entry point for users, listings, diagnoses, advisories and the activity log.
#[derive(Debug, Clone)]
pub struct DataService {
    db: Database,
}

impl DataService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Open the configured backend and wrap it.
    pub fn open(config: &KisanConfig) -> Result<Self, KisanError> {
        Ok(Self::new(Database::open(config)?))
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    // --- Users and session ---

    pub fn login_or_create(&self, request: &LoginRequest) -> Result<User, KisanError> {
        users::login_or_create(&self.db, request)
    }

    pub fn current_user(&self) -> Option<User> {
        users::current_user(&self.db)
    }

    pub fn current_user_id(&self) -> Option<UserId> {
        users::current_user_id(&self.db)
    }

    pub fn find_user(&self, user_id: &UserId) -> Option<User> {
        users::find_user(&self.db, user_id)
    }

    pub fn list_users(&self) -> Vec<User> {
        users::list_users(&self.db)
    }

    pub fn update_profile(&self, user_id: &UserId, update: &ProfileUpdate) -> Option<User> {
        users::update_profile(&self.db, user_id, update)
    }

    pub fn logout(&self) {
        users::logout(&self.db)
    }

    // --- Listings ---

    pub fn listings(&self, user_id: &UserId) -> Vec<Listing> {
        listings::list_listings(&self.db, user_id)
    }

    pub fn add_listing(&self, listing: &Listing) -> bool {
        listings::add_listing(&self.db, listing)
    }

    pub fn create_listing(&self, user_id: &UserId, input: NewListing) -> Listing {
        listings::create_listing(&self.db, user_id, input)
    }

    pub fn update_listing<R>(
        &self,
        user_id: &UserId,
        predicate: impl Fn(&Listing) -> bool,
        mutate: impl FnOnce(&mut Listing) -> Option<R>,
    ) -> Option<R> {
        listings::update_listing(&self.db, user_id, predicate, mutate)
    }

    pub fn mark_listing_as_sold(
        &self,
        user_id: &UserId,
        listing_id: &str,
        sold_price: Decimal,
        buyer: &str,
    ) -> bool {
        listings::mark_listing_as_sold(&self.db, user_id, listing_id, sold_price, buyer)
    }

    pub fn increment_views(&self, user_id: &UserId, listing_id: &str) -> Option<u32> {
        listings::increment_views(&self.db, user_id, listing_id)
    }

    pub fn increment_inquiries(&self, user_id: &UserId, listing_id: &str) -> Option<u32> {
        listings::increment_inquiries(&self.db, user_id, listing_id)
    }

    // --- Diagnoses ---

    pub fn diagnoses(&self, user_id: &UserId) -> Vec<Diagnosis> {
        diagnoses::list_diagnoses(&self.db, user_id)
    }

    pub fn add_diagnosis(&self, diagnosis: &Diagnosis) -> bool {
        diagnoses::add_diagnosis(&self.db, diagnosis)
    }

    pub fn create_diagnosis(&self, user_id: &UserId, input: NewDiagnosis) -> Diagnosis {
        diagnoses::create_diagnosis(&self.db, user_id, input)
    }

    pub fn set_diagnosis_status(
        &self,
        user_id: &UserId,
        diagnosis_id: &str,
        status: TreatmentStatus,
    ) -> bool {
        diagnoses::set_diagnosis_status(&self.db, user_id, diagnosis_id, status)
    }

    // --- Advisories ---

    pub fn advisories(&self, user_id: &UserId) -> Vec<AdvisoryRecord> {
        advisories::list_advisories(&self.db, user_id)
    }

    pub fn add_advisory(&self, advisory: &AdvisoryRecord) -> bool {
        advisories::add_advisory(&self.db, advisory)
    }

    pub fn save_advisory(&self, user_id: &UserId, input: NewAdvisory) -> AdvisoryRecord {
        advisories::save_advisory(&self.db, user_id, input)
    }

    // --- Activity ---

    pub fn track_activity(&self, user_id: &UserId, action: &str, data: Value) -> bool {
        activity::track(&self.db, user_id, action, data)
    }

    pub fn user_activities(&self, user_id: &UserId) -> Vec<UserActivity> {
        activity::list(&self.db, user_id)
    }

    // --- Maintenance ---

    /// Remove the user's listings, diagnoses, advisories and activity log.
    pub fn clear_user_data(&self, user_id: &UserId) {
        for kind in CollectionKind::ALL {
            let key = self.db.keys().collection(kind, user_id);
            if let Err(e) = self.db.store().remove(&key) {
                warn!(key = %key, error = %e, "user data removal dropped");
            }
        }
        debug!(user_id = %user_id, "user data cleared");
    }

    pub fn seed_sample_data(&self) -> Result<SeedSummary, KisanError> {
        seed::seed_sample_data(&self.db)
    }
}
