// SPDX-FileCopyrightText: 2026 KisanMitra Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-user statistics recomputed from the repositories on every call.
//!
//! Nothing is cached or persisted. Any failure while folding the records
//! yields [`UserStats::fallback`] instead of an error.

use chrono::{DateTime, Duration, Utc};
use kisanmitra_config::KisanConfig;
use kisanmitra_core::{Diagnosis, KisanError, Listing, ListingStatus, TreatmentStatus, UserId};
use kisanmitra_storage::DataService;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::levels::{FarmerLevel, rating_for_sales};

/// Dashboard aggregate for one farmer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub total_earnings: Decimal,
    pub active_listings: u32,
    pub successful_sales: u32,
    pub total_views: u64,
    pub avg_rating: f64,
    pub diagnosis_count: u32,
    pub active_treatments: u32,
    pub advisory_saved: u32,
    pub level: FarmerLevel,
    pub joined_date: DateTime<Utc>,
}

impl UserStats {
    /// Zero-valued stats returned when computation fails.
    pub fn fallback(now: DateTime<Utc>) -> Self {
        Self {
            total_earnings: Decimal::ZERO,
            active_listings: 0,
            successful_sales: 0,
            total_views: 0,
            avg_rating: rating_for_sales(0),
            diagnosis_count: 0,
            active_treatments: 0,
            advisory_saved: 0,
            level: FarmerLevel::New,
            joined_date: now,
        }
    }
}

fn count(what: &str, n: usize) -> Result<u32, KisanError> {
    u32::try_from(n).map_err(|_| KisanError::Internal(format!("{what} count {n} overflows")))
}

/// Computes [`UserStats`] from a [`DataService`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsEngine {
    /// `None` when the window is too wide to represent; it then covers all time.
    active_window: Option<Duration>,
}

impl StatsEngine {
    /// Engine treating status-less diagnoses as active for `window_days`.
    pub fn new(window_days: i64) -> Self {
        Self {
            active_window: Duration::try_days(window_days.max(0)),
        }
    }

    pub fn from_config(config: &KisanConfig) -> Self {
        Self::new(config.stats.active_treatment_window_days)
    }

    /// A diagnosis counts as an active treatment when its status is
    /// `active`, or when it has no status and was recorded inside the window.
    pub fn is_active_treatment(&self, diagnosis: &Diagnosis, now: DateTime<Utc>) -> bool {
        match diagnosis.status {
            Some(TreatmentStatus::Active) => true,
            Some(TreatmentStatus::Completed | TreatmentStatus::Discontinued) => false,
            None => match self.active_window.and_then(|w| now.checked_sub_signed(w)) {
                Some(window_start) => diagnosis.recorded_at() > window_start,
                None => true,
            },
        }
    }

    /// Stats for `user_id` as of now.
    pub fn calculate_user_stats(&self, service: &DataService, user_id: &UserId) -> UserStats {
        self.calculate_at(service, user_id, Utc::now())
    }

    /// Stats for `user_id` as of `now`. Never fails.
    pub fn calculate_at(
        &self,
        service: &DataService,
        user_id: &UserId,
        now: DateTime<Utc>,
    ) -> UserStats {
        self.try_calculate_at(service, user_id, now).unwrap_or_else(|e| {
            warn!(user_id = %user_id, error = %e, "stats computation failed, using defaults");
            UserStats::fallback(now)
        })
    }

    /// Stats for `user_id` as of `now`, surfacing arithmetic failures.
    pub fn try_calculate_at(
        &self,
        service: &DataService,
        user_id: &UserId,
        now: DateTime<Utc>,
    ) -> Result<UserStats, KisanError> {
        let listings = service.listings(user_id);
        let diagnoses = service.diagnoses(user_id);
        let advisories = service.advisories(user_id);
        let joined_date = service
            .find_user(user_id)
            .map(|u| u.joined_date)
            .unwrap_or(now);

        let (active, sold): (Vec<&Listing>, Vec<&Listing>) = (
            listings.iter().filter(|l| l.status == ListingStatus::Active).collect(),
            listings.iter().filter(|l| l.status == ListingStatus::Sold).collect(),
        );

        let total_earnings = sold.iter().try_fold(Decimal::ZERO, |acc, l| {
            acc.checked_add(l.sold_price.unwrap_or_default())
                .ok_or_else(|| KisanError::Internal("earnings total overflowed".into()))
        })?;
        let total_views: u64 = listings.iter().map(|l| u64::from(l.views)).sum();
        let successful_sales = count("sale", sold.len())?;
        let active_treatments = diagnoses
            .iter()
            .filter(|d| self.is_active_treatment(d, now))
            .count();

        let stats = UserStats {
            total_earnings,
            active_listings: count("listing", active.len())?,
            successful_sales,
            total_views,
            avg_rating: rating_for_sales(successful_sales),
            diagnosis_count: count("diagnosis", diagnoses.len())?,
            active_treatments: count("treatment", active_treatments)?,
            advisory_saved: count("advisory", advisories.len())?,
            level: FarmerLevel::for_record(successful_sales, total_earnings),
            joined_date,
        };
        debug!(user_id = %user_id, level = %stats.level, sales = stats.successful_sales, "stats computed");
        Ok(stats)
    }
}

impl Default for StatsEngine {
    fn default() -> Self {
        Self::from_config(&KisanConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diagnosis(age_days: i64, status: Option<TreatmentStatus>, now: DateTime<Utc>) -> Diagnosis {
        let at = now - Duration::days(age_days);
        Diagnosis {
            id: "d".into(),
            user_id: UserId::new("u"),
            crop_name: "Tomato".into(),
            diagnosis: "Early Blight".into(),
            confidence: 85,
            treatment: String::new(),
            date: at,
            created_at: Some(at),
            status,
            treatment_start_date: None,
            treatment_end_date: None,
        }
    }

    #[test]
    fn implicit_window_applies_only_without_status() {
        let engine = StatsEngine::default();
        let now = Utc::now();
        assert!(engine.is_active_treatment(&diagnosis(10, None, now), now));
        assert!(!engine.is_active_treatment(&diagnosis(40, None, now), now));
        assert!(!engine.is_active_treatment(&diagnosis(30, None, now), now));
        assert!(!engine.is_active_treatment(
            &diagnosis(1, Some(TreatmentStatus::Completed), now),
            now
        ));
        assert!(!engine.is_active_treatment(
            &diagnosis(1, Some(TreatmentStatus::Discontinued), now),
            now
        ));
        assert!(engine.is_active_treatment(
            &diagnosis(400, Some(TreatmentStatus::Active), now),
            now
        ));
    }

    #[test]
    fn window_is_configurable() {
        let engine = StatsEngine::new(7);
        let now = Utc::now();
        assert!(!engine.is_active_treatment(&diagnosis(10, None, now), now));
        assert!(engine.is_active_treatment(&diagnosis(6, None, now), now));
    }

    #[test]
    fn oversized_window_covers_all_time() {
        let now = Utc::now();
        for days in [i64::MAX, i64::MAX / 86_400, 4_000_000_000] {
            let engine = StatsEngine::new(days);
            assert!(engine.is_active_treatment(&diagnosis(1, None, now), now));
            assert!(engine.is_active_treatment(&diagnosis(3_650, None, now), now));
            assert!(!engine.is_active_treatment(
                &diagnosis(1, Some(TreatmentStatus::Completed), now),
                now
            ));
        }
    }

    #[test]
    fn negative_window_counts_nothing_implicitly() {
        let engine = StatsEngine::new(-5);
        let now = Utc::now();
        assert!(!engine.is_active_treatment(&diagnosis(0, None, now), now));
    }

    #[test]
    fn fallback_is_zero_valued() {
        let now = Utc::now();
        let stats = UserStats::fallback(now);
        assert_eq!(stats.level, FarmerLevel::New);
        assert_eq!(stats.avg_rating, 4.0);
        assert_eq!(stats.total_earnings, Decimal::ZERO);
        assert_eq!(stats.joined_date, now);
    }
}
