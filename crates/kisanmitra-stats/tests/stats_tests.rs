// SPDX-FileCopyrightText: 2026 KisanMitra Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end statistics over a populated data service.

use chrono::{Duration, Utc};
use kisanmitra_core::{TreatmentStatus, UserId};
use kisanmitra_stats::{FarmerLevel, StatsEngine, TreatmentPlan, TreatmentStep, UserStats};
use kisanmitra_storage::NewAdvisory;
use kisanmitra_test_utils::{TestHarness, fixtures};
use rust_decimal::Decimal;
use tracing_test::traced_test;

fn farmer(h: &TestHarness) -> UserId {
    h.service
        .login_or_create(&fixtures::login("9800000001"))
        .expect("login")
        .id
}

#[test]
fn empty_user_gets_new_farmer_defaults() {
    let h = TestHarness::new();
    let user = farmer(&h);
    let stats = StatsEngine::default().calculate_user_stats(&h.service, &user);

    assert_eq!(stats.total_earnings, Decimal::ZERO);
    assert_eq!(stats.active_listings, 0);
    assert_eq!(stats.successful_sales, 0);
    assert_eq!(stats.level, FarmerLevel::New);
    assert_eq!(stats.avg_rating, 4.0);
    assert_eq!(
        stats.joined_date,
        h.service.find_user(&user).expect("user").joined_date
    );
}

#[test]
fn unknown_user_joined_date_is_now() {
    let h = TestHarness::new();
    let now = Utc::now();
    let stats = StatsEngine::default().calculate_at(&h.service, &UserId::new("ghost"), now);
    assert_eq!(stats, UserStats::fallback(now));
}

#[test]
fn sales_drive_earnings_level_and_rating() {
    let h = TestHarness::new();
    let user = farmer(&h);
    for _ in 0..6 {
        assert!(h.service.add_listing(&fixtures::sold_listing(&user, 2_000)));
    }
    let mut viewed = fixtures::listing(&user, 500);
    viewed.views = 7;
    assert!(h.service.add_listing(&viewed));

    let stats = StatsEngine::default().calculate_user_stats(&h.service, &user);
    assert_eq!(stats.successful_sales, 6);
    assert_eq!(stats.active_listings, 1);
    assert_eq!(stats.total_earnings, Decimal::from(12_000));
    assert_eq!(stats.total_views, 7);
    assert_eq!(stats.level, FarmerLevel::Experienced);
    assert_eq!(stats.avg_rating, 4.5);
}

#[test]
fn sales_without_earnings_stay_active_tier() {
    let h = TestHarness::new();
    let user = farmer(&h);
    for _ in 0..25 {
        h.service.add_listing(&fixtures::sold_listing(&user, 100));
    }
    let stats = StatsEngine::default().calculate_user_stats(&h.service, &user);
    assert_eq!(stats.successful_sales, 25);
    assert_eq!(stats.total_earnings, Decimal::from(2_500));
    assert_eq!(stats.level, FarmerLevel::Active);
    assert_eq!(stats.avg_rating, 4.8);
}

#[test]
fn marking_sold_moves_listing_between_counts() {
    let h = TestHarness::new();
    let user = farmer(&h);
    let listing = fixtures::listing(&user, 1_200);
    h.service.add_listing(&listing);

    let engine = StatsEngine::default();
    assert_eq!(engine.calculate_user_stats(&h.service, &user).active_listings, 1);

    assert!(h.service.mark_listing_as_sold(
        &user,
        &listing.id,
        Decimal::from(1_100),
        "Mandi Trader"
    ));
    let stats = engine.calculate_user_stats(&h.service, &user);
    assert_eq!(stats.active_listings, 0);
    assert_eq!(stats.successful_sales, 1);
    assert_eq!(stats.total_earnings, Decimal::from(1_100));
    assert_eq!(stats.level, FarmerLevel::Active);
}

#[test]
fn active_treatments_follow_status_and_window() {
    let h = TestHarness::new();
    let user = farmer(&h);
    h.service.add_diagnosis(&fixtures::diagnosis_aged(&user, Duration::days(10), None));
    h.service.add_diagnosis(&fixtures::diagnosis_aged(&user, Duration::days(40), None));
    h.service.add_diagnosis(&fixtures::diagnosis_aged(
        &user,
        Duration::days(2),
        Some(TreatmentStatus::Completed),
    ));
    h.service.add_diagnosis(&fixtures::diagnosis_aged(
        &user,
        Duration::days(90),
        Some(TreatmentStatus::Active),
    ));

    let stats = StatsEngine::default().calculate_user_stats(&h.service, &user);
    assert_eq!(stats.diagnosis_count, 4);
    assert_eq!(stats.active_treatments, 2);
}

#[test]
fn unbounded_window_from_config_counts_every_open_diagnosis() {
    let h = TestHarness::new();
    let user = farmer(&h);
    h.service.add_diagnosis(&fixtures::diagnosis_aged(&user, Duration::days(1), None));
    h.service.add_diagnosis(&fixtures::diagnosis_aged(&user, Duration::days(4_000), None));

    let mut config = h.config.clone();
    config.stats.active_treatment_window_days = i64::MAX;
    let stats = StatsEngine::from_config(&config).calculate_user_stats(&h.service, &user);
    assert_eq!(stats.diagnosis_count, 2);
    assert_eq!(stats.active_treatments, 2);
}

#[test]
fn advisories_are_counted() {
    let h = TestHarness::new();
    let user = farmer(&h);
    for title in ["Tomato irrigation", "Wheat sowing window"] {
        h.service.save_advisory(
            &user,
            NewAdvisory {
                title: title.into(),
                content: "Irrigate in the morning".into(),
                category: "crop-care".into(),
            },
        );
    }
    let stats = StatsEngine::default().calculate_user_stats(&h.service, &user);
    assert_eq!(stats.advisory_saved, 2);
}

#[test]
fn computing_stats_writes_nothing() {
    let h = TestHarness::new();
    let user = farmer(&h);
    h.service.add_listing(&fixtures::sold_listing(&user, 900));
    let activities_before = h.service.user_activities(&user);
    let listings_before = h.service.listings(&user);

    let engine = StatsEngine::default();
    let now = Utc::now();
    let first = engine.calculate_at(&h.service, &user, now);
    let second = engine.calculate_at(&h.service, &user, now);

    assert_eq!(first, second);
    assert_eq!(h.service.user_activities(&user), activities_before);
    assert_eq!(h.service.listings(&user), listings_before);
}

#[test]
#[traced_test]
fn unreadable_store_yields_zeroed_stats() {
    let (h, failing) = TestHarness::failing();
    let user = farmer(&h);
    h.service.add_listing(&fixtures::sold_listing(&user, 5_000));

    failing.fail_reads(true);
    let now = Utc::now();
    let stats = StatsEngine::default().calculate_at(&h.service, &user, now);

    assert_eq!(stats, UserStats::fallback(now));
    assert!(logs_contain("unreadable collection treated as empty"));
}

#[test]
fn stats_serialize_with_dashboard_field_names() {
    let stats = UserStats::fallback(Utc::now());
    let json = serde_json::to_value(&stats).expect("serialize");
    assert!(json.get("totalEarnings").is_some());
    assert!(json.get("activeTreatments").is_some());
    assert_eq!(json["level"], "New Farmer");
}

#[test]
fn completed_plan_marks_linked_diagnosis() {
    let h = TestHarness::new();
    let user = farmer(&h);
    let diagnosis =
        fixtures::diagnosis_aged(&user, Duration::days(1), Some(TreatmentStatus::Active));
    h.service.add_diagnosis(&diagnosis);

    let steps = vec![
        TreatmentStep::new(1, "Remove affected leaves", "Prune and burn infected foliage"),
        TreatmentStep::new(2, "Spray fungicide", "Copper oxychloride every 7 days"),
    ];
    let mut plan = TreatmentPlan::new("plan-1", "Early Blight", steps, Utc::now())
        .for_diagnosis(diagnosis.id.clone());
    assert!(!plan.sync_to_diagnosis(&h.service, &user));

    let now = Utc::now();
    plan.complete_step(0, now);
    plan.complete_step(1, now);
    assert!(plan.is_completed());
    assert!(plan.sync_to_diagnosis(&h.service, &user));

    let stored = h.service.diagnoses(&user);
    assert_eq!(stored[0].status, Some(TreatmentStatus::Completed));
    assert!(stored[0].treatment_end_date.is_some());
    let stats = StatsEngine::default().calculate_user_stats(&h.service, &user);
    assert_eq!(stats.active_treatments, 0);
}
