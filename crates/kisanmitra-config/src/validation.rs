// SPDX-FileCopyrightText: 2026 KisanMitra Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.

use crate::diagnostic::ConfigError;
use crate::model::{KisanConfig, StorageBackend};

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Longest active-treatment window accepted, in days (one hundred years).
pub const MAX_TREATMENT_WINDOW_DAYS: i64 = 36_500;

/// Longest delivery estimate accepted, in hours (one year).
pub const MAX_DELIVERY_WINDOW_HOURS: i64 = 8_760;

/// Validate a deserialized configuration for semantic correctness.
///
/// Collects every failure instead of stopping at the first one.
pub fn validate_config(config: &KisanConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    let mut fail = |message: String| errors.push(ConfigError::Validation { message });

    let storage = &config.storage;
    if storage.key_prefix.trim().is_empty() {
        fail("storage.key_prefix must not be empty".to_string());
    }
    if storage.cart_key.trim().is_empty() || storage.orders_key.trim().is_empty() {
        fail("storage.cart_key and storage.orders_key must not be empty".to_string());
    }
    if storage.cart_key == storage.orders_key {
        fail(format!(
            "storage.cart_key and storage.orders_key must differ, both are `{}`",
            storage.cart_key
        ));
    }
    if storage.backend == StorageBackend::Sqlite && storage.database_path.trim().is_empty() {
        fail("storage.database_path must not be empty for the sqlite backend".to_string());
    }

    if config.activity.max_entries < 1 {
        fail("activity.max_entries must be at least 1".to_string());
    }

    let window_days = config.stats.active_treatment_window_days;
    if !(1..=MAX_TREATMENT_WINDOW_DAYS).contains(&window_days) {
        fail(format!(
            "stats.active_treatment_window_days must be between 1 and {MAX_TREATMENT_WINDOW_DAYS}, got {window_days}"
        ));
    }

    let cart = &config.cart;
    if cart.delivery_fee.is_sign_negative() && !cart.delivery_fee.is_zero() {
        fail(format!(
            "cart.delivery_fee must be non-negative, got {}",
            cart.delivery_fee
        ));
    }
    if cart.free_delivery_threshold.is_sign_negative() && !cart.free_delivery_threshold.is_zero()
    {
        fail(format!(
            "cart.free_delivery_threshold must be non-negative, got {}",
            cart.free_delivery_threshold
        ));
    }
    if cart.order_id_prefix.trim().is_empty() {
        fail("cart.order_id_prefix must not be empty".to_string());
    }
    if !(0..=MAX_DELIVERY_WINDOW_HOURS).contains(&cart.delivery_window_hours) {
        fail(format!(
            "cart.delivery_window_hours must be between 0 and {MAX_DELIVERY_WINDOW_HOURS}, got {}",
            cart.delivery_window_hours
        ));
    }

    let level = config.logging.level.trim().to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        fail(format!(
            "logging.level `{}` is not one of {}",
            config.logging.level,
            LOG_LEVELS.join(", ")
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
