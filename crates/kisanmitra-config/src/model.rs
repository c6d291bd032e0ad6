// SPDX-FileCopyrightText: 2026 KisanMitra Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for KisanMitra.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Top-level KisanMitra configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to the values the mobile app ships with.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct KisanConfig {
    /// Storage backend and key layout.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Activity log settings.
    #[serde(default)]
    pub activity: ActivityConfig,

    /// Statistics engine settings.
    #[serde(default)]
    pub stats: StatsConfig,

    /// Cart and checkout settings.
    #[serde(default)]
    pub cart: CartConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Which key-value backend to open.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, Deserialize, Serialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum StorageBackend {
    /// Single-file SQLite key-value table.
    #[default]
    Sqlite,
    /// Process-local map, lost on exit.
    Memory,
}

/// Storage configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Backend to open.
    #[serde(default)]
    pub backend: StorageBackend,

    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Namespace prepended to per-user collection keys and session keys.
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,

    /// Key holding the cart line items.
    #[serde(default = "default_cart_key")]
    pub cart_key: String,

    /// Key holding the order history.
    #[serde(default = "default_orders_key")]
    pub orders_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            database_path: default_database_path(),
            key_prefix: default_key_prefix(),
            cart_key: default_cart_key(),
            orders_key: default_orders_key(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("kisanmitra").join("kisanmitra.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("kisanmitra.db"))
        .to_string_lossy()
        .into_owned()
}

fn default_key_prefix() -> String {
    "kisanmitra_".to_string()
}

fn default_cart_key() -> String {
    "hariyali_mitra_cart".to_string()
}

fn default_orders_key() -> String {
    "hariyali_mitra_orders".to_string()
}

/// Activity log configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ActivityConfig {
    /// Most-recent entries kept per user.
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
}

impl Default for ActivityConfig {
    fn default() -> Self {
        Self {
            max_entries: default_max_entries(),
        }
    }
}

fn default_max_entries() -> usize {
    100
}

/// Statistics engine configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StatsConfig {
    /// Diagnoses without a status count as active treatments for this many days.
    #[serde(default = "default_active_treatment_window_days")]
    pub active_treatment_window_days: i64,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            active_treatment_window_days: default_active_treatment_window_days(),
        }
    }
}

fn default_active_treatment_window_days() -> i64 {
    30
}

/// Cart and checkout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CartConfig {
    /// Subtotal at or above which delivery is free.
    #[serde(default = "default_free_delivery_threshold")]
    pub free_delivery_threshold: Decimal,

    /// Flat delivery fee charged below the threshold.
    #[serde(default = "default_delivery_fee")]
    pub delivery_fee: Decimal,

    /// Prefix of generated order ids.
    #[serde(default = "default_order_id_prefix")]
    pub order_id_prefix: String,

    /// Hours between checkout and estimated delivery.
    #[serde(default = "default_delivery_window_hours")]
    pub delivery_window_hours: i64,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            free_delivery_threshold: default_free_delivery_threshold(),
            delivery_fee: default_delivery_fee(),
            order_id_prefix: default_order_id_prefix(),
            delivery_window_hours: default_delivery_window_hours(),
        }
    }
}

fn default_free_delivery_threshold() -> Decimal {
    Decimal::from(500)
}

fn default_delivery_fee() -> Decimal {
    Decimal::from(40)
}

fn default_order_id_prefix() -> String {
    "ORD".to_string()
}

fn default_delivery_window_hours() -> i64 {
    24
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
