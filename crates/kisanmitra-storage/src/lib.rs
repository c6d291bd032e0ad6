// SPDX-FileCopyrightText: 2026 KisanMitra Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persistence layer for KisanMitra.
//!
//! Provides the in-memory and SQLite key-value backends, the persisted key
//! layout, per-user entity repositories stored as JSON arrays, and the capped
//! activity log written as a side effect of every mutation.

pub mod activity;
pub mod collection;
pub mod database;
pub mod keys;
pub mod migrations;
pub mod models;
pub mod queries;
pub mod seed;
pub mod service;
pub mod store;

pub use collection::JsonCollection;
pub use database::Database;
pub use keys::{CollectionKind, StorageKeys};
pub use models::{LoginRequest, NewAdvisory, NewDiagnosis, NewListing, ProfileUpdate};
pub use seed::SeedSummary;
pub use service::DataService;
pub use store::{MemoryStore, SqliteStore, open_store};
