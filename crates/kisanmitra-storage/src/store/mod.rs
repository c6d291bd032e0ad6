// SPDX-FileCopyrightText: 2026 KisanMitra Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Key-value store backends.

pub mod memory;
pub mod sqlite;

use std::sync::Arc;

use kisanmitra_config::{StorageBackend, StorageConfig};
use kisanmitra_core::{KeyValueStore, KisanError};

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Open the backend selected in configuration.
pub fn open_store(config: &StorageConfig) -> Result<Arc<dyn KeyValueStore>, KisanError> {
    let store: Arc<dyn KeyValueStore> = match config.backend {
        StorageBackend::Sqlite => Arc::new(SqliteStore::open(&config.database_path)?),
        StorageBackend::Memory => Arc::new(MemoryStore::new()),
    };
    tracing::info!(backend = store.name(), "key-value store ready");
    Ok(store)
}
