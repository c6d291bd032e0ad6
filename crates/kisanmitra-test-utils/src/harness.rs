// SPDX-FileCopyrightText: 2026 KisanMitra Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness wiring a store, the data service and the cart from one config.

use std::sync::Arc;

use kisanmitra_cart::CartManager;
use kisanmitra_config::{KisanConfig, StorageBackend};
use kisanmitra_core::{KeyValueStore, KisanError};
use kisanmitra_storage::{DataService, Database, MemoryStore, SqliteStore};

use crate::failing_store::FailingStore;

/// A complete data layer over a throwaway store.
pub struct TestHarness {
    pub config: KisanConfig,
    pub store: Arc<dyn KeyValueStore>,
    pub service: DataService,
    pub cart: CartManager,
    _temp_dir: Option<tempfile::TempDir>,
}

impl TestHarness {
    /// In-memory store with default configuration.
    pub fn new() -> Self {
        Self::with_config(KisanConfig::default())
    }

    /// In-memory store with a custom configuration.
    pub fn with_config(mut config: KisanConfig) -> Self {
        config.storage.backend = StorageBackend::Memory;
        Self::assemble(config, Arc::new(MemoryStore::new()), None)
    }

    /// Any store, default configuration.
    pub fn with_store(store: Arc<dyn KeyValueStore>) -> Self {
        Self::assemble(KisanConfig::default(), store, None)
    }

    /// Failure-injecting store, returned alongside the harness for control.
    pub fn failing() -> (Self, Arc<FailingStore>) {
        let failing = Arc::new(FailingStore::new());
        let store: Arc<dyn KeyValueStore> = failing.clone();
        (Self::with_store(store), failing)
    }

    /// SQLite store in a temporary directory removed on drop.
    pub fn sqlite() -> Result<Self, KisanError> {
        let temp_dir = tempfile::TempDir::new().map_err(KisanError::storage)?;
        let path = temp_dir.path().join("kisanmitra-test.db");
        let mut config = KisanConfig::default();
        config.storage.backend = StorageBackend::Sqlite;
        config.storage.database_path = path.to_string_lossy().into_owned();
        let store = Arc::new(SqliteStore::open(&path)?);
        Ok(Self::assemble(config, store, Some(temp_dir)))
    }

    fn assemble(
        config: KisanConfig,
        store: Arc<dyn KeyValueStore>,
        temp_dir: Option<tempfile::TempDir>,
    ) -> Self {
        let service = DataService::new(Database::with_config(Arc::clone(&store), &config));
        let cart = CartManager::with_config(Arc::clone(&store), &config);
        tracing::debug!(backend = store.name(), "test harness assembled");
        Self {
            config,
            store,
            service,
            cart,
            _temp_dir: temp_dir,
        }
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
