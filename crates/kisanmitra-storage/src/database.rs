// SPDX-FileCopyrightText: 2026 KisanMitra Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared handle passed to every query module.

use std::sync::Arc;

use kisanmitra_config::KisanConfig;
use kisanmitra_core::{KeyValueStore, KisanError};

use crate::keys::StorageKeys;
use crate::store::open_store;

/// A key-value store plus the key layout and limits the repositories need.
///
/// Cheap to clone; clones share the underlying store.
#[derive(Clone)]
pub struct Database {
    store: Arc<dyn KeyValueStore>,
    keys: StorageKeys,
    activity_cap: usize,
}

impl Database {
    pub fn new(store: Arc<dyn KeyValueStore>, keys: StorageKeys, activity_cap: usize) -> Self {
        Self {
            store,
            keys,
            activity_cap: activity_cap.max(1),
        }
    }

    /// Wrap an existing store using the key layout and limits from `config`.
    pub fn with_config(store: Arc<dyn KeyValueStore>, config: &KisanConfig) -> Self {
        Self::new(
            store,
            StorageKeys::from_config(&config.storage),
            config.activity.max_entries,
        )
    }

    /// Open the configured backend.
    pub fn open(config: &KisanConfig) -> Result<Self, KisanError> {
        Ok(Self::with_config(open_store(&config.storage)?, config))
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    pub fn shared_store(&self) -> Arc<dyn KeyValueStore> {
        Arc::clone(&self.store)
    }

    pub fn keys(&self) -> &StorageKeys {
        &self.keys
    }

    pub fn activity_cap(&self) -> usize {
        self.activity_cap
    }
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database")
            .field("store", &self.store.name())
            .field("keys", &self.keys)
            .field("activity_cap", &self.activity_cap)
            .finish()
    }
}
