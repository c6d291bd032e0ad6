// SPDX-FileCopyrightText: 2026 KisanMitra Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! JSON arrays stored under a single key.
//!
//! Every mutation reads the whole array, changes it in memory and writes the
//! whole array back. Reads never fail: a missing key, a backend error or a
//! value that does not parse all yield an empty list. Write failures are
//! logged and reported as `false`.

use std::marker::PhantomData;

use kisanmitra_core::{KeyValueStore, KisanError};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

/// A typed view of the JSON array stored at `key`.
pub struct JsonCollection<'a, T> {
    store: &'a dyn KeyValueStore,
    key: String,
    _marker: PhantomData<fn() -> T>,
}

impl<'a, T> JsonCollection<'a, T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(store: &'a dyn KeyValueStore, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            _marker: PhantomData,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read the array, propagating backend and parse errors.
    pub fn try_load(&self) -> Result<Vec<T>, KisanError> {
        match self.store.get(&self.key)? {
            None => Ok(Vec::new()),
            Some(raw) => Ok(serde_json::from_str(&raw)?),
        }
    }

    /// Read the array, treating any failure as empty.
    pub fn load(&self) -> Vec<T> {
        self.try_load().unwrap_or_else(|e| {
            warn!(key = %self.key, error = %e, "unreadable collection treated as empty");
            Vec::new()
        })
    }

    /// Replace the stored array, propagating errors.
    pub fn try_save(&self, items: &[T]) -> Result<(), KisanError> {
        let raw = serde_json::to_string(items)?;
        self.store.set(&self.key, &raw)?;
        debug!(key = %self.key, len = items.len(), "collection written");
        Ok(())
    }

    /// Replace the stored array. Returns whether the write succeeded.
    pub fn save(&self, items: &[T]) -> bool {
        match self.try_save(items) {
            Ok(()) => true,
            Err(e) => {
                warn!(key = %self.key, error = %e, "collection write dropped");
                false
            }
        }
    }

    /// Append one item to the end.
    pub fn append(&self, item: T) -> bool {
        let mut items = self.load();
        items.push(item);
        self.save(&items)
    }

    /// Insert one item at the front.
    pub fn prepend(&self, item: T) -> bool {
        let mut items = self.load();
        items.insert(0, item);
        self.save(&items)
    }

    /// Apply `mutate` to the first item matching `predicate` and write back.
    ///
    /// `mutate` returns `None` to decline the change, in which case nothing is
    /// written. The result is `Some` only when a change was persisted.
    pub fn update_first<R>(
        &self,
        predicate: impl Fn(&T) -> bool,
        mutate: impl FnOnce(&mut T) -> Option<R>,
    ) -> Option<R> {
        let mut items = self.load();
        let Some(item) = items.iter_mut().find(|item| predicate(item)) else {
            debug!(key = %self.key, "update matched nothing");
            return None;
        };
        let outcome = mutate(item)?;
        self.save(&items).then_some(outcome)
    }

    /// Remove the key entirely.
    pub fn clear(&self) -> bool {
        match self.store.remove(&self.key) {
            Ok(()) => true,
            Err(e) => {
                warn!(key = %self.key, error = %e, "collection removal dropped");
                false
            }
        }
    }
}

/// Read a single JSON value, treating any failure as absent.
pub fn load_value<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let raw = match store.get(key) {
        Ok(raw) => raw?,
        Err(e) => {
            warn!(key, error = %e, "value read failed");
            return None;
        }
    };
    serde_json::from_str(&raw)
        .map_err(|e| warn!(key, error = %e, "stored value did not parse"))
        .ok()
}

/// Write a single JSON value. Returns whether the write succeeded.
pub fn save_value<T: Serialize>(store: &dyn KeyValueStore, key: &str, value: &T) -> bool {
    let result = serde_json::to_string(value)
        .map_err(KisanError::from)
        .and_then(|raw| store.set(key, &raw));
    match result {
        Ok(()) => true,
        Err(e) => {
            warn!(key, error = %e, "value write dropped");
            false
        }
    }
}
