// SPDX-FileCopyrightText: 2026 KisanMitra Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Key-value store trait for persistent string storage.

use crate::error::KisanError;
use crate::types::HealthStatus;

/// A synchronous, string-keyed, string-valued persistent store.
///
/// Implementations provide no transactions. Callers follow a
/// read-whole-value, mutate, write-whole-value discipline and assume a
/// single writer.
pub trait KeyValueStore: Send + Sync {
    /// Short backend name used in logs and diagnostics.
    fn name(&self) -> &str;

    /// Read the value stored under `key`, or `None` if absent.
    fn get(&self, key: &str) -> Result<Option<String>, KisanError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), KisanError>;

    /// Remove `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), KisanError>;

    /// Report whether the backend is usable.
    fn health_check(&self) -> Result<HealthStatus, KisanError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for std::sync::Arc<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn get(&self, key: &str) -> Result<Option<String>, KisanError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), KisanError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), KisanError> {
        (**self).remove(key)
    }

    fn health_check(&self) -> Result<HealthStatus, KisanError> {
        (**self).health_check()
    }
}
