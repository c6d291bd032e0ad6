// SPDX-FileCopyrightText: 2026 KisanMitra Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! A key-value store that fails on demand.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use kisanmitra_core::{HealthStatus, KeyValueStore, KisanError};
use kisanmitra_storage::MemoryStore;

/// Wraps a [`MemoryStore`] and injects read or write failures.
///
/// Write failures can be global or limited to keys containing a pattern.
#[derive(Debug, Default)]
pub struct FailingStore {
    inner: MemoryStore,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    failing_key_patterns: Mutex<Vec<String>>,
    rejected_writes: AtomicUsize,
}

impl FailingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Fail writes and removals for keys containing `pattern`.
    pub fn fail_writes_matching(&self, pattern: &str) {
        if let Ok(mut patterns) = self.failing_key_patterns.lock() {
            patterns.push(pattern.to_string());
        }
    }

    pub fn clear_failures(&self) {
        self.fail_reads(false);
        self.fail_writes(false);
        if let Ok(mut patterns) = self.failing_key_patterns.lock() {
            patterns.clear();
        }
    }

    /// Store a value that is not valid JSON under `key`.
    pub fn corrupt(&self, key: &str) {
        let _ = self.inner.set(key, "{corrupted");
    }

    /// Number of writes or removals refused so far.
    pub fn rejected_writes(&self) -> usize {
        self.rejected_writes.load(Ordering::SeqCst)
    }

    /// Direct access to the wrapped store, bypassing failure injection.
    pub fn inner(&self) -> &MemoryStore {
        &self.inner
    }

    fn write_blocked(&self, key: &str) -> bool {
        let by_pattern = self
            .failing_key_patterns
            .lock()
            .map(|patterns| patterns.iter().any(|p| key.contains(p.as_str())))
            .unwrap_or(false);
        let blocked = self.fail_writes.load(Ordering::SeqCst) || by_pattern;
        if blocked {
            self.rejected_writes.fetch_add(1, Ordering::SeqCst);
        }
        blocked
    }
}

fn injected(what: &str, key: &str) -> KisanError {
    KisanError::storage(format!("injected {what} failure for `{key}`"))
}

impl KeyValueStore for FailingStore {
    fn name(&self) -> &str {
        "failing"
    }

    fn get(&self, key: &str) -> Result<Option<String>, KisanError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(injected("read", key));
        }
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), KisanError> {
        if self.write_blocked(key) {
            return Err(injected("write", key));
        }
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), KisanError> {
        if self.write_blocked(key) {
            return Err(injected("remove", key));
        }
        self.inner.remove(key)
    }

    fn health_check(&self) -> Result<HealthStatus, KisanError> {
        if self.fail_reads.load(Ordering::SeqCst) || self.fail_writes.load(Ordering::SeqCst) {
            Ok(HealthStatus::Degraded("failure injection active".into()))
        } else {
            Ok(HealthStatus::Healthy)
        }
    }
}
