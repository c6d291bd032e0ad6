// SPDX-FileCopyrightText: 2026 KisanMitra Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for KisanMitra integration tests.
//!
//! Provides a fault-injecting store, entity fixtures, and a [`TestHarness`]
//! that wires a store, [`DataService`](kisanmitra_storage::DataService) and
//! [`CartManager`](kisanmitra_cart::CartManager) from one configuration.

pub mod failing_store;
pub mod fixtures;
pub mod harness;

pub use failing_store::FailingStore;
pub use harness::TestHarness;
