// SPDX-FileCopyrightText: 2026 KisanMitra Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait seams implemented by KisanMitra backends.

pub mod store;

pub use store::KeyValueStore;
