// SPDX-FileCopyrightText: 2026 KisanMitra Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed repository operations over a [`Database`](crate::Database).

pub mod advisories;
pub mod diagnoses;
pub mod listings;
pub mod users;
