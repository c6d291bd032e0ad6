// SPDX-FileCopyrightText: 2026 KisanMitra Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Derived figures for the KisanMitra dashboard.
//!
//! This crate provides:
//! - **Statistics engine**: earnings, sales, views, level and rating for one farmer
//! - **Soil health**: a six-point score from a pH reading and two visual checks
//! - **Treatment plans**: step completion and progress for diagnosed diseases

pub mod engine;
pub mod levels;
pub mod soil;
pub mod treatment;

pub use engine::{StatsEngine, UserStats};
pub use levels::{FarmerLevel, rating_for_sales};
pub use soil::{Moisture, OrganicMatter, SoilAssessment, SoilHealth, SoilReading};
pub use treatment::{PlanStatus, TreatmentPlan, TreatmentStep, TreatmentSummary, summarize};
