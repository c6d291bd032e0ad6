// SPDX-FileCopyrightText: 2026 KisanMitra Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Field soil-health scoring from a pH reading and two visual checks.
//!
//! Each input scores 0 to 2 points for a total out of 6.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

pub const MAX_SCORE: u8 = 6;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum Moisture {
    Dry,
    Medium,
    Wet,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum OrganicMatter {
    Poor,
    Moderate,
    Good,
}

/// One soil check entered by the farmer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SoilReading {
    pub ph: f64,
    pub moisture: Moisture,
    pub organic_matter: OrganicMatter,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum SoilHealth {
    Healthy,
    Moderate,
    Poor,
}

impl SoilHealth {
    pub fn for_score(score: u8) -> Self {
        match score {
            s if s >= 5 => SoilHealth::Healthy,
            s if s >= 3 => SoilHealth::Moderate,
            _ => SoilHealth::Poor,
        }
    }

    pub fn recommendation(self) -> &'static str {
        match self {
            SoilHealth::Healthy => "Soil is healthy. Maintain current practices.",
            SoilHealth::Moderate => {
                "Soil health is moderate. Consider irrigation adjustment and adding organic matter."
            }
            SoilHealth::Poor => {
                "Soil health is poor. Add compost/organic matter, adjust irrigation, and correct pH."
            }
        }
    }

    pub fn details(self) -> &'static [&'static str] {
        match self {
            SoilHealth::Healthy => &[
                "Continue current soil management practices",
                "Monitor soil conditions regularly",
                "Maintain proper crop rotation",
                "Keep up organic matter levels",
            ],
            SoilHealth::Moderate => &[
                "Adjust irrigation frequency based on moisture levels",
                "Add organic compost or manure",
                "Consider pH correction if needed",
                "Implement cover cropping",
            ],
            SoilHealth::Poor => &[
                "Add 2-3 tons organic compost per acre",
                "Correct pH using lime (if acidic) or sulfur (if alkaline)",
                "Improve drainage or irrigation system",
                "Consider soil testing for detailed analysis",
            ],
        }
    }
}

/// Per-input points and the overall verdict.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SoilAssessment {
    pub ph_points: u8,
    pub moisture_points: u8,
    pub organic_points: u8,
    pub score: u8,
    pub percentage: f64,
    pub health: SoilHealth,
    pub recommendation: &'static str,
    pub details: &'static [&'static str],
}

pub fn ph_points(ph: f64) -> u8 {
    if (6.0..=7.5).contains(&ph) {
        2
    } else if (5.5..6.0).contains(&ph) || (ph > 7.5 && ph <= 8.0) {
        1
    } else {
        0
    }
}

pub fn moisture_points(moisture: Moisture) -> u8 {
    match moisture {
        Moisture::Medium => 2,
        Moisture::Dry | Moisture::Wet => 1,
    }
}

pub fn organic_points(organic: OrganicMatter) -> u8 {
    match organic {
        OrganicMatter::Good => 2,
        OrganicMatter::Moderate => 1,
        OrganicMatter::Poor => 0,
    }
}

impl SoilReading {
    pub fn assess(&self) -> SoilAssessment {
        let ph_points = ph_points(self.ph);
        let moisture_points = moisture_points(self.moisture);
        let organic_points = organic_points(self.organic_matter);
        let score = ph_points + moisture_points + organic_points;
        let health = SoilHealth::for_score(score);
        SoilAssessment {
            ph_points,
            moisture_points,
            organic_points,
            score,
            percentage: f64::from(score) / f64::from(MAX_SCORE) * 100.0,
            health,
            recommendation: health.recommendation(),
            details: health.details(),
        }
    }
}
