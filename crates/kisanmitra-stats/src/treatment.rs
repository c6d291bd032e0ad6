// SPDX-FileCopyrightText: 2026 KisanMitra Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Step-by-step treatment plans and their progress.

use chrono::{DateTime, Utc};
use kisanmitra_core::{TreatmentStatus, UserId};
use kisanmitra_storage::DataService;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use tracing::debug;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PlanStatus {
    #[default]
    Active,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreatmentStep {
    pub step: u32,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub due_date: String,
}

impl TreatmentStep {
    pub fn new(step: u32, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            step,
            title: title.into(),
            description: description.into(),
            completed: false,
            due_date: String::new(),
        }
    }
}

/// An ordered treatment plan, optionally tied to the diagnosis it treats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreatmentPlan {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagnosis_id: Option<String>,
    pub disease: String,
    pub start_date: DateTime<Utc>,
    #[serde(default)]
    pub status: PlanStatus,
    #[serde(default)]
    pub progress: u8,
    #[serde(default)]
    pub steps: Vec<TreatmentStep>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_date: Option<DateTime<Utc>>,
}

/// `round(done / total * 100)` with halves rounded up.
fn percent(done: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let pct = (done.min(total) * 200 + total) / (2 * total);
    u8::try_from(pct).unwrap_or(100)
}

impl TreatmentPlan {
    pub fn new(
        id: impl Into<String>,
        disease: impl Into<String>,
        steps: Vec<TreatmentStep>,
        start_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            diagnosis_id: None,
            disease: disease.into(),
            start_date,
            status: PlanStatus::Active,
            progress: 0,
            steps,
            completed_date: None,
        }
    }

    pub fn for_diagnosis(mut self, diagnosis_id: impl Into<String>) -> Self {
        self.diagnosis_id = Some(diagnosis_id.into());
        self
    }

    pub fn is_completed(&self) -> bool {
        self.status == PlanStatus::Completed
    }

    pub fn completed_steps(&self) -> usize {
        self.steps.iter().filter(|s| s.completed).count()
    }

    /// Progress as shown to the farmer: 100 once completed, 0 with no steps.
    pub fn computed_progress(&self) -> u8 {
        if self.is_completed() {
            100
        } else {
            percent(self.completed_steps(), self.steps.len())
        }
    }

    /// Tick off the step at `index`. Completing the last open step completes
    /// the plan. Returns `false` for an unknown or already-completed step.
    pub fn complete_step(&mut self, index: usize, now: DateTime<Utc>) -> bool {
        match self.steps.get_mut(index) {
            Some(step) if !step.completed => step.completed = true,
            _ => return false,
        }
        let done = self.completed_steps();
        self.progress = percent(done, self.steps.len());
        if done == self.steps.len() {
            self.status = PlanStatus::Completed;
            self.completed_date = Some(now);
        }
        true
    }

    /// Force the plan to completed regardless of open steps.
    pub fn mark_completed(&mut self, now: DateTime<Utc>) {
        self.status = PlanStatus::Completed;
        self.progress = 100;
        self.completed_date = Some(now);
    }

    /// Mirror the plan's state onto its linked diagnosis.
    ///
    /// Returns `true` if the diagnosis status changed.
    pub fn sync_to_diagnosis(&self, service: &DataService, user_id: &UserId) -> bool {
        let Some(diagnosis_id) = self.diagnosis_id.as_deref() else {
            return false;
        };
        let status = match self.status {
            PlanStatus::Active => TreatmentStatus::Active,
            PlanStatus::Completed => TreatmentStatus::Completed,
        };
        let changed = service.set_diagnosis_status(user_id, diagnosis_id, status);
        debug!(plan_id = %self.id, diagnosis_id, %status, changed, "treatment plan synced");
        changed
    }
}

/// Counts shown above the treatment list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreatmentSummary {
    pub active: usize,
    pub completed: usize,
    /// Completed plans as a rounded percentage of all plans.
    pub success_rate: u8,
}

pub fn summarize(plans: &[TreatmentPlan]) -> TreatmentSummary {
    let completed = plans.iter().filter(|p| p.is_completed()).count();
    TreatmentSummary {
        active: plans.len() - completed,
        completed,
        success_rate: percent(completed, plans.len()),
    }
}
