// SPDX-FileCopyrightText: 2026 KisanMitra Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plant diagnosis records and their treatment status.

use chrono::Utc;
use kisanmitra_core::{Diagnosis, TreatmentStatus, UserId, new_record_id};
use serde_json::json;
use tracing::debug;

use crate::activity::{self, actions};
use crate::collection::JsonCollection;
use crate::database::Database;
use crate::models::NewDiagnosis;

fn collection<'a>(db: &'a Database, user_id: &UserId) -> JsonCollection<'a, Diagnosis> {
    JsonCollection::new(db.store(), db.keys().diagnoses(user_id))
}

pub fn list_diagnoses(db: &Database, user_id: &UserId) -> Vec<Diagnosis> {
    collection(db, user_id).load()
}

pub fn add_diagnosis(db: &Database, diagnosis: &Diagnosis) -> bool {
    let written = collection(db, &diagnosis.user_id).append(diagnosis.clone());
    if written {
        debug!(user_id = %diagnosis.user_id, diagnosis_id = %diagnosis.id, "diagnosis added");
        activity::track(
            db,
            &diagnosis.user_id,
            actions::DIAGNOSIS_CREATED,
            json!({
                "diagnosisId": diagnosis.id,
                "crop": diagnosis.crop_name,
                "diagnosis": diagnosis.diagnosis,
            }),
        );
    }
    written
}

pub fn create_diagnosis(db: &Database, user_id: &UserId, input: NewDiagnosis) -> Diagnosis {
    let now = Utc::now();
    let confidence = u8::try_from(input.confidence.clamp(0, 100)).unwrap_or(100);
    let diagnosis = Diagnosis {
        id: new_record_id(),
        user_id: user_id.clone(),
        crop_name: input.crop_name,
        diagnosis: input.diagnosis,
        confidence,
        treatment: input.treatment,
        date: now,
        created_at: Some(now),
        status: None,
        treatment_start_date: None,
        treatment_end_date: None,
    };
    add_diagnosis(db, &diagnosis);
    diagnosis
}

/// Set a diagnosis's treatment status, stamping the treatment window.
///
/// `Active` stamps the start date if it is not yet set; `Completed` and
/// `Discontinued` stamp the end date. Setting the current status again is a
/// no-op.
pub fn set_diagnosis_status(
    db: &Database,
    user_id: &UserId,
    diagnosis_id: &str,
    status: TreatmentStatus,
) -> bool {
    let changed = collection(db, user_id)
        .update_first(
            |d| d.id == diagnosis_id,
            |d| {
                if d.status == Some(status) {
                    return None;
                }
                let previous = d.status;
                let now = Utc::now();
                d.status = Some(status);
                match status {
                    TreatmentStatus::Active => {
                        d.treatment_start_date.get_or_insert(now);
                    }
                    TreatmentStatus::Completed | TreatmentStatus::Discontinued => {
                        d.treatment_end_date = Some(now);
                    }
                }
                Some(previous)
            },
        );

    match changed {
        Some(previous) => {
            activity::track(
                db,
                user_id,
                actions::DIAGNOSIS_STATUS_CHANGED,
                json!({
                    "diagnosisId": diagnosis_id,
                    "from": previous.map(|s| s.to_string()),
                    "to": status.to_string(),
                }),
            );
            true
        }
        None => false,
    }
}
