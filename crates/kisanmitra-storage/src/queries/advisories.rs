// SPDX-FileCopyrightText: 2026 KisanMitra Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Saved advisory notes.

use chrono::Utc;
use kisanmitra_core::{AdvisoryRecord, UserId, new_record_id};
use serde_json::json;

use crate::activity::{self, actions};
use crate::collection::JsonCollection;
use crate::database::Database;
use crate::models::NewAdvisory;

fn collection<'a>(db: &'a Database, user_id: &UserId) -> JsonCollection<'a, AdvisoryRecord> {
    JsonCollection::new(db.store(), db.keys().advisories(user_id))
}

pub fn list_advisories(db: &Database, user_id: &UserId) -> Vec<AdvisoryRecord> {
    collection(db, user_id).load()
}

pub fn add_advisory(db: &Database, advisory: &AdvisoryRecord) -> bool {
    let written = collection(db, &advisory.user_id).append(advisory.clone());
    if written {
        activity::track(
            db,
            &advisory.user_id,
            actions::ADVISORY_SAVED,
            json!({ "advisoryId": advisory.id, "title": advisory.title }),
        );
    }
    written
}

pub fn save_advisory(db: &Database, user_id: &UserId, input: NewAdvisory) -> AdvisoryRecord {
    let now = Utc::now();
    let advisory = AdvisoryRecord {
        id: new_record_id(),
        user_id: user_id.clone(),
        title: input.title,
        content: input.content,
        category: input.category,
        saved_date: now,
        created_at: now,
    };
    add_advisory(db, &advisory);
    advisory
}
