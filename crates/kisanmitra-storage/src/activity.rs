// SPDX-FileCopyrightText: 2026 KisanMitra Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-user activity log with a retention cap.
//!
//! Tracking is fire-and-forget: a failed write is logged and never fails the
//! mutation that triggered it.

use chrono::{DateTime, Utc};
use kisanmitra_core::{UserActivity, UserId};
use rand::Rng;
use serde_json::Value;
use tracing::debug;

use crate::collection::JsonCollection;
use crate::database::Database;

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_SUFFIX_LEN: usize = 9;

/// Action tags written by the repositories.
pub mod actions {
    pub const USER_CREATED: &str = "user_created";
    pub const USER_LOGIN: &str = "user_login";
    pub const PROFILE_UPDATED: &str = "profile_updated";
    pub const LISTING_CREATED: &str = "listing_created";
    pub const LISTING_UPDATED: &str = "listing_updated";
    pub const LISTING_SOLD: &str = "listing_sold";
    pub const LISTING_VIEWED: &str = "listing_viewed";
    pub const LISTING_INQUIRY: &str = "listing_inquiry";
    pub const DIAGNOSIS_CREATED: &str = "diagnosis_created";
    pub const DIAGNOSIS_STATUS_CHANGED: &str = "diagnosis_status_changed";
    pub const ADVISORY_SAVED: &str = "advisory_saved";
}

/// Build an activity id of the form `activity_{millis}_{9 base36 chars}`.
pub fn activity_id(at: DateTime<Utc>) -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..ID_SUFFIX_LEN)
        .map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char)
        .collect();
    format!("activity_{}_{suffix}", at.timestamp_millis())
}

fn collection<'a>(db: &'a Database, user_id: &UserId) -> JsonCollection<'a, UserActivity> {
    JsonCollection::new(db.store(), db.keys().activities(user_id))
}

/// Append an entry to `user_id`'s log, evicting the oldest beyond the cap.
pub fn track(db: &Database, user_id: &UserId, action: &str, data: Value) -> bool {
    let now = Utc::now();
    let entry = UserActivity {
        id: activity_id(now),
        user_id: user_id.clone(),
        action: action.to_string(),
        data,
        timestamp: now,
    };

    let log = collection(db, user_id);
    let mut entries = log.load();
    entries.push(entry);
    let excess = entries.len().saturating_sub(db.activity_cap());
    if excess > 0 {
        entries.drain(..excess);
    }
    let written = log.save(&entries);
    if written {
        debug!(user_id = %user_id, action, evicted = excess, "activity tracked");
    }
    written
}

/// The user's activity log, oldest first.
pub fn list(db: &Database, user_id: &UserId) -> Vec<UserActivity> {
    collection(db, user_id).load()
}
