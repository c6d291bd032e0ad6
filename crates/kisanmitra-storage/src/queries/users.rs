// SPDX-FileCopyrightText: 2026 KisanMitra Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! User registry and device session.

use chrono::Utc;
use kisanmitra_core::{KisanError, User, UserId};
use serde_json::json;
use tracing::{debug, info, warn};

use crate::activity::{self, actions};
use crate::collection::{JsonCollection, load_value, save_value};
use crate::database::Database;
use crate::models::{LoginRequest, ProfileUpdate};

fn registry(db: &Database) -> JsonCollection<'_, User> {
    JsonCollection::new(db.store(), db.keys().users())
}

/// Every user who has logged in on this device.
pub fn list_users(db: &Database) -> Vec<User> {
    registry(db).load()
}

/// The logged-in user's record, if any.
pub fn current_user(db: &Database) -> Option<User> {
    load_value(db.store(), &db.keys().current_user())
}

/// The logged-in user's id, if any.
pub fn current_user_id(db: &Database) -> Option<UserId> {
    match db.store().get(&db.keys().current_user_id()) {
        Ok(Some(raw)) if !raw.trim().is_empty() => Some(UserId::new(raw.trim())),
        Ok(_) => current_user(db).map(|u| u.id),
        Err(e) => {
            warn!(error = %e, "current user id unreadable");
            current_user(db).map(|u| u.id)
        }
    }
}

/// Look up a user in the registry, falling back to the session record.
pub fn find_user(db: &Database, user_id: &UserId) -> Option<User> {
    list_users(db)
        .into_iter()
        .find(|u| u.id == *user_id)
        .or_else(|| current_user(db).filter(|u| u.id == *user_id))
}

fn set_session(db: &Database, user: &User) {
    let store = db.store();
    if let Err(e) = store.set(&db.keys().current_user_id(), user.id.as_str()) {
        warn!(error = %e, "session id write dropped");
    }
    save_value(store, &db.keys().current_user(), user);
}

/// Log in by phone number, registering a new user on first sight.
pub fn login_or_create(db: &Database, request: &LoginRequest) -> Result<User, KisanError> {
    let phone = request.phone.trim();
    if phone.is_empty() {
        return Err(KisanError::Validation("phone number must not be empty".into()));
    }

    let users = registry(db);
    let mut all = users.load();
    let existing = all.iter().find(|u| u.phone == phone).cloned();
    let (user, action) = match existing {
        Some(existing) => (existing, actions::USER_LOGIN),
        None => {
            let now = Utc::now();
            let user = User {
                id: UserId::generate(),
                name: request.name.trim().to_string(),
                phone: phone.to_string(),
                location: request.location.clone(),
                state: request.state.clone(),
                avatar: None,
                joined_date: now,
                created_at: now,
                updated_at: None,
            };
            all.push(user.clone());
            users.save(&all);
            info!(user_id = %user.id, "registered new user");
            (user, actions::USER_CREATED)
        }
    };

    set_session(db, &user);
    activity::track(db, &user.id, action, json!({ "phone": user.phone }));
    Ok(user)
}

/// Apply a profile edit. Returns the updated record, or `None` if the user is unknown.
pub fn update_profile(db: &Database, user_id: &UserId, update: &ProfileUpdate) -> Option<User> {
    let apply = |user: &mut User| {
        if let Some(name) = &update.name {
            user.name = name.clone();
        }
        if let Some(location) = &update.location {
            user.location = location.clone();
        }
        if let Some(state) = &update.state {
            user.state = state.clone();
        }
        if let Some(avatar) = &update.avatar {
            user.avatar = Some(avatar.clone());
        }
        user.updated_at = Some(Utc::now());
    };

    let session = current_user(db).filter(|u| u.id == *user_id);
    let users = registry(db);
    let mut records = users.load();
    let updated = match records.iter_mut().find(|u| u.id == *user_id) {
        Some(record) => {
            apply(record);
            let updated = record.clone();
            if let Err(e) = users.try_save(&records) {
                warn!(user_id = %user_id, error = %e, "profile update not persisted");
                return None;
            }
            updated
        }
        // Users created before the registry existed live only in the session record.
        None => {
            let mut user = session.clone()?;
            apply(&mut user);
            user
        }
    };

    if session.is_some() {
        save_value(db.store(), &db.keys().current_user(), &updated);
    }
    activity::track(
        db,
        user_id,
        actions::PROFILE_UPDATED,
        json!({ "fields": update.changed_fields() }),
    );
    Some(updated)
}

/// End the device session. The registry record is kept.
pub fn logout(db: &Database) {
    let store = db.store();
    for key in [db.keys().current_user_id(), db.keys().current_user()] {
        if let Err(e) = store.remove(&key) {
            warn!(key = %key, error = %e, "session key removal dropped");
        }
    }
    debug!("session cleared");
}
