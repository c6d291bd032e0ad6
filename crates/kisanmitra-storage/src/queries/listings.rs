// SPDX-FileCopyrightText: 2026 KisanMitra Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Marketplace listing operations.

use chrono::Utc;
use kisanmitra_core::{Listing, ListingStatus, UserId, new_record_id};
use rust_decimal::Decimal;
use serde_json::json;
use tracing::debug;

use crate::activity::{self, actions};
use crate::collection::JsonCollection;
use crate::database::Database;
use crate::models::NewListing;

fn collection<'a>(db: &'a Database, user_id: &UserId) -> JsonCollection<'a, Listing> {
    JsonCollection::new(db.store(), db.keys().listings(user_id))
}

/// All listings owned by `user_id`, in insertion order.
pub fn list_listings(db: &Database, user_id: &UserId) -> Vec<Listing> {
    collection(db, user_id).load()
}

/// Append a listing to its owner's collection and track `listing_created`.
pub fn add_listing(db: &Database, listing: &Listing) -> bool {
    let written = collection(db, &listing.user_id).append(listing.clone());
    if written {
        debug!(user_id = %listing.user_id, listing_id = %listing.id, "listing added");
        activity::track(
            db,
            &listing.user_id,
            actions::LISTING_CREATED,
            json!({
                "listingId": listing.id,
                "crop": listing.crop,
                "totalPrice": listing.total_price,
            }),
        );
    }
    written
}

/// Build an active listing from form input and add it.
pub fn create_listing(db: &Database, user_id: &UserId, input: NewListing) -> Listing {
    let listing = Listing {
        id: new_record_id(),
        user_id: user_id.clone(),
        crop: input.crop,
        quantity: input.quantity,
        price_per_kg: input.price_per_kg,
        market: input.market,
        transport: input.transport,
        views: 0,
        inquiries: 0,
        total_price: input.total_price,
        status: ListingStatus::Active,
        posted_date: input.posted_date,
        sold_date: None,
        sold_price: None,
        buyer: None,
        created_at: Utc::now(),
    };
    add_listing(db, &listing);
    listing
}

/// Apply `mutate` to the first of the user's listings matching `predicate`
/// and track `listing_updated` once the change is written.
pub fn update_listing<R>(
    db: &Database,
    user_id: &UserId,
    predicate: impl Fn(&Listing) -> bool,
    mutate: impl FnOnce(&mut Listing) -> Option<R>,
) -> Option<R> {
    let mut listing_id = None;
    let outcome = modify(db, user_id, predicate, |l| {
        let outcome = mutate(l)?;
        listing_id = Some(l.id.clone());
        Some(outcome)
    })?;
    activity::track(
        db,
        user_id,
        actions::LISTING_UPDATED,
        json!({ "listingId": listing_id }),
    );
    Some(outcome)
}

/// Untracked update; callers record their own, more specific action.
fn modify<R>(
    db: &Database,
    user_id: &UserId,
    predicate: impl Fn(&Listing) -> bool,
    mutate: impl FnOnce(&mut Listing) -> Option<R>,
) -> Option<R> {
    collection(db, user_id).update_first(predicate, mutate)
}

/// Record a sale. Only active listings can be sold; anything else is a no-op.
pub fn mark_listing_as_sold(
    db: &Database,
    user_id: &UserId,
    listing_id: &str,
    sold_price: Decimal,
    buyer: &str,
) -> bool {
    let sold = modify(
        db,
        user_id,
        |l| l.id == listing_id,
        |l| {
            if l.mark_sold(sold_price, buyer, Utc::now()) {
                Some(())
            } else {
                debug!(listing_id, status = %l.status, "listing not active, sale ignored");
                None
            }
        },
    )
    .is_some();

    if sold {
        activity::track(
            db,
            user_id,
            actions::LISTING_SOLD,
            json!({ "listingId": listing_id, "soldPrice": sold_price, "buyer": buyer }),
        );
    }
    sold
}

/// Add one view. Returns the new count.
pub fn increment_views(db: &Database, user_id: &UserId, listing_id: &str) -> Option<u32> {
    let views = modify(
        db,
        user_id,
        |l| l.id == listing_id,
        |l| {
            l.views = l.views.saturating_add(1);
            Some(l.views)
        },
    )?;
    activity::track(
        db,
        user_id,
        actions::LISTING_VIEWED,
        json!({ "listingId": listing_id, "views": views }),
    );
    Some(views)
}

/// Add one inquiry. Returns the new count.
pub fn increment_inquiries(db: &Database, user_id: &UserId, listing_id: &str) -> Option<u32> {
    let inquiries = modify(
        db,
        user_id,
        |l| l.id == listing_id,
        |l| {
            l.inquiries = l.inquiries.saturating_add(1);
            Some(l.inquiries)
        },
    )?;
    activity::track(
        db,
        user_id,
        actions::LISTING_INQUIRY,
        json!({ "listingId": listing_id, "inquiries": inquiries }),
    );
    Some(inquiries)
}
