//! Display ordering for listings.
//!
//! Promotion is a hard partition: every listing inside its sticky window
//! sorts above every listing outside it, whatever the vote counts. Within a
//! partition the only signal is votes, descending; equal votes keep their
//! input order (the sort is stable). The order is recomputed against `now`
//! on every read — a listing drops out of the promoted partition the moment
//! its window closes, with no stored flag and no expiry job to go stale.

use chrono::{DateTime, Utc};

use crate::models::listing::Listing;

/// True while `now` is inside the listing's sticky window. The window is
/// closed on the right: a listing is still promoted at the exact expiry
/// instant. With no sticky the expiry equals `created_at`, so the listing is
/// never promoted for any `now` after creation.
pub fn is_promoted(listing: &Listing, now: DateTime<Utc>) -> bool {
    now.timestamp_millis() <= listing.promoted_until_millis()
}

/// Totally orders a snapshot of listings for display. Consumes the snapshot
/// and returns the permutation; storage is never touched.
pub fn rank(mut listings: Vec<Listing>, now: DateTime<Utc>) -> Vec<Listing> {
    listings.sort_by(|a, b| {
        let promoted_a = is_promoted(a, now);
        let promoted_b = is_promoted(b, now);
        promoted_b
            .cmp(&promoted_a)
            .then_with(|| b.vote_count().cmp(&a.vote_count()))
    });
    listings
}
