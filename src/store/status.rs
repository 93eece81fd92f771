//! Offer status derivation.
//!
//! The stored `offer_status` only changes when an offer is submitted (or an
//! agent sets it by hand), so deadline expiry has to be worked out again every
//! time a listing is displayed.

use crate::models::{Listing, OfferStatus};
use chrono::{DateTime, Utc};

/// Status implied by the offer count and deadline at time `now`.
///
/// Priority: an expired deadline wins, then 0 / 1 / many offers.
/// Never yields `ReviewInProgress`.
pub fn derive_status(
    count: usize,
    deadline: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> OfferStatus {
    match (deadline, count) {
        (Some(deadline), _) if now > deadline => OfferStatus::DeadlinePassed,
        (_, 0) => OfferStatus::NoOffers,
        (_, 1) => OfferStatus::OffersReceived,
        _ => OfferStatus::MultipleOffers,
    }
}

/// Status a lobby should show right now.
///
/// Same as [`derive_status`], except a manually set `ReviewInProgress` is kept
/// until the deadline expires.
pub fn display_status(listing: &Listing, count: usize, now: DateTime<Utc>) -> OfferStatus {
    match derive_status(count, listing.offer_deadline, now) {
        OfferStatus::DeadlinePassed => OfferStatus::DeadlinePassed,
        _ if listing.offer_status == OfferStatus::ReviewInProgress => {
            OfferStatus::ReviewInProgress
        }
        derived => derived,
    }
}
