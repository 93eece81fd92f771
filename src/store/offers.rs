use crate::models::{ListingPatch, NewOffer, Offer};
use crate::store::error::{Result, StoreError};
use crate::store::listings::ListingStore;
use crate::store::status::derive_status;
use crate::store::traits::{Clock, IdGenerator};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::info;

/// Offers per listing, plus the status recomputation they trigger
pub struct OfferStore {
    listings: Arc<ListingStore>,
    /// Held across append, recompute and listing update. Lock order is always
    /// offers, then listings; `ListingStore` never touches this lock.
    offers: Mutex<HashMap<String, Vec<Offer>>>,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
}

impl OfferStore {
    pub fn new(
        listings: Arc<ListingStore>,
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdGenerator>,
    ) -> Self {
        Self {
            listings,
            offers: Mutex::new(HashMap::new()),
            clock,
            ids,
        }
    }

    /// Record an offer and bring the listing's stored status up to date
    pub fn append(&self, listing_id: &str, fields: NewOffer) -> Result<Offer> {
        let missing = fields.missing_fields();
        if !missing.is_empty() {
            return Err(StoreError::Validation(missing));
        }

        let mut offers = self.lock();
        let listing = self.listings.resolve(listing_id)?;

        let offer = Offer {
            id: self.ids.next_id(),
            listing_id: listing.id.clone(),
            buyer_agent_name: fields.buyer_agent_name,
            buyer_agent_license: fields.buyer_agent_license,
            buyer_agent_email: fields.buyer_agent_email,
            attachment: fields.attachment,
            submitted_at: self.clock.now(),
        };

        let entry = offers.entry(listing.id.clone()).or_default();
        entry.push(offer.clone());
        let count = entry.len();

        let derived = derive_status(count, listing.offer_deadline, offer.submitted_at);
        if derived != listing.offer_status {
            self.listings
                .update(&listing.id, ListingPatch::status(derived))?;
        }

        info!(
            listing_id = %listing.id,
            offer_id = %offer.id,
            count,
            status = ?derived,
            "Offer submitted"
        );
        Ok(offer)
    }

    /// Number of offers for a listing; 0 when unknown
    pub fn count_for(&self, listing_id: &str) -> usize {
        self.lock().get(listing_id).map_or(0, Vec::len)
    }

    /// Offers for a listing in submission order
    pub fn list_for(&self, listing_id: &str) -> Vec<Offer> {
        self.lock().get(listing_id).cloned().unwrap_or_default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Vec<Offer>>> {
        self.offers.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
