use crate::models::{Listing, ListingPatch, NewListing, OfferStatus};
use crate::store::error::{Result, StoreError};
use crate::store::traits::{Clock, IdGenerator};
use crate::store::types::UnknownListingPolicy;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info};

#[derive(Default)]
struct Listings {
    by_id: HashMap<String, Listing>,
    /// Ids in insertion order
    order: Vec<String>,
}

impl Listings {
    fn insert(&mut self, listing: Listing) -> Result<Listing> {
        if self.by_id.contains_key(&listing.id) {
            return Err(StoreError::DuplicateId(listing.id));
        }
        self.order.push(listing.id.clone());
        self.by_id.insert(listing.id.clone(), listing.clone());
        Ok(listing)
    }
}

/// In-memory listing records
pub struct ListingStore {
    inner: RwLock<Listings>,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
    policy: UnknownListingPolicy,
}

impl ListingStore {
    pub fn new(
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdGenerator>,
        policy: UnknownListingPolicy,
    ) -> Self {
        Self {
            inner: RwLock::new(Listings::default()),
            clock,
            ids,
            policy,
        }
    }

    /// Validate and store a new listing under a generated id
    pub fn create(&self, fields: NewListing) -> Result<Listing> {
        let id = self.ids.next_id();
        self.create_with_id(id, fields)
    }

    /// Validate and store a new listing under a caller-chosen id
    pub fn create_with_id(&self, id: impl Into<String>, fields: NewListing) -> Result<Listing> {
        let id = id.into();
        let mut missing = fields.missing_fields();
        if id.trim().is_empty() {
            missing.insert(0, "id");
        }
        if !missing.is_empty() {
            return Err(StoreError::Validation(missing));
        }

        let now = self.clock.now();
        let listing = build(id, fields, now);
        let listing = self.write().insert(listing)?;
        info!(listing_id = %listing.id, city = %listing.city, "Listing created");
        Ok(listing)
    }

    pub fn get(&self, id: &str) -> Option<Listing> {
        self.read().by_id.get(id).cloned()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.read().by_id.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.read().order.len()
    }

    /// Merge `patch` over the stored record and bump `updated_at`.
    ///
    /// Unknown ids fail with `NotFound` under `Reject`, or get a shell record
    /// first under `AutoCreate`.
    pub fn update(&self, id: &str, patch: ListingPatch) -> Result<Listing> {
        let now = self.clock.now();
        let mut listings = self.write();

        if !listings.by_id.contains_key(id) {
            self.vivify(&mut listings, id, now)?;
        }
        let listing = listings
            .by_id
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        patch.apply_to(listing);
        listing.updated_at = now.max(listing.updated_at);
        debug!(listing_id = %id, status = ?listing.offer_status, "Listing updated");
        Ok(listing.clone())
    }

    /// Snapshot of every listing in insertion order
    pub fn list_all(&self) -> Vec<Listing> {
        let listings = self.read();
        listings
            .order
            .iter()
            .filter_map(|id| listings.by_id.get(id).cloned())
            .collect()
    }

    /// Fetch a listing, applying the unknown-listing policy if it is missing
    pub fn resolve(&self, id: &str) -> Result<Listing> {
        if let Some(listing) = self.get(id) {
            return Ok(listing);
        }
        let now = self.clock.now();
        let mut listings = self.write();
        // Another caller may have created it between the two locks.
        if let Some(listing) = listings.by_id.get(id) {
            return Ok(listing.clone());
        }
        self.vivify(&mut listings, id, now)
    }

    fn vivify(&self, listings: &mut Listings, id: &str, now: DateTime<Utc>) -> Result<Listing> {
        match self.policy {
            UnknownListingPolicy::Reject => Err(StoreError::NotFound(id.to_string())),
            UnknownListingPolicy::AutoCreate => {
                info!(listing_id = %id, "Creating shell listing for unknown id");
                listings.insert(build(id.to_string(), NewListing::default(), now))
            }
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Listings> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Listings> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn build(id: String, fields: NewListing, now: DateTime<Utc>) -> Listing {
    Listing {
        id,
        address: fields.address,
        city: fields.city,
        state: fields.state,
        postal_code: fields.postal_code,
        primary_photo: fields.primary_photo,
        description: fields.description,
        beds: fields.beds,
        baths: fields.baths,
        sqft: fields.sqft,
        offer_status: fields.offer_status.unwrap_or(OfferStatus::NoOffers),
        offer_deadline: fields.offer_deadline,
        review_window: fields.review_window,
        show_offer_count: fields.show_offer_count,
        created_at: now,
        updated_at: now,
    }
}
