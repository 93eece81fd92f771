pub mod error;
pub mod listings;
pub mod offers;
pub mod status;
pub mod traits;
pub mod types;

pub use error::StoreError;
pub use listings::ListingStore;
pub use offers::OfferStore;
pub use status::display_status;
pub use traits::{Clock, IdGenerator, SystemClock, UuidGenerator};
pub use types::UnknownListingPolicy;

use crate::models::NewListing;
use std::sync::Arc;

/// Id of the sample listing loaded when seeding is enabled
pub const DEMO_LISTING_ID: &str = "demo-123";

/// Listing and offer stores sharing one clock and id source
pub struct Stores {
    pub listings: Arc<ListingStore>,
    pub offers: OfferStore,
    pub clock: Arc<dyn Clock>,
}

impl Stores {
    pub fn new(
        policy: UnknownListingPolicy,
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdGenerator>,
    ) -> Self {
        let listings = Arc::new(ListingStore::new(clock.clone(), ids.clone(), policy));
        let offers = OfferStore::new(listings.clone(), clock.clone(), ids);
        Self {
            listings,
            offers,
            clock,
        }
    }

    /// Stores backed by the wall clock and UUID ids
    pub fn in_memory(policy: UnknownListingPolicy) -> Self {
        Self::new(
            policy,
            Arc::new(SystemClock::default()),
            Arc::new(UuidGenerator),
        )
    }

    /// Load the sample listing under [`DEMO_LISTING_ID`]
    pub fn seed_demo(&self) -> Result<(), StoreError> {
        self.listings.create_with_id(DEMO_LISTING_ID, demo_listing())?;
        Ok(())
    }
}

fn demo_listing() -> NewListing {
    NewListing {
        address: "742 Evergreen Terrace".into(),
        city: "Springfield".into(),
        state: "IL".into(),
        postal_code: "62701".into(),
        description: Some(
            "Beautiful single-family home in a quiet neighborhood with updated kitchen and spacious backyard."
                .into(),
        ),
        beds: Some(4),
        baths: Some(2),
        sqft: Some(2200),
        ..NewListing::default()
    }
}
