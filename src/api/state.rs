//! Application state shared across handlers.

use crate::settings::Settings;
use crate::store::{Stores, UnknownListingPolicy};
use std::time::Instant;
use tracing::info;

pub struct AppState {
    pub settings: Settings,
    pub stores: Stores,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(settings: Settings, stores: Stores) -> Self {
        Self {
            settings,
            stores,
            start_time: Instant::now(),
        }
    }

    /// Build wall-clock stores from settings, seeding the demo listing if asked
    pub fn from_settings(settings: Settings) -> anyhow::Result<Self> {
        let stores = Stores::in_memory(settings.unknown_listing_policy);
        if settings.seed_demo {
            stores.seed_demo()?;
            info!("Seeded demo listing");
        }
        if settings.unknown_listing_policy == UnknownListingPolicy::AutoCreate {
            info!("Unknown listing ids will get shell listings");
        }
        Ok(Self::new(settings, stores))
    }
}
