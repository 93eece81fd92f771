//! Service configuration.
//!
//! Read from an optional `deal-room.toml` and `DEAL_ROOM_*` environment
//! variables, over the defaults below.

use crate::store::UnknownListingPolicy;
use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default = "defaults::bind_address")]
    pub bind_address: String,

    /// Used for lobby links when the request carries no `host` header
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    #[serde(default)]
    pub unknown_listing_policy: UnknownListingPolicy,

    #[serde(default = "defaults::seed_demo")]
    pub seed_demo: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_address: defaults::bind_address(),
            base_url: defaults::base_url(),
            unknown_listing_policy: UnknownListingPolicy::default(),
            seed_demo: defaults::seed_demo(),
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self> {
        config::Config::builder()
            .add_source(config::File::with_name("deal-room").required(false))
            .add_source(config::Environment::with_prefix("DEAL_ROOM"))
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")
    }
}

mod defaults {
    pub fn bind_address() -> String {
        "0.0.0.0:3000".into()
    }

    pub fn base_url() -> String {
        "http://localhost:3000".into()
    }

    pub fn seed_demo() -> bool {
        true
    }
}
