//! Response and request bodies that are not plain models.

use crate::models::{Listing, NewOffer, Offer, OfferStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub listings: usize,
    pub uptime_secs: u64,
}

/// Body of `POST /api/offers`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitOfferRequest {
    #[serde(default)]
    pub listing_id: String,
    #[serde(flatten)]
    pub offer: NewOffer,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitOfferResponse {
    pub success: bool,
    pub message: &'static str,
    pub offer_id: String,
    pub submitted_at: DateTime<Utc>,
}

impl From<Offer> for SubmitOfferResponse {
    fn from(offer: Offer) -> Self {
        Self {
            success: true,
            message: "Offer submitted successfully",
            offer_id: offer.id,
            submitted_at: offer.submitted_at,
        }
    }
}

#[derive(Serialize)]
pub struct OffersResponse {
    pub count: usize,
    pub offers: Vec<Offer>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareResponse {
    pub lobby_url: String,
}

/// Public lobby view. Status is computed at request time.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LobbyResponse {
    pub listing: Listing,
    pub display_status: OfferStatus,
    pub status_label: &'static str,
    /// Only present when the listing agent opted in
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offer_count: Option<usize>,
}
