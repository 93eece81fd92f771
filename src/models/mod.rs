use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Offer process status shown for a listing
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum OfferStatus {
    #[default]
    NoOffers,
    OffersReceived,
    MultipleOffers,
    /// Only reachable through a manual listing update
    ReviewInProgress,
    DeadlinePassed,
}

impl OfferStatus {
    /// Human label used on the lobby page
    pub fn label(self) -> &'static str {
        match self {
            OfferStatus::NoOffers => "No offers received",
            OfferStatus::OffersReceived => "Offers received",
            OfferStatus::MultipleOffers => "Multiple offers received",
            OfferStatus::ReviewInProgress => "Offer review in progress",
            OfferStatus::DeadlinePassed => "Offer deadline passed",
        }
    }
}

/// Property record and its offer-process configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: String,
    pub address: String,
    pub city: String,
    pub state: String,
    #[serde(rename = "zip")]
    pub postal_code: String,
    pub primary_photo: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub beds: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub baths: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sqft: Option<u32>,
    pub offer_status: OfferStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offer_deadline: Option<DateTime<Utc>>,
    /// Free-text schedule, e.g. "Friday 2pm-5pm"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_window: Option<String>,
    #[serde(default)]
    pub show_offer_count: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields accepted when creating a listing
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewListing {
    pub address: String,
    pub city: String,
    pub state: String,
    #[serde(rename = "zip")]
    pub postal_code: String,
    pub primary_photo: String,
    pub description: Option<String>,
    pub beds: Option<u32>,
    pub baths: Option<u32>,
    pub sqft: Option<u32>,
    pub offer_status: Option<OfferStatus>,
    pub offer_deadline: Option<DateTime<Utc>>,
    pub review_window: Option<String>,
    pub show_offer_count: bool,
}

impl NewListing {
    /// Names of required address fields that are blank
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("address", &self.address),
            ("city", &self.city),
            ("state", &self.state),
            ("zip", &self.postal_code),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}

/// Partial listing update. `None` leaves the stored value untouched.
/// An `id` key in a request body is dropped during deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListingPatch {
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    #[serde(rename = "zip")]
    pub postal_code: Option<String>,
    pub primary_photo: Option<String>,
    pub description: Option<String>,
    pub beds: Option<u32>,
    pub baths: Option<u32>,
    pub sqft: Option<u32>,
    pub offer_status: Option<OfferStatus>,
    pub offer_deadline: Option<DateTime<Utc>>,
    pub review_window: Option<String>,
    pub show_offer_count: Option<bool>,
}

impl ListingPatch {
    pub fn status(status: OfferStatus) -> Self {
        Self {
            offer_status: Some(status),
            ..Self::default()
        }
    }

    /// Merge the provided fields over `listing`
    pub fn apply_to(self, listing: &mut Listing) {
        fn set<T>(slot: &mut T, value: Option<T>) {
            if let Some(value) = value {
                *slot = value;
            }
        }
        fn set_opt<T>(slot: &mut Option<T>, value: Option<T>) {
            if value.is_some() {
                *slot = value;
            }
        }

        set(&mut listing.address, self.address);
        set(&mut listing.city, self.city);
        set(&mut listing.state, self.state);
        set(&mut listing.postal_code, self.postal_code);
        set(&mut listing.primary_photo, self.primary_photo);
        set_opt(&mut listing.description, self.description);
        set_opt(&mut listing.beds, self.beds);
        set_opt(&mut listing.baths, self.baths);
        set_opt(&mut listing.sqft, self.sqft);
        set(&mut listing.offer_status, self.offer_status);
        set_opt(&mut listing.offer_deadline, self.offer_deadline);
        set_opt(&mut listing.review_window, self.review_window);
        set(&mut listing.show_offer_count, self.show_offer_count);
    }
}

/// Metadata of a file attached to an offer. The content is not stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentMeta {
    pub name: String,
    pub size: u64,
    pub mime_type: String,
}

/// Buyer-agent submission for a listing. Carries no price.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    pub id: String,
    pub listing_id: String,
    pub buyer_agent_name: String,
    pub buyer_agent_license: String,
    pub buyer_agent_email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachment: Option<AttachmentMeta>,
    pub submitted_at: DateTime<Utc>,
}

/// Fields accepted when submitting an offer
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewOffer {
    pub buyer_agent_name: String,
    pub buyer_agent_license: String,
    pub buyer_agent_email: String,
    pub attachment: Option<AttachmentMeta>,
}

impl NewOffer {
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("buyerAgentName", &self.buyer_agent_name),
            ("buyerAgentLicense", &self.buyer_agent_license),
            ("buyerAgentEmail", &self.buyer_agent_email),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}
