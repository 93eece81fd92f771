//! HTTP request handlers.

use crate::api::error::ApiError;
use crate::api::response::{
    HealthResponse, LobbyResponse, OffersResponse, ShareResponse, SubmitOfferRequest,
    SubmitOfferResponse,
};
use crate::api::state::AppState;
use crate::models::{Listing, ListingPatch, NewListing};
use crate::share::lobby_url;
use crate::store::{display_status, Clock, StoreError};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use std::sync::Arc;
use tracing::info;

type ApiResult<T> = Result<T, ApiError>;

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        listings: state.stores.listings.len(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

pub async fn list_listings(State(state): State<Arc<AppState>>) -> Json<Vec<Listing>> {
    Json(state.stores.listings.list_all())
}

pub async fn create_listing(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewListing>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Listing>)> {
    let Json(fields) = payload?;
    let listing = state.stores.listings.create(fields)?;
    Ok((StatusCode::CREATED, Json(listing)))
}

pub async fn get_listing(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Listing>> {
    state
        .stores
        .listings
        .get(&id)
        .map(Json)
        .ok_or_else(|| StoreError::NotFound(id).into())
}

pub async fn update_listing(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<ListingPatch>, JsonRejection>,
) -> ApiResult<Json<Listing>> {
    let Json(patch) = payload?;
    Ok(Json(state.stores.listings.update(&id, patch)?))
}

/// Admin view of every offer received for a listing
pub async fn listing_offers(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<OffersResponse>> {
    if !state.stores.listings.contains(&id) {
        return Err(StoreError::NotFound(id).into());
    }
    let offers = state.stores.offers.list_for(&id);
    Ok(Json(OffersResponse {
        count: offers.len(),
        offers,
    }))
}

/// Lobby link for sharing. Any id is accepted.
pub async fn share_link(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Json<ShareResponse> {
    let header = |name: &str| headers.get(name).and_then(|v| v.to_str().ok());
    let base = match header("host") {
        Some(host) => format!("{}://{}", header("x-forwarded-proto").unwrap_or("http"), host),
        None => state.settings.base_url.clone(),
    };
    Json(ShareResponse {
        lobby_url: lobby_url(&base, &id),
    })
}

/// Public lobby view with the status recomputed against the current clock
pub async fn lobby(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<LobbyResponse>> {
    let stores = &state.stores;
    let listing = stores
        .listings
        .get(&id)
        .ok_or_else(|| StoreError::NotFound(id.clone()))?;
    let count = stores.offers.count_for(&id);
    let status = display_status(&listing, count, stores.clock.now());

    Ok(Json(LobbyResponse {
        offer_count: listing.show_offer_count.then_some(count),
        display_status: status,
        status_label: status.label(),
        listing,
    }))
}

pub async fn submit_offer(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SubmitOfferRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<SubmitOfferResponse>)> {
    let Json(request) = payload?;
    if request.listing_id.trim().is_empty() {
        let mut missing = request.offer.missing_fields();
        missing.insert(0, "listingId");
        return Err(StoreError::Validation(missing).into());
    }

    info!(listing_id = %request.listing_id, "Offer received");
    let offer = state
        .stores
        .offers
        .append(&request.listing_id, request.offer)?;
    Ok((StatusCode::CREATED, Json(offer.into())))
}

#[cfg(test)]
mod tests {
    use crate::api::{create_router, AppState};
    use crate::settings::Settings;
    use crate::store::traits::testing::{ManualClock, SequentialIds};
    use crate::store::{Stores, UnknownListingPolicy, DEMO_LISTING_ID};
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use axum::Router;
    use chrono::Duration;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app_with(policy: UnknownListingPolicy) -> (Router, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new());
        let stores = Stores::new(policy, clock.clone(), Arc::new(SequentialIds::default()));
        stores.seed_demo().unwrap();
        let settings = Settings {
            unknown_listing_policy: policy,
            ..Settings::default()
        };
        let state = Arc::new(AppState::new(settings, stores));
        (create_router(state), clock)
    }

    fn app() -> Router {
        app_with(UnknownListingPolicy::Reject).0
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                request = request.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        let response = app
            .clone()
            .oneshot(request.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    fn offer_body(listing_id: &str, name: &str) -> Value {
        json!({
            "listingId": listing_id,
            "buyerAgentName": name,
            "buyerAgentLicense": "DRE-7654321",
            "buyerAgentEmail": "agent@brokerage.test"
        })
    }

    #[tokio::test]
    async fn health_reports_listing_count() {
        let (status, body) = send(&app(), "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["listings"], 1);
    }

    #[tokio::test]
    async fn create_then_fetch_listing() {
        let app = app();
        let (status, created) = send(
            &app,
            "POST",
            "/api/listings",
            Some(json!({"address": "1 Main St", "city": "X", "state": "CA", "zip": "90000"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["offerStatus"], "no_offers");
        assert_eq!(created["createdAt"], created["updatedAt"]);
        assert_eq!(created["primaryPhoto"], "");

        let id = created["id"].as_str().unwrap();
        let (status, fetched) = send(&app, "GET", &format!("/api/listings/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched, created);

        let (_, all) = send(&app, "GET", "/api/listings", None).await;
        let ids: Vec<&str> = all
            .as_array()
            .unwrap()
            .iter()
            .map(|l| l["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec![DEMO_LISTING_ID, id]);
    }

    #[tokio::test]
    async fn create_listing_without_address_is_bad_request() {
        let (status, body) = send(
            &app(),
            "POST",
            "/api/listings",
            Some(json!({"city": "X", "state": "CA"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "missing required fields: address, zip");
    }

    #[tokio::test]
    async fn malformed_json_is_bad_request() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/offers")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unknown_listing_is_not_found() {
        let app = app();
        let (status, _) = send(&app, "GET", "/api/listings/ghost", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, "PATCH", "/api/listings/ghost", Some(json!({}))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, "GET", "/api/lobby/ghost", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn patch_cannot_change_id() {
        let app = app();
        let uri = format!("/api/listings/{DEMO_LISTING_ID}");
        let (status, body) = send(
            &app,
            "PATCH",
            &uri,
            Some(json!({"id": "other", "reviewWindow": "Friday 2pm-5pm", "showOfferCount": true})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], DEMO_LISTING_ID);
        assert_eq!(body["reviewWindow"], "Friday 2pm-5pm");
        assert_eq!(body["showOfferCount"], true);
    }

    #[tokio::test]
    async fn submitted_offers_move_status_and_show_in_admin_view() {
        let app = app();
        let (status, body) = send(&app, "POST", "/api/offers", Some(offer_body(DEMO_LISTING_ID, "Ana"))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "Offer submitted successfully");
        assert!(body["offerId"].is_string());

        let uri = format!("/api/listings/{DEMO_LISTING_ID}");
        let (_, listing) = send(&app, "GET", &uri, None).await;
        assert_eq!(listing["offerStatus"], "offers_received");

        send(&app, "POST", "/api/offers", Some(offer_body(DEMO_LISTING_ID, "Ben"))).await;
        let (_, listing) = send(&app, "GET", &uri, None).await;
        assert_eq!(listing["offerStatus"], "multiple_offers");

        let (status, offers) = send(&app, "GET", &format!("{uri}/offers"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(offers["count"], 2);
        assert_eq!(offers["offers"][0]["buyerAgentName"], "Ana");
        assert_eq!(offers["offers"][1]["buyerAgentName"], "Ben");
        assert!(offers["offers"][0].get("price").is_none());
    }

    #[tokio::test]
    async fn offer_missing_fields_is_bad_request() {
        let (status, body) = send(
            &app(),
            "POST",
            "/api/offers",
            Some(json!({"buyerAgentName": "Ana"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["error"],
            "missing required fields: listingId, buyerAgentLicense, buyerAgentEmail"
        );
    }

    #[tokio::test]
    async fn offer_for_unknown_listing_follows_policy() {
        let (status, _) = send(&app(), "POST", "/api/offers", Some(offer_body("ghost", "Ana"))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (auto, _) = app_with(UnknownListingPolicy::AutoCreate);
        let (status, _) = send(&auto, "POST", "/api/offers", Some(offer_body("ghost", "Ana"))).await;
        assert_eq!(status, StatusCode::CREATED);
        let (status, shell) = send(&auto, "GET", "/api/listings/ghost", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(shell["offerStatus"], "offers_received");
    }

    #[tokio::test]
    async fn lobby_recomputes_deadline_and_hides_count_by_default() {
        let (app, clock) = app_with(UnknownListingPolicy::Reject);
        let uri = format!("/api/listings/{DEMO_LISTING_ID}");
        let lobby = format!("/api/lobby/{DEMO_LISTING_ID}");

        send(&app, "POST", "/api/offers", Some(offer_body(DEMO_LISTING_ID, "Ana"))).await;
        send(&app, "POST", "/api/offers", Some(offer_body(DEMO_LISTING_ID, "Ben"))).await;

        let (_, view) = send(&app, "GET", &lobby, None).await;
        assert_eq!(view["displayStatus"], "multiple_offers");
        assert_eq!(view["statusLabel"], "Multiple offers received");
        assert!(view.get("offerCount").is_none());

        let deadline = clock_now_plus(&clock, Duration::hours(1));
        send(
            &app,
            "PATCH",
            &uri,
            Some(json!({"offerDeadline": deadline, "showOfferCount": true})),
        )
        .await;
        clock.advance(Duration::hours(2));

        let (_, view) = send(&app, "GET", &lobby, None).await;
        assert_eq!(view["displayStatus"], "deadline_passed");
        assert_eq!(view["statusLabel"], "Offer deadline passed");
        assert_eq!(view["listing"]["offerStatus"], "multiple_offers");
        assert_eq!(view["offerCount"], 2);
    }

    #[tokio::test]
    async fn manual_review_status_shows_in_lobby() {
        let app = app();
        send(
            &app,
            "PATCH",
            &format!("/api/listings/{DEMO_LISTING_ID}"),
            Some(json!({"offerStatus": "review_in_progress"})),
        )
        .await;
        let (_, view) = send(&app, "GET", &format!("/api/lobby/{DEMO_LISTING_ID}"), None).await;
        assert_eq!(view["displayStatus"], "review_in_progress");
    }

    #[tokio::test]
    async fn share_link_uses_request_host() {
        let app = app();
        let request = Request::builder()
            .uri("/api/listings/abc/share")
            .header("host", "deals.example.com")
            .header("x-forwarded-proto", "https")
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["lobbyUrl"], "https://deals.example.com/lobby/abc");

        let (_, body) = send(&app, "GET", "/api/listings/abc/share", None).await;
        assert_eq!(body["lobbyUrl"], "http://localhost:3000/lobby/abc");
    }

    fn clock_now_plus(clock: &ManualClock, by: Duration) -> String {
        use crate::store::Clock;
        (clock.now() + by).to_rfc3339()
    }
}
