//! HTTP router setup.

use crate::api::handlers;
use crate::api::state::AppState;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Create the application router.
pub fn create(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/api/listings",
            get(handlers::list_listings).post(handlers::create_listing),
        )
        .route(
            "/api/listings/{id}",
            get(handlers::get_listing).patch(handlers::update_listing),
        )
        .route("/api/listings/{id}/offers", get(handlers::listing_offers))
        .route("/api/listings/{id}/share", get(handlers::share_link))
        .route("/api/lobby/{id}", get(handlers::lobby))
        .route("/api/offers", post(handlers::submit_offer))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
