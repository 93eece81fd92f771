//! HTTP boundary over the listing and offer stores.
//!
//! ## Endpoints
//! - `GET /health`
//! - `GET|POST /api/listings`, `GET|PATCH /api/listings/{id}`
//! - `GET /api/listings/{id}/offers`, `GET /api/listings/{id}/share`
//! - `GET /api/lobby/{id}`
//! - `POST /api/offers`

mod error;
mod handlers;
mod response;
mod router;
mod state;

pub use router::create as create_router;
pub use state::AppState;
