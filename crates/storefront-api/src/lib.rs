//! Storefront HTTP API.
//!
//! Thin axum adapters over the catalog and checkout application layers.

pub mod auth;
pub mod error;
pub mod routes;
pub mod state;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Builds the full application router.
#[must_use]
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes::health::router())
        .nest("/product", routes::products::router())
        .nest("/category", routes::categories::router())
        .nest("/auth", routes::orders::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
