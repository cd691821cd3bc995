//! Router configuration for the facade.

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use super::AppState;
use super::handlers;

/// Create the router with all facade routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/cities", get(handlers::cities_around))
        .route("/cities/:id", get(handlers::city_detail))
        .route("/cities/:id/weather", get(handlers::city_weather))
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
