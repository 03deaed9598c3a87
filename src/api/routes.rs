//! Route definitions
//!
//! - `/` - search page (streams results when `?search=` is present)
//! - `/results` - results fragment for client-side navigation
//! - `/health` - store readiness
//! - `/api/v1/search` - JSON search

use axum::{routing::get, Router};

use super::handlers::{self, AppState};
use super::page;

/// Rendered page routes
pub fn page_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(page::search_page))
        .route("/results", get(page::results_fragment))
        .route("/health", get(handlers::get_health))
        .with_state(state)
}

/// JSON API routes, nested under `/api/v1`
pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/search", get(handlers::search_json))
        .with_state(state)
}
