//! HTTP front-end using Axum
//!
//! Serves the Vectorino search page, a results fragment for client-side
//! navigation, a small JSON API and the static assets compiled into the
//! binary via `rust-embed`.

pub mod envelope;
pub mod handlers;
mod page;
mod routes;

pub use handlers::{AppState, SearchParams};

use axum::http::{header, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use rust_embed::Embed;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Stylesheet and client script from `static/`.
#[derive(Embed)]
#[folder = "static/"]
struct StaticAssets;

/// Serve an embedded asset under `/static/`, or 404.
async fn serve_asset(uri: Uri) -> Response {
    let path = uri.path().trim_start_matches('/');

    if let Some(asset) = path.strip_prefix("static/") {
        if let Some(content) = StaticAssets::get(asset) {
            let mime = mime_guess::from_path(asset).first_or_octet_stream();
            return (
                StatusCode::OK,
                [(header::CONTENT_TYPE, mime.as_ref())],
                content.data.into_owned(),
            )
                .into_response();
        }
    }

    (StatusCode::NOT_FOUND, "Not found").into_response()
}

/// Build a CORS layer that is restrictive by default (same-origin only).
///
/// Set `VECTORINO_CORS_ORIGINS` to a comma-separated list of allowed origins
/// to expose the JSON API to other front-ends.
fn build_cors_layer() -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET])
        .allow_headers([header::CONTENT_TYPE]);

    match std::env::var("VECTORINO_CORS_ORIGINS") {
        Ok(origins) => {
            let allowed: Vec<_> = origins
                .split(',')
                .filter_map(|o| o.trim().parse().ok())
                .collect();
            tracing::info!(origins = %origins, "CORS: allowing configured origins");
            base.allow_origin(allowed)
        }
        Err(_) => base,
    }
}

/// Create the complete application router.
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes(state.clone()))
        .merge(routes::page_routes(state))
        .fallback(serve_asset)
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer())
}
