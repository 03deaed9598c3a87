//! API route handlers
//!
//! JSON endpoints next to the rendered page:
//! - `/health` - store readiness
//! - `/api/v1/search` - nearText results in the response envelope

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;

use super::envelope::{ApiError, ApiResponse};
use crate::config::UiConfig;
use crate::store::{Question, QuestionStore};
use crate::ui;

// ============================================================================
// API State
// ============================================================================

/// Shared state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// The question store every request queries
    pub store: Arc<dyn QuestionStore>,
    /// Page rendering settings
    pub ui: UiConfig,
}

impl AppState {
    pub fn new(store: Arc<dyn QuestionStore>, ui: UiConfig) -> Self {
        Self { store, ui }
    }
}

/// `?search=` query parameter shared by the page, fragment and JSON routes.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub search: Option<String>,
}

// ============================================================================
// Health Endpoint
// ============================================================================

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// "healthy" when the store is ready, otherwise "degraded"
    pub status: &'static str,
    pub store: &'static str,
    pub store_ready: bool,
    pub collection: String,
}

/// GET /health
pub async fn get_health(State(state): State<AppState>) -> Json<HealthResponse> {
    let ready = state.store.is_ready().await;
    Json(HealthResponse {
        status: if ready { "healthy" } else { "degraded" },
        store: state.store.store_name(),
        store_ready: ready,
        collection: state.store.collection().to_string(),
    })
}

// ============================================================================
// Search Endpoint
// ============================================================================

/// GET /api/v1/search?search=...
pub async fn search_json(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<ApiResponse<Question>, ApiError> {
    let query = ui::normalize_query(params.search).ok_or(ApiError::MissingQuery)?;

    let items = state.store.near_text(&query).await.map_err(|e| {
        warn!(query = %query, error = %e, "Search API query failed");
        ApiError::from(e)
    })?;
    Ok(ApiResponse::new(items))
}
