//! Hit Routes
//!
//! - GET /api/v1/hits - Filtered hit log
//! - POST /api/v1/hits - Record a hit
//! - DELETE /api/v1/hits - Clear all hits

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use crate::api::dto::{FilterParams, HitListResponse, HitRow, RecordRequest};
use crate::api::error::ApiResult;
use crate::api::state::AppState;

/// GET /api/v1/hits
pub async fn list_hits(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FilterParams>,
) -> Json<HitListResponse> {
    let store = state.store.read().await;
    let filtered = params.to_filter().apply(store.hits());
    Json(HitListResponse::from_hits(&filtered))
}

/// POST /api/v1/hits
///
/// Returns 201 with the new hit, or 204 when the name or URL was empty
/// and nothing was recorded.
pub async fn record_hit(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RecordRequest>,
) -> ApiResult<Response> {
    let mut store = state.store.write().await;
    let position = store.len() + 1;

    match store.record(&request.name, &request.url)? {
        Some(hit) => Ok((StatusCode::CREATED, Json(HitRow::new(position, hit))).into_response()),
        None => {
            tracing::debug!("Ignored hit without name or URL");
            Ok(StatusCode::NO_CONTENT.into_response())
        }
    }
}

/// DELETE /api/v1/hits
pub async fn clear_hits(State(state): State<Arc<AppState>>) -> ApiResult<StatusCode> {
    state.store.write().await.clear()?;
    Ok(StatusCode::NO_CONTENT)
}
