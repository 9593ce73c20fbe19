//! Export Routes
//!
//! - GET /api/v1/export - Download the (filtered) hits as `hits.csv`

use axum::{
    body::Body,
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::api::dto::FilterParams;
use crate::api::state::AppState;
use crate::tracker::{to_csv, CSV_CONTENT_TYPE, EXPORT_FILE_NAME};

/// GET /api/v1/export
pub async fn export_hits(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FilterParams>,
) -> Response {
    let body = {
        let store = state.store.read().await;
        let filtered = params.to_filter().apply(store.hits());
        tracing::info!(rows = filtered.len(), "Exporting hits");
        to_csv(filtered)
    };

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, CSV_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", EXPORT_FILE_NAME),
            ),
        ],
        Body::from(body),
    )
        .into_response()
}
