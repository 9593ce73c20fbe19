//! Stats Routes
//!
//! - GET /api/v1/stats - Aggregates for the current filter selection
//! - GET /api/v1/filters - Distinct names and URLs for the selectors

use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::api::dto::StatsParams;
use crate::api::state::AppState;
use crate::tracker::{FilterChoices, Summary};

/// GET /api/v1/stats
pub async fn get_stats(
    State(state): State<Arc<AppState>>,
    Query(params): Query<StatsParams>,
) -> Json<Summary> {
    let top = params.top.unwrap_or(state.config.leaderboard_size);

    let store = state.store.read().await;
    let filtered = params.to_filter().apply(store.hits());
    Json(Summary::compute(&filtered, top))
}

/// GET /api/v1/filters
///
/// Choices come from the full store, not the filtered view.
pub async fn get_filters(State(state): State<Arc<AppState>>) -> Json<FilterChoices> {
    let store = state.store.read().await;
    Json(FilterChoices::from_hits(store.hits()))
}
