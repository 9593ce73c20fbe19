//! Hitdash REST API
//!
//! HTTP API layer for the hit dashboard, built with Axum.
//!
//! # Endpoints
//!
//! ## Hits
//! - `GET /api/v1/hits?name=&url=` - Filtered hit log
//! - `POST /api/v1/hits` - Record a hit (`{"name": "...", "url": "..."}`)
//! - `DELETE /api/v1/hits` - Clear all hits
//!
//! ## Stats
//! - `GET /api/v1/stats?name=&url=&top=` - Per-user, per-URL, per-day counts and leaderboard
//! - `GET /api/v1/filters` - Distinct names and URLs
//!
//! ## Export
//! - `GET /api/v1/export?name=&url=` - Download `hits.csv`
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,no_run
//! use hitdash::api::{serve, ApiConfig, AppState};
//! use hitdash::storage::{HitStore, StoreConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = HitStore::load(StoreConfig::default())?;
//!     let config = ApiConfig::default();
//!
//!     let state = AppState::new(store, config.clone());
//!     serve(state, &config).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::{ApiConfig, AppState};

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        // Hit routes
        .route(
            "/hits",
            get(routes::hits::list_hits)
                .post(routes::hits::record_hit)
                .delete(routes::hits::clear_hits),
        )
        // Stats routes
        .route("/stats", get(routes::stats::get_stats))
        .route("/filters", get(routes::stats::get_filters))
        // Export routes
        .route("/export", get(routes::export::export_hits));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let shared_state = Arc::new(state);

    Router::new()
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(shared_state)
}

/// Start the API server
///
/// On shutdown the store is saved again only if a request left changes
/// that failed to persist.
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let store = Arc::clone(&state.store);
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Hitdash API listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    let mut store = store.write().await;
    if store.has_unsaved_changes() {
        store.save()?;
    }

    tracing::info!("Hitdash API shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
