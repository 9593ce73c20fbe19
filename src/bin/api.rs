//! Hitdash API Server
//!
//! Run with: cargo run --bin hitdash-api
//!
//! # Configuration
//!
//! Config file: `HITDASH_CONFIG` if set, otherwise `~/.config/hitdash/config.toml`
//! or `./config.toml`. Environment variables override the file:
//! - `HITDASH_DATA_DIR`: Data directory holding `hits.json`
//! - `HITDASH_API_HOST`: Host to bind to (default: 127.0.0.1)
//! - `HITDASH_API_PORT`: Port to listen on (default: 8086)
//! - `HITDASH_LEADERBOARD_SIZE`: Default leaderboard size (default: 5)
//! - `HITDASH_LOG_LEVEL`, `HITDASH_LOG_FORMAT`: Logging
//! - `RUST_LOG`: Full tracing filter, wins over `HITDASH_LOG_LEVEL`

use hitdash::api::{serve, AppState};
use hitdash::config::Config;
use hitdash::storage::HitStore;
use std::path::PathBuf;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = std::env::var("HITDASH_CONFIG").ok().map(PathBuf::from);
    let config = Config::resolve(config_path.as_deref())?;

    hitdash::telemetry::init_tracing(&config.logging);

    tracing::info!("Starting Hitdash API server v{}", env!("CARGO_PKG_VERSION"));

    let store_config = config.store_config();
    let server_config = config.server_config();

    tracing::info!("Data directory: {:?}", store_config.data_dir);

    let store = HitStore::load(store_config)?;
    tracing::info!("Loaded {} hits ({})", store.len(), store.state());

    let state = AppState::new(store, server_config.clone());
    serve(state, &server_config).await?;

    tracing::info!("Hitdash API server stopped");
    Ok(())
}
