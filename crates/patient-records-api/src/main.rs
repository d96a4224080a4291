//! Patient records API server binary.
//!
//! # Environment Variables
//! - `PATIENT_API_ADDR`: listen address (default: "0.0.0.0:8000")
//! - `PATIENT_STORE`: `json`, `sqlite` or `memory` (default: "json")
//! - `PATIENT_DATA_PATH`: store file (default: "patients.json" / "patients.db")
//! - `RUST_LOG`: log filter
//!
//! A `.env` file in the working directory is read first when present.

use patient_records_api::{router, ApiConfig, AppState, StoreConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "patient_records_api=info,patient_records_core=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ApiConfig::from_env()?;

    match &config.store {
        StoreConfig::Json(path) => tracing::info!(path = %path.display(), "using JSON file store"),
        StoreConfig::Sqlite(path) => tracing::info!(path = %path.display(), "using SQLite store"),
        StoreConfig::Memory => tracing::warn!("using in-memory store, data is lost on exit"),
    }
    let store = config.store.open()?;

    let app = router(AppState::new(store));

    let listener = tokio::net::TcpListener::bind(&config.addr).await?;
    tracing::info!("-- Patient records API listening on {}", config.addr);
    axum::serve(listener, app).await?;

    Ok(())
}
