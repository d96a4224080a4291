//! HTTP API for patient records.
//!
//! A thin axum adapter over [`patient_records_core::PatientRecords`]. All
//! record rules live in the core crate.

pub mod config;
pub mod error;
pub mod handlers;

use std::sync::Arc;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use patient_records_core::{PatientRecords, PatientStore};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use config::{ApiConfig, ConfigError, StoreConfig};
pub use error::ApiError;

/// Collection service over whichever store was configured.
pub type Records = PatientRecords<Box<dyn PatientStore>>;

/// Shared state for request handlers.
#[derive(Clone)]
pub struct AppState {
    pub records: Arc<Records>,
}

impl AppState {
    pub fn new(store: Box<dyn PatientStore>) -> Self {
        Self {
            records: Arc::new(PatientRecords::new(store)),
        }
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::hello))
        .route("/about", get(handlers::about))
        .route("/health", get(handlers::health))
        .route("/view_all", get(handlers::view_all))
        .route("/view_patient/:patient_id", get(handlers::view_patient))
        .route("/sort", get(handlers::sort_patients))
        .route("/create_patient", post(handlers::create_patient))
        .route("/edit/:patient_id", put(handlers::update_patient))
        .route("/delete/:patient_id", delete(handlers::delete_patient))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
