//! Persistence boundary for the patient collection.
//!
//! A store loads and saves the *whole* collection. Every operation in
//! [`crate::records`] is one `load` followed, for mutations, by one `save`.

mod json_file;
mod memory;
mod schema;
mod sqlite;

pub use json_file::*;
pub use memory::*;
pub use schema::*;
pub use sqlite::*;

use thiserror::Error;

use crate::models::{Collection, ValidationError};

/// Store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Stored patient {id} is invalid: {source}")]
    Corrupt {
        id: String,
        #[source]
        source: ValidationError,
    },

    #[error("Store lock poisoned")]
    Poisoned,
}

pub type StoreResult<T> = Result<T, StoreError>;

impl<T> From<std::sync::PoisonError<T>> for StoreError {
    fn from(_: std::sync::PoisonError<T>) -> Self {
        StoreError::Poisoned
    }
}

/// Whole-collection persistence.
///
/// Implementations are blocking. Each call must be atomic from the caller's
/// point of view: `save` either replaces the full collection or leaves the
/// previous one in place.
pub trait PatientStore: Send + Sync {
    /// Load every patient.
    fn load(&self) -> StoreResult<Collection>;

    /// Replace the stored collection with `patients`.
    fn save(&self, patients: &Collection) -> StoreResult<()>;
}

impl<S: PatientStore + ?Sized> PatientStore for Box<S> {
    fn load(&self) -> StoreResult<Collection> {
        (**self).load()
    }

    fn save(&self, patients: &Collection) -> StoreResult<()> {
        (**self).save(patients)
    }
}

impl<S: PatientStore + ?Sized> PatientStore for std::sync::Arc<S> {
    fn load(&self) -> StoreResult<Collection> {
        (**self).load()
    }

    fn save(&self, patients: &Collection) -> StoreResult<()> {
        (**self).save(patients)
    }
}
