//! Patient Records Core Library
//!
//! Patient health records with derived body metrics and partial updates, over a
//! pluggable whole-collection store.
//!
//! # Architecture
//!
//! ```text
//!   request ──► PatientRecords ──load──► PatientStore (JSON file │ SQLite │ memory)
//!                    │
//!          ┌─────────┼──────────────┐
//!          ▼         ▼              ▼
//!     validate    merge update    sort by height │ weight │ bmi
//!    (Patient)   (PatientUpdate)   (SortQuery)
//!          │         │
//!          └────┬────┘
//!               ▼
//!        save whole collection
//! ```
//!
//! # Core Principle
//!
//! **`bmi` and `verdict` are never stored as truth.** They are recomputed from
//! height and weight whenever a record is read, sorted or serialized.
//!
//! # Modules
//!
//! - [`models`]: Domain types (Patient, PatientRecord, PatientUpdate, Verdict)
//! - [`records`]: Collection operations (get, create, update, delete, sort)
//! - [`store`]: Persistence boundary and the shipped stores

pub mod models;
pub mod records;
pub mod store;

// Re-export commonly used types
pub use models::{
    Collection, Constraint, Gender, NewPatient, Patient, PatientFields, PatientRecord,
    PatientUpdate, ValidationError, Verdict,
};
pub use records::{
    PatientRecords, RecordsError, RecordsResult, SortField, SortOrder, SortQuery,
};
pub use store::{JsonFileStore, MemoryStore, PatientStore, SqliteStore, StoreError};
