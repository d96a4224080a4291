//! Collection operations over a [`PatientStore`].
//!
//! Every call is one round trip: load the whole collection, work in memory and,
//! for mutations, save the whole collection back. Nothing is written when an
//! operation fails.

mod sort;

pub use sort::*;

use std::sync::Mutex;

use thiserror::Error;

use crate::models::{
    Collection, Patient, PatientFields, PatientRecord, PatientUpdate, ValidationError,
};
use crate::store::{PatientStore, StoreError};

/// Collection operation errors.
#[derive(Error, Debug)]
pub enum RecordsError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Patient not found: {id}")]
    NotFound { id: String },

    #[error("Patient with ID {id} already exists")]
    Conflict { id: String },

    #[error("Invalid {parameter}. Must be one of {allowed:?}")]
    InvalidArgument {
        parameter: &'static str,
        allowed: &'static [&'static str],
    },

    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),
}

pub type RecordsResult<T> = Result<T, RecordsError>;

/// Patient collection service.
///
/// Mutations issued through one instance are serialized, so their load/save
/// windows never interleave. Separate instances or processes sharing a store
/// are not coordinated.
pub struct PatientRecords<S> {
    store: S,
    write_lock: Mutex<()>,
}

impl<S: PatientStore> PatientRecords<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    /// Get the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// All patients keyed by id. Derived fields are computed when serialized.
    pub fn get_all(&self) -> RecordsResult<Collection> {
        Ok(self.store.load()?)
    }

    /// Get one patient by id.
    pub fn get(&self, id: &str) -> RecordsResult<PatientRecord> {
        self.store
            .load()?
            .remove(id)
            .ok_or_else(|| not_found(id))
    }

    /// Check if a patient id is taken.
    pub fn exists(&self, id: &str) -> RecordsResult<bool> {
        Ok(self.store.load()?.contains_key(id))
    }

    /// Insert a new patient, failing if the id is taken.
    ///
    /// Returns the stored record, without its id.
    pub fn create(&self, id: &str, fields: PatientFields) -> RecordsResult<PatientRecord> {
        let _guard = self.write_lock.lock().map_err(StoreError::from)?;
        let mut patients = self.store.load()?;

        if patients.contains_key(id) {
            tracing::debug!(patient_id = %id, "create rejected, id exists");
            return Err(RecordsError::Conflict { id: id.to_string() });
        }

        let Patient { id, record } = Patient::new(id, fields)?;
        patients.insert(id.clone(), record.clone());
        self.store.save(&patients)?;

        tracing::info!(patient_id = %id, "created patient");
        Ok(record)
    }

    /// Merge a partial update onto an existing patient and store the result.
    pub fn update(&self, id: &str, update: &PatientUpdate) -> RecordsResult<PatientRecord> {
        let _guard = self.write_lock.lock().map_err(StoreError::from)?;
        let mut patients = self.store.load()?;

        let existing = patients.get(id).ok_or_else(|| not_found(id))?;
        let merged = update.apply(id, existing)?;

        patients.insert(merged.id, merged.record.clone());
        self.store.save(&patients)?;

        tracing::info!(patient_id = %id, "updated patient");
        Ok(merged.record)
    }

    /// Remove a patient. Deleting a missing id is an error, also on repeat.
    pub fn delete(&self, id: &str) -> RecordsResult<()> {
        let _guard = self.write_lock.lock().map_err(StoreError::from)?;
        let mut patients = self.store.load()?;

        if patients.remove(id).is_none() {
            return Err(not_found(id));
        }
        self.store.save(&patients)?;

        tracing::info!(patient_id = %id, "deleted patient");
        Ok(())
    }

    /// All patients ordered by a numeric field.
    pub fn sort(&self, query: SortQuery) -> RecordsResult<Vec<Patient>> {
        let mut patients: Vec<Patient> = self
            .store
            .load()?
            .into_iter()
            .map(|(id, record)| Patient { id, record })
            .collect();
        query.apply(&mut patients);
        Ok(patients)
    }

    /// Parse raw `sort_by`/`order` values, then sort. Invalid arguments fail
    /// before the store is touched.
    pub fn sort_by(&self, sort_by: &str, order: Option<&str>) -> RecordsResult<Vec<Patient>> {
        let query = SortQuery::parse(sort_by, order)?;
        self.sort(query)
    }
}

fn not_found(id: &str) -> RecordsError {
    RecordsError::NotFound { id: id.to_string() }
}
