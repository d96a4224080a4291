//! In-memory patient store.

use std::sync::Mutex;

use super::{PatientStore, StoreResult};
use crate::models::Collection;

/// Patient store held in process memory. Contents are lost on drop.
#[derive(Debug, Default)]
pub struct MemoryStore {
    patients: Mutex<Collection>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing collection.
    pub fn with_patients(patients: Collection) -> Self {
        Self {
            patients: Mutex::new(patients),
        }
    }
}

impl PatientStore for MemoryStore {
    fn load(&self) -> StoreResult<Collection> {
        Ok(self.patients.lock()?.clone())
    }

    fn save(&self, patients: &Collection) -> StoreResult<()> {
        *self.patients.lock()? = patients.clone();
        Ok(())
    }
}
