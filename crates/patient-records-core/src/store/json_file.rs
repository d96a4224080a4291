//! JSON file patient store.
//!
//! The file holds a single object keyed by patient id:
//!
//! ```json
//! {"P001": {"name": "Ali", "city": "Lahore", "age": 30, "gender": "male",
//!           "height": 1.8, "weight": 90.0, "bmi": 27.78, "verdict": "Overweight"}}
//! ```
//!
//! `bmi` and `verdict` are written for readers of the file and ignored on load.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{PatientStore, StoreError, StoreResult};
use crate::models::{Collection, PatientFields, PatientRecord};

/// Default file name, relative to the working directory.
pub const DEFAULT_JSON_PATH: &str = "patients.json";

/// Patient store over one JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling file a save is staged in before it replaces the target.
    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl PatientStore for JsonFileStore {
    fn load(&self) -> StoreResult<Collection> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "patient file missing, starting empty");
                return Ok(Collection::new());
            }
            Err(e) => return Err(e.into()),
        };

        if contents.trim().is_empty() {
            return Ok(Collection::new());
        }

        let raw: BTreeMap<String, PatientFields> = serde_json::from_str(&contents)?;
        let mut patients = Collection::new();
        for (id, fields) in raw {
            let record = PatientRecord::try_from(fields)
                .map_err(|source| StoreError::Corrupt { id: id.clone(), source })?;
            patients.insert(id, record);
        }

        tracing::debug!(path = %self.path.display(), count = patients.len(), "loaded patients");
        Ok(patients)
    }

    fn save(&self, patients: &Collection) -> StoreResult<()> {
        let json = serde_json::to_vec(patients)?;
        let staging = self.staging_path();
        fs::write(&staging, json)?;
        fs::rename(&staging, &self.path)?;

        tracing::debug!(path = %self.path.display(), count = patients.len(), "saved patients");
        Ok(())
    }
}
