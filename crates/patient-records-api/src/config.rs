//! Runtime configuration.
//!
//! Resolved once at startup from the environment and passed into the server.
//! Request handlers never read environment variables.

use std::path::PathBuf;

use patient_records_core::store::DEFAULT_JSON_PATH;
use patient_records_core::{JsonFileStore, MemoryStore, PatientStore, SqliteStore, StoreError};
use thiserror::Error;

pub const ENV_ADDR: &str = "PATIENT_API_ADDR";
pub const ENV_STORE: &str = "PATIENT_STORE";
pub const ENV_DATA_PATH: &str = "PATIENT_DATA_PATH";

pub const DEFAULT_ADDR: &str = "0.0.0.0:8000";
pub const DEFAULT_SQLITE_PATH: &str = "patients.db";

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("unknown PATIENT_STORE value {0:?}, expected one of json, sqlite, memory")]
    UnknownStore(String),
    #[error("PATIENT_DATA_PATH cannot be empty")]
    EmptyDataPath,
    #[error("PATIENT_API_ADDR cannot be empty")]
    EmptyAddr,
}

/// Where patients are persisted.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreConfig {
    Json(PathBuf),
    Sqlite(PathBuf),
    Memory,
}

impl StoreConfig {
    /// Open the configured store.
    pub fn open(&self) -> Result<Box<dyn PatientStore>, StoreError> {
        let store: Box<dyn PatientStore> = match self {
            StoreConfig::Json(path) => Box::new(JsonFileStore::new(path)),
            StoreConfig::Sqlite(path) => Box::new(SqliteStore::open(path)?),
            StoreConfig::Memory => Box::new(MemoryStore::new()),
        };
        Ok(store)
    }
}

/// API server configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    pub addr: String,
    pub store: StoreConfig,
}

impl ApiConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let addr = lookup(ENV_ADDR).unwrap_or_else(|| DEFAULT_ADDR.into());
        if addr.trim().is_empty() {
            return Err(ConfigError::EmptyAddr);
        }

        let path = match lookup(ENV_DATA_PATH) {
            Some(path) if path.trim().is_empty() => return Err(ConfigError::EmptyDataPath),
            other => other.map(PathBuf::from),
        };

        let kind = lookup(ENV_STORE).unwrap_or_else(|| "json".into());
        let store = match kind.to_lowercase().as_str() {
            "json" => StoreConfig::Json(path.unwrap_or_else(|| DEFAULT_JSON_PATH.into())),
            "sqlite" => StoreConfig::Sqlite(path.unwrap_or_else(|| DEFAULT_SQLITE_PATH.into())),
            "memory" => StoreConfig::Memory,
            _ => return Err(ConfigError::UnknownStore(kind)),
        };

        Ok(Self { addr, store })
    }
}
