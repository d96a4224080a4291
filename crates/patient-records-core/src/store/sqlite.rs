//! SQLite-backed patient store.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::{params, Connection};

use super::{PatientStore, StoreError, StoreResult, SCHEMA};
use crate::models::{Collection, PatientFields, PatientRecord};

/// Patient store over a single SQLite table.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open database at path, creating if needed.
    pub fn open<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        let conn = Connection::open(path)?;
        Self::with_connection(conn)
    }

    /// Create in-memory database (for testing).
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> StoreResult<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

impl PatientStore for SqliteStore {
    fn load(&self) -> StoreResult<Collection> {
        let conn = self.conn.lock()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT id, name, city, age, gender, height, weight
            FROM patients
            ORDER BY id
            "#,
        )?;

        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                PatientFields {
                    name: row.get(1)?,
                    city: row.get(2)?,
                    age: row.get(3)?,
                    gender: row.get(4)?,
                    height: row.get(5)?,
                    weight: row.get(6)?,
                },
            ))
        })?;

        let mut patients = Collection::new();
        for row in rows {
            let (id, fields) = row?;
            let record = PatientRecord::try_from(fields)
                .map_err(|source| StoreError::Corrupt { id: id.clone(), source })?;
            patients.insert(id, record);
        }

        tracing::debug!(count = patients.len(), "loaded patients from sqlite");
        Ok(patients)
    }

    fn save(&self, patients: &Collection) -> StoreResult<()> {
        let mut conn = self.conn.lock()?;
        let tx = conn.transaction()?;

        tx.execute("DELETE FROM patients", [])?;
        {
            let mut insert = tx.prepare(
                r#"
                INSERT INTO patients (id, name, city, age, gender, height, weight)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                "#,
            )?;
            for (id, record) in patients {
                insert.execute(params![
                    id,
                    record.name(),
                    record.city(),
                    record.age(),
                    record.gender().as_str(),
                    record.height(),
                    record.weight(),
                ])?;
            }
        }
        tx.commit()?;

        tracing::debug!(count = patients.len(), "saved patients to sqlite");
        Ok(())
    }
}
