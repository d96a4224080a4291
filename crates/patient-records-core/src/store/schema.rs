//! SQLite schema definition.

/// Schema for the SQLite-backed patient store.
pub const SCHEMA: &str = r#"
-- ============================================================================
-- Patients
-- ============================================================================

-- bmi and verdict are derived from height/weight and never stored.
CREATE TABLE IF NOT EXISTS patients (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    city TEXT NOT NULL,
    age INTEGER NOT NULL,
    gender TEXT NOT NULL,
    height REAL NOT NULL,                        -- meters
    weight REAL NOT NULL                         -- kilograms
);
"#;
