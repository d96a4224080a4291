//! Partial patient updates and the merge onto an existing record.

use serde::{Deserialize, Deserializer, Serialize};

use super::patient::{Patient, PatientFields, PatientRecord};
use super::validation::{
    check_age, check_positive, check_text, Constraint, ValidationError, ValidationResult,
};

/// Gender values accepted in a partial update. Narrower than a full record.
pub const UPDATE_GENDERS: &[&str] = &["male", "female"];

/// A sparse edit of a patient record.
///
/// Each field is tri-state: `None` when the key is absent (leave unchanged),
/// `Some(None)` when it is present as `null`, `Some(Some(v))` when set.
/// `bmi`/`verdict` keys are not part of the shape and are dropped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatientUpdate {
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub city: Option<Option<String>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub age: Option<Option<i64>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub gender: Option<Option<String>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub height: Option<Option<f64>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub weight: Option<Option<f64>>,
}

/// Mark a key that appeared in the input as present, even when its value is null.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Resolve a present field to its value, rejecting explicit nulls.
fn set<'a, T>(
    field: &'static str,
    value: &'a Option<Option<T>>,
) -> ValidationResult<Option<&'a T>> {
    match value {
        None => Ok(None),
        Some(None) => Err(ValidationError::new(field, Constraint::Null)),
        Some(Some(v)) => Ok(Some(v)),
    }
}

impl PatientUpdate {
    /// True when no field is present.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.city.is_none()
            && self.age.is_none()
            && self.gender.is_none()
            && self.height.is_none()
            && self.weight.is_none()
    }

    /// Check each present field on its own, in record field order.
    pub fn validate(&self) -> ValidationResult<()> {
        if let Some(name) = set("name", &self.name)? {
            check_text("name", name)?;
        }
        if let Some(city) = set("city", &self.city)? {
            check_text("city", city)?;
        }
        if let Some(age) = set("age", &self.age)? {
            check_age(*age)?;
        }
        if let Some(gender) = set("gender", &self.gender)? {
            if !UPDATE_GENDERS.contains(&gender.as_str()) {
                return Err(ValidationError::new(
                    "gender",
                    Constraint::NotOneOf(UPDATE_GENDERS),
                ));
            }
        }
        if let Some(height) = set("height", &self.height)? {
            check_positive("height", *height)?;
        }
        if let Some(weight) = set("weight", &self.weight)? {
            check_positive("weight", *weight)?;
        }
        Ok(())
    }

    /// Merge onto `existing`, stored under `id`, and validate the result as a full record.
    ///
    /// Present fields override, absent fields keep the existing value. The id always
    /// comes from the caller's key. Derived values are recomputed from the merged
    /// height and weight. On any failure nothing is produced.
    pub fn apply(&self, id: &str, existing: &PatientRecord) -> ValidationResult<Patient> {
        self.validate()?;

        let base = existing.to_fields();
        let merged = PatientFields {
            name: overlay(&self.name, base.name),
            city: overlay(&self.city, base.city),
            age: overlay(&self.age, base.age),
            gender: overlay(&self.gender, base.gender),
            height: overlay(&self.height, base.height),
            weight: overlay(&self.weight, base.weight),
        };

        Patient::new(id, merged)
    }
}

fn overlay<T: Clone>(update: &Option<Option<T>>, base: Option<T>) -> Option<T> {
    match update {
        Some(value) => value.clone(),
        None => base,
    }
}
