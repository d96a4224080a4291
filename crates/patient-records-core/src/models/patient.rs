//! Patient models.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

use super::metrics::{self, Verdict};
use super::validation::{
    check_age, check_positive, check_text, required, Constraint, ValidationError,
    ValidationResult,
};

/// All patients keyed by id. Iteration is in ascending id order.
pub type Collection = BTreeMap<String, PatientRecord>;

/// Gender values accepted on a full record.
pub const GENDERS: &[&str] = &["male", "female", "others"];

/// Patient gender.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Others,
}

impl Gender {
    /// Parse an exact lowercase gender value.
    pub fn parse(value: &str) -> ValidationResult<Self> {
        match value {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "others" => Ok(Gender::Others),
            _ => Err(ValidationError::new(
                "gender",
                Constraint::NotOneOf(GENDERS),
            )),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Others => "others",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unvalidated field values for a patient, as received from a client or a store.
///
/// Derived keys (`bmi`, `verdict`) are not part of this shape and are dropped
/// on deserialization. Values are strictly typed: `"age": 30.0` or
/// `"height": "1.75"` fail deserialization instead of being coerced. A `null`
/// value reads the same as an absent key.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PatientFields {
    pub name: Option<String>,
    pub city: Option<String>,
    pub age: Option<i64>,
    pub gender: Option<String>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
}

/// A validated patient record without its id.
///
/// Fields are read-only; a changed record is produced by
/// [`PatientUpdate::apply`](super::PatientUpdate::apply), never by mutation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "PatientFields")]
pub struct PatientRecord {
    name: String,
    city: String,
    age: u8,
    gender: Gender,
    /// Meters
    height: f64,
    /// Kilograms
    weight: f64,
}

impl PatientRecord {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn age(&self) -> u8 {
        self.age
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Body mass index, rounded to two decimals. Recomputed on every call.
    pub fn bmi(&self) -> f64 {
        metrics::bmi(self.height, self.weight)
    }

    /// BMI band of the rounded BMI.
    pub fn verdict(&self) -> Verdict {
        Verdict::from_bmi(self.bmi())
    }

    /// Back to plain field values, e.g. as the base of a merge.
    pub fn to_fields(&self) -> PatientFields {
        PatientFields {
            name: Some(self.name.clone()),
            city: Some(self.city.clone()),
            age: Some(i64::from(self.age)),
            gender: Some(self.gender.as_str().to_string()),
            height: Some(self.height),
            weight: Some(self.weight),
        }
    }
}

impl TryFrom<PatientFields> for PatientRecord {
    type Error = ValidationError;

    fn try_from(fields: PatientFields) -> ValidationResult<Self> {
        let name = required("name", fields.name)?;
        check_text("name", &name)?;

        let city = required("city", fields.city)?;
        check_text("city", &city)?;

        let age = check_age(required("age", fields.age)?)?;

        let gender = Gender::parse(&required("gender", fields.gender)?)?;

        let height = required("height", fields.height)?;
        check_positive("height", height)?;

        let weight = required("weight", fields.weight)?;
        check_positive("weight", weight)?;

        if !metrics::bmi(height, weight).is_finite() {
            return Err(ValidationError::new("height", Constraint::BmiNotFinite));
        }

        Ok(Self {
            name,
            city,
            age,
            gender,
            height,
            weight,
        })
    }
}

/// Serialized shape of a record: stored fields plus freshly derived ones.
#[derive(Serialize)]
struct RecordView<'a> {
    name: &'a str,
    city: &'a str,
    age: u8,
    gender: Gender,
    height: f64,
    weight: f64,
    bmi: f64,
    verdict: Verdict,
}

impl Serialize for PatientRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        RecordView {
            name: &self.name,
            city: &self.city,
            age: self.age,
            gender: self.gender,
            height: self.height,
            weight: self.weight,
            bmi: self.bmi(),
            verdict: self.verdict(),
        }
        .serialize(serializer)
    }
}

/// A validated record together with its id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Patient {
    pub id: String,
    #[serde(flatten)]
    pub record: PatientRecord,
}

impl Patient {
    /// Validate candidate fields under the given id.
    pub fn new(id: impl Into<String>, fields: PatientFields) -> ValidationResult<Self> {
        let id = id.into();
        check_text("id", &id)?;
        Ok(Self {
            id,
            record: PatientRecord::try_from(fields)?,
        })
    }
}

/// Creation request: an id plus candidate fields, as posted by a client.
///
/// An explicit `null` field is reported as [`Constraint::Missing`], since a
/// full record has no field to leave unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NewPatient {
    pub id: Option<String>,
    #[serde(flatten)]
    pub fields: PatientFields,
}

impl NewPatient {
    /// Split into id and candidate fields. A missing id is reported like any
    /// other missing field; the fields themselves are validated on create.
    pub fn into_parts(self) -> ValidationResult<(String, PatientFields)> {
        Ok((required("id", self.id)?, self.fields))
    }
}

#[cfg(test)]
pub(crate) fn sample_fields() -> PatientFields {
    PatientFields {
        name: Some("Ali Khan".into()),
        city: Some("Islamabad".into()),
        age: Some(30),
        gender: Some("male".into()),
        height: Some(1.75),
        weight: Some(70.0),
    }
}

#[cfg(test)]
pub(crate) fn patient_sample() -> PatientRecord {
    PatientRecord::try_from(sample_fields()).unwrap()
}
