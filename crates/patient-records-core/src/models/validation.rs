//! Field validation shared by full records and partial updates.

use std::fmt;

use thiserror::Error;

/// Constraint a field value failed.
#[derive(Debug, Clone, PartialEq)]
pub enum Constraint {
    /// Field absent from the input.
    Missing,
    /// Field present but explicitly null.
    Null,
    /// String empty or whitespace-only.
    Empty,
    /// Integer outside an exclusive range.
    OutOfRange { min: i64, max: i64 },
    /// Number not strictly positive.
    NotPositive,
    /// NaN or infinite.
    NotFinite,
    /// Value outside an enumerated set.
    NotOneOf(&'static [&'static str]),
    /// Height/weight combination yields a non-finite BMI.
    BmiNotFinite,
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constraint::Missing => f.write_str("field required"),
            Constraint::Null => f.write_str("must not be null"),
            Constraint::Empty => f.write_str("must not be empty"),
            Constraint::OutOfRange { min, max } => {
                write!(f, "must be greater than {} and less than {}", min, max)
            }
            Constraint::NotPositive => f.write_str("must be greater than 0"),
            Constraint::NotFinite => f.write_str("must be a finite number"),
            Constraint::NotOneOf(allowed) => {
                write!(f, "must be one of [{}]", allowed.join(", "))
            }
            Constraint::BmiNotFinite => f.write_str("too small to derive a finite bmi"),
        }
    }
}

/// A field value violated a record constraint.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("invalid {field}: {constraint}")]
pub struct ValidationError {
    pub field: &'static str,
    pub constraint: Constraint,
}

impl ValidationError {
    pub fn new(field: &'static str, constraint: Constraint) -> Self {
        Self { field, constraint }
    }
}

pub type ValidationResult<T> = Result<T, ValidationError>;

/// Exclusive bounds on `age`.
pub const AGE_MIN_EXCLUSIVE: i64 = 0;
pub const AGE_MAX_EXCLUSIVE: i64 = 120;

pub(crate) fn check_text(field: &'static str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(field, Constraint::Empty));
    }
    Ok(())
}

/// Check the exclusive age range, narrowing to the stored width.
pub(crate) fn check_age(age: i64) -> ValidationResult<u8> {
    let out_of_range = || {
        ValidationError::new(
            "age",
            Constraint::OutOfRange {
                min: AGE_MIN_EXCLUSIVE,
                max: AGE_MAX_EXCLUSIVE,
            },
        )
    };
    if age <= AGE_MIN_EXCLUSIVE || age >= AGE_MAX_EXCLUSIVE {
        return Err(out_of_range());
    }
    u8::try_from(age).map_err(|_| out_of_range())
}

pub(crate) fn check_positive(field: &'static str, value: f64) -> ValidationResult<()> {
    if !value.is_finite() {
        return Err(ValidationError::new(field, Constraint::NotFinite));
    }
    if value <= 0.0 {
        return Err(ValidationError::new(field, Constraint::NotPositive));
    }
    Ok(())
}

/// Unwrap a required field, reporting absence.
pub(crate) fn required<T>(field: &'static str, value: Option<T>) -> ValidationResult<T> {
    value.ok_or_else(|| ValidationError::new(field, Constraint::Missing))
}
