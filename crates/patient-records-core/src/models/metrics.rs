//! Body metrics derived from height and weight.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lower bound of the `Normal` band.
pub const NORMAL_MIN_BMI: f64 = 18.5;
/// Lower bound of the `Overweight` band.
pub const OVERWEIGHT_MIN_BMI: f64 = 25.0;
/// Lower bound of the `Obese` band.
pub const OBESE_MIN_BMI: f64 = 30.0;

/// Categorical label for a BMI band.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Verdict {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl Verdict {
    /// Band a (rounded) BMI value. Each band includes its lower bound.
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < NORMAL_MIN_BMI {
            Verdict::Underweight
        } else if bmi < OVERWEIGHT_MIN_BMI {
            Verdict::Normal
        } else if bmi < OBESE_MIN_BMI {
            Verdict::Overweight
        } else {
            Verdict::Obese
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Underweight => "Underweight",
            Verdict::Normal => "Normal",
            Verdict::Overweight => "Overweight",
            Verdict::Obese => "Obese",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compute `weight / height²` rounded to two decimal places.
///
/// Rounding is half-to-even on the exact binary value of the ratio: the ratio is
/// formatted with correctly rounded decimal output and parsed back, so `0.125`
/// rounds to `0.12` rather than `0.13`.
pub fn bmi(height_m: f64, weight_kg: f64) -> f64 {
    round2(weight_kg / (height_m * height_m))
}

/// Round to two decimal places, ties to even.
pub fn round2(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{:.2}", value).parse().unwrap_or(value)
}
