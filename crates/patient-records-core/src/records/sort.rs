//! Sort query contract.

use std::str::FromStr;

use super::RecordsError;
use crate::models::{Patient, PatientRecord};

/// Values accepted for `sort_by`.
pub const SORT_FIELDS: &[&str] = &["height", "weight", "bmi"];
/// Values accepted for `order`.
pub const SORT_ORDERS: &[&str] = &["asc", "desc"];

/// Numeric field a collection can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Height,
    Weight,
    Bmi,
}

impl SortField {
    /// Sort key of a record; `Bmi` is derived fresh.
    pub fn key(&self, record: &PatientRecord) -> f64 {
        match self {
            SortField::Height => record.height(),
            SortField::Weight => record.weight(),
            SortField::Bmi => record.bmi(),
        }
    }
}

impl FromStr for SortField {
    type Err = RecordsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "height" => Ok(SortField::Height),
            "weight" => Ok(SortField::Weight),
            "bmi" => Ok(SortField::Bmi),
            _ => Err(RecordsError::InvalidArgument {
                parameter: "sort_by",
                allowed: SORT_FIELDS,
            }),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SortOrder {
    type Err = RecordsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(RecordsError::InvalidArgument {
                parameter: "order",
                allowed: SORT_ORDERS,
            }),
        }
    }
}

/// Parsed `sort_by`/`order` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortQuery {
    pub field: SortField,
    pub order: SortOrder,
}

impl SortQuery {
    /// Parse raw query values. `sort_by` is checked before `order`; a missing
    /// `order` means ascending.
    pub fn parse(sort_by: &str, order: Option<&str>) -> Result<Self, RecordsError> {
        let field = sort_by.parse()?;
        let order = match order {
            Some(order) => order.parse()?,
            None => SortOrder::default(),
        };
        Ok(Self { field, order })
    }

    /// Order `patients` in place.
    ///
    /// Stable in both directions: records with equal keys keep their incoming
    /// order, which is ascending id when coming from a collection.
    pub fn apply(&self, patients: &mut [Patient]) {
        patients.sort_by(|a, b| {
            let ordering = self
                .field
                .key(&a.record)
                .total_cmp(&self.field.key(&b.record));
            match self.order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_case_insensitive() {
        let query = SortQuery::parse("BMI", Some("Desc")).unwrap();
        assert_eq!(query.field, SortField::Bmi);
        assert_eq!(query.order, SortOrder::Desc);
    }

    #[test]
    fn test_order_defaults_to_asc() {
        let query = SortQuery::parse("height", None).unwrap();
        assert_eq!(query.order, SortOrder::Asc);
    }

    #[test]
    fn test_invalid_field() {
        match SortQuery::parse("age", Some("asc")) {
            Err(RecordsError::InvalidArgument { parameter, allowed }) => {
                assert_eq!(parameter, "sort_by");
                assert_eq!(allowed, SORT_FIELDS);
            }
            other => panic!("expected invalid argument, got {:?}", other),
        }
    }

    #[test]
    fn test_field_checked_before_order() {
        match SortQuery::parse("age", Some("sideways")) {
            Err(RecordsError::InvalidArgument { parameter, .. }) => {
                assert_eq!(parameter, "sort_by")
            }
            other => panic!("expected invalid argument, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_order() {
        match SortQuery::parse("weight", Some("up")) {
            Err(RecordsError::InvalidArgument { parameter, allowed }) => {
                assert_eq!(parameter, "order");
                assert_eq!(allowed, SORT_ORDERS);
            }
            other => panic!("expected invalid argument, got {:?}", other),
        }
    }
}
