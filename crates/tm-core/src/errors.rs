//! Validation errors shared across the template matching crates.
//!
//! Domain-specific errors (e.g., `DatabaseError`, `ApiError`) are defined in
//! their respective crates. `DataSpecError` lives here because every layer
//! that builds a `DataSpecification` can raise it.

use chrono::NaiveDate;
use thiserror::Error;

/// A `DataSpecification` failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataSpecError {
    /// A date bound lies after the current date.
    #[error("{field}: dates cannot be in the future (got {date})")]
    FutureDate { field: &'static str, date: NaiveDate },

    /// Both bounds are set and the range is inverted.
    #[error("date_from must be <= date_to (got {date_from} > {date_to})")]
    DateOrder {
        date_from: NaiveDate,
        date_to: NaiveDate,
    },
}

impl DataSpecError {
    /// Names of the offending input fields.
    #[must_use]
    pub fn fields(&self) -> Vec<&'static str> {
        match self {
            Self::FutureDate { field, .. } => vec![*field],
            Self::DateOrder { .. } => vec!["date_from", "date_to"],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn future_date_names_its_field() {
        let err = DataSpecError::FutureDate {
            field: "date_to",
            date: NaiveDate::from_ymd_opt(2100, 1, 1).unwrap(),
        };
        assert_eq!(err.fields(), vec!["date_to"]);
        assert_eq!(
            err.to_string(),
            "date_to: dates cannot be in the future (got 2100-01-01)"
        );
    }

    #[test]
    fn date_order_names_both_fields() {
        let err = DataSpecError::DateOrder {
            date_from: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            date_to: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        };
        assert_eq!(err.fields(), vec!["date_from", "date_to"]);
    }
}
