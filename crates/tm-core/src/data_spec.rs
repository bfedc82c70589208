//! The data specification filter attached to every workspace.
//!
//! A [`DataSpecification`] constrains synthetic result generation by an
//! optional file type and an optional inclusive date range. It can only be
//! obtained through validation, either explicitly via
//! [`DataSpecificationInput::validate_at`] or implicitly when deserializing
//! (which validates against the local calendar date).

use chrono::{Days, Local, NaiveDate, NaiveDateTime, NaiveTime};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::FileType;
use crate::errors::DataSpecError;

/// Current date on the local calendar.
#[must_use]
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Unvalidated data specification as received from a client or storage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct DataSpecificationInput {
    pub file_type: Option<FileType>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

impl DataSpecificationInput {
    /// Validate against an explicit "today".
    ///
    /// Each date is checked individually before the pair is checked for
    /// ordering, so a future `date_from` is reported as such even if the
    /// range is also inverted.
    ///
    /// # Errors
    ///
    /// Returns [`DataSpecError::FutureDate`] for a bound after `today`, or
    /// [`DataSpecError::DateOrder`] when `date_from > date_to`.
    pub fn validate_at(self, today: NaiveDate) -> Result<DataSpecification, DataSpecError> {
        date_in_present("date_from", self.date_from, today)?;
        date_in_present("date_to", self.date_to, today)?;

        if let (Some(date_from), Some(date_to)) = (self.date_from, self.date_to) {
            if date_from > date_to {
                return Err(DataSpecError::DateOrder { date_from, date_to });
            }
        }

        Ok(DataSpecification {
            file_type: self.file_type,
            date_from: self.date_from,
            date_to: self.date_to,
        })
    }
}

fn date_in_present(
    field: &'static str,
    date: Option<NaiveDate>,
    today: NaiveDate,
) -> Result<(), DataSpecError> {
    match date {
        Some(date) if date > today => Err(DataSpecError::FutureDate { field, date }),
        _ => Ok(()),
    }
}

/// A validated data specification. The default value applies no filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(try_from = "DataSpecificationInput")]
pub struct DataSpecification {
    file_type: Option<FileType>,
    date_from: Option<NaiveDate>,
    date_to: Option<NaiveDate>,
}

impl DataSpecification {
    /// Validate the given bounds against today's date.
    ///
    /// # Errors
    ///
    /// See [`DataSpecificationInput::validate_at`].
    pub fn new(
        file_type: Option<FileType>,
        date_from: Option<NaiveDate>,
        date_to: Option<NaiveDate>,
    ) -> Result<Self, DataSpecError> {
        DataSpecificationInput {
            file_type,
            date_from,
            date_to,
        }
        .validate_at(today())
    }

    #[must_use]
    pub const fn file_type(&self) -> Option<FileType> {
        self.file_type
    }

    #[must_use]
    pub const fn date_from(&self) -> Option<NaiveDate> {
        self.date_from
    }

    #[must_use]
    pub const fn date_to(&self) -> Option<NaiveDate> {
        self.date_to
    }

    /// File types a generated sample may carry.
    #[must_use]
    pub fn eligible_file_types(&self) -> Vec<FileType> {
        self.file_type
            .map_or_else(|| FileType::ALL.to_vec(), |file_type| vec![file_type])
    }

    /// Inclusive day range a generated sample may be dated in.
    ///
    /// A missing bound is replaced by `today`. When only one bound is set and
    /// the substitution inverts the range (e.g. a past `date_to` with no
    /// `date_from`), the range collapses to the single supplied day.
    #[must_use]
    pub fn date_range(&self, today: NaiveDate) -> DateRange {
        match (self.date_from, self.date_to) {
            (Some(from), Some(to)) => DateRange::new(from, to),
            (Some(from), None) => DateRange::new(from, today.max(from)),
            (None, Some(to)) => DateRange::new(today.min(to), to),
            (None, None) => DateRange::new(today, today),
        }
    }
}

impl TryFrom<DataSpecificationInput> for DataSpecification {
    type Error = DataSpecError;

    fn try_from(input: DataSpecificationInput) -> Result<Self, Self::Error> {
        input.validate_at(today())
    }
}

impl From<DataSpecification> for DataSpecificationInput {
    fn from(spec: DataSpecification) -> Self {
        Self {
            file_type: spec.file_type,
            date_from: spec.date_from,
            date_to: spec.date_to,
        }
    }
}

/// Non-empty inclusive range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Build a range; an inverted pair is swapped so the range is never empty.
    #[must_use]
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: start.min(end),
            end: start.max(end),
        }
    }

    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of days in the range, at least 1.
    #[must_use]
    pub fn num_days(&self) -> u64 {
        u64::try_from((self.end - self.start).num_days()).unwrap_or(0) + 1
    }

    /// Midnight of the day `offset` days after the start, clamped to the end.
    #[must_use]
    pub fn midnight_at(&self, offset: u64) -> NaiveDateTime {
        let day = self
            .start
            .checked_add_days(Days::new(offset))
            .map_or(self.end, |day| day.min(self.end));
        day.and_time(NaiveTime::MIN)
    }

    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}
