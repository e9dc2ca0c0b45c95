//! ISO calendar date value object
//!
//! A calendar date that always renders as `YYYY-MM-DD`. This is the only date
//! shape the flight search API accepts, and the only successful output of the
//! date normalizer.
//!
//! # Examples
//!
//! ```
//! use domain::IsoDate;
//!
//! let date: IsoDate = "2025-03-11".parse().unwrap();
//! assert_eq!(date.to_string(), "2025-03-11");
//!
//! // Only the strict four-two-two form is accepted
//! assert!("2025-3-11".parse::<IsoDate>().is_err());
//! assert!("2025-02-30".parse::<IsoDate>().is_err());
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Format string for ISO calendar dates
pub const ISO_FORMAT: &str = "%Y-%m-%d";

/// A calendar date without time or timezone
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IsoDate(NaiveDate);

impl IsoDate {
    /// Wrap a chrono date
    #[must_use]
    pub const fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Build from year, month and day, validating the calendar date
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, DomainError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or_else(|| DomainError::InvalidDate(format!("{year:04}-{month:02}-{day:02}")))
    }

    /// The underlying chrono date
    #[must_use]
    pub const fn as_naive(&self) -> NaiveDate {
        self.0
    }

    /// Returns true if `input` has the exact `YYYY-MM-DD` shape
    ///
    /// Checks only the character layout, not whether the date exists.
    #[must_use]
    pub fn has_iso_shape(input: &str) -> bool {
        let bytes = input.as_bytes();
        bytes.len() == 10
            && bytes.iter().enumerate().all(|(i, b)| match i {
                4 | 7 => *b == b'-',
                _ => b.is_ascii_digit(),
            })
    }
}

impl FromStr for IsoDate {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if !Self::has_iso_shape(s) {
            return Err(DomainError::InvalidDate(s.to_string()));
        }
        NaiveDate::parse_from_str(s, ISO_FORMAT)
            .map(Self)
            .map_err(|_| DomainError::InvalidDate(s.to_string()))
    }
}

impl From<NaiveDate> for IsoDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl From<IsoDate> for NaiveDate {
    fn from(date: IsoDate) -> Self {
        date.0
    }
}

impl fmt::Display for IsoDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(ISO_FORMAT))
    }
}
