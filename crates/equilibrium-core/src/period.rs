//! The canonical fiscal-period index.
//!
//! Every derived series in the pipeline is keyed by a [`Period`]: the
//! quarter-end date a reporting label resolves to. Two label forms exist in
//! the source feeds: fiscal-quarter labels on statement sheets ("Q1 2017")
//! and observation dates on treasury exports ("2017-04-01"). Both map onto
//! the same calendar convention so the series can be joined.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ModelError, Result};

/// A canonical fiscal-quarter-end date.
///
/// `Period`s are totally ordered by calendar date and serialize as ISO
/// dates, so they sort and join identically in memory and on disk.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Period(NaiveDate);

impl Period {
    /// Creates a period from an already-canonical date.
    #[must_use]
    pub const fn from_date(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Parses a fiscal-quarter label of the form `"Q<n> <year>"`.
    ///
    /// The label maps to the quarter's end month under the reporting
    /// convention of the source feeds:
    ///
    /// - `Q1 2017` → 2016-12-01
    /// - `Q2 2017` → 2017-03-01
    /// - `Q3 2017` → 2017-06-01
    /// - `Q4 2017` → 2017-09-01
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Parse`] for any quarter digit outside 1-4 or a
    /// malformed label.
    pub fn from_quarter_label(label: &str) -> Result<Self> {
        let bad = || ModelError::Parse(format!("unrecognized quarter label: {label:?}"));

        let rest = label.trim().strip_prefix('Q').ok_or_else(bad)?;
        let (quarter, year) = rest.split_once(' ').ok_or_else(bad)?;
        let quarter: u32 = quarter.parse().map_err(|_| bad())?;
        let year: i32 = year.trim().parse().map_err(|_| bad())?;

        let (year, month) = match quarter {
            1 => (year - 1, 12),
            2 => (year, 3),
            3 => (year, 6),
            4 => (year, 9),
            _ => return Err(bad()),
        };
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(Self)
            .ok_or_else(bad)
    }

    /// Parses a treasury observation date with a `YYYY-MM` prefix.
    ///
    /// The observation month is shifted forward by two months onto the
    /// filing quarter's end month: `2017-04-01` → 2017-06-01, `2016-10-01`
    /// → 2016-12-01.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Parse`] on a malformed prefix, or when the
    /// shifted month would fall past December (the source series only
    /// observes quarter-start months).
    pub fn from_observation_date(date: &str) -> Result<Self> {
        let bad = || ModelError::Parse(format!("unrecognized observation date: {date:?}"));

        let date = date.trim();
        let (year, rest) = date.split_once('-').ok_or_else(bad)?;
        let month = rest.get(..2).ok_or_else(bad)?;
        let year: i32 = year.parse().map_err(|_| bad())?;
        let month: u32 = month.parse().map_err(|_| bad())?;

        NaiveDate::from_ymd_opt(year, month + 2, 1)
            .map(Self)
            .ok_or_else(bad)
    }

    /// Returns the underlying calendar date.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.0
    }

    /// Returns the date as days since the Unix epoch, the physical
    /// representation of a polars `Date` column.
    #[must_use]
    pub fn days_since_epoch(&self) -> i32 {
        // `NaiveDate::default()` is 1970-01-01.
        (self.0 - NaiveDate::default()).num_days() as i32
    }

    /// Returns the calendar year of the period-end date.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.0.year()
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<NaiveDate> for Period {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}
