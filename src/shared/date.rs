use std::{fmt::Display, str::FromStr};

use chrono::{Datelike, Local, NaiveDate, Weekday};
use serde::{Serialize, Serializer};

use crate::shared;

/// The calendar day a query is planned for.
/// Times in the schedule are offsets from midnight of this day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ServiceDate(NaiveDate);

impl ServiceDate {
    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// The `YYYYMMDD` integer form used by `calendar.txt`.
    pub fn as_yyyymmdd(&self) -> u32 {
        self.0.year() as u32 * 10_000 + self.0.month() * 100 + self.0.day()
    }

    pub fn weekday(&self) -> Weekday {
        self.0.weekday()
    }
}

impl From<NaiveDate> for ServiceDate {
    fn from(value: NaiveDate) -> Self {
        Self(value)
    }
}

/// Accepts `YYYY-MM-DD` and the GTFS `YYYYMMDD` form.
impl FromStr for ServiceDate {
    type Err = shared::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let format = if s.contains('-') { "%Y-%m-%d" } else { "%Y%m%d" };
        NaiveDate::parse_from_str(s, format)
            .map(Self)
            .map_err(|_| shared::Error::InvalidDate(s.to_string()))
    }
}

impl Display for ServiceDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl Serialize for ServiceDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
