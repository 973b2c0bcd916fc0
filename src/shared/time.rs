use std::{
    fmt::Display,
    ops::{Add, AddAssign, Sub},
};

use chrono::{Local, Timelike};
use serde::{Serialize, Serializer};

/// Seconds since midnight of the service day.
/// Trips running past midnight keep counting, so values above 86400 are valid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Time(u32);

/// Stands in for an unreached label.
pub const MAX: Time = Time(u32::MAX);

impl From<u32> for Time {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl Sub<Time> for Time {
    type Output = Duration;

    /// Saturates at zero when `rhs` is later.
    fn sub(self, rhs: Self) -> Self::Output {
        Duration(self.0.saturating_sub(rhs.0))
    }
}

impl Add<Duration> for Time {
    type Output = Self;

    fn add(self, rhs: Duration) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign<Duration> for Time {
    fn add_assign(&mut self, rhs: Duration) {
        self.0 = self.0.saturating_add(rhs.0)
    }
}

impl Display for Time {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let h = self.0 / 3600;
        let m = (self.0 % 3600) / 60;
        let s = self.0 % 60;
        write!(f, "{:02}:{:02}:{:02}", h, m, s)
    }
}

impl Serialize for Time {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl Time {
    pub fn now() -> Self {
        let now = Local::now();
        Self(now.num_seconds_from_midnight())
    }

    pub const fn from_seconds(secs: u32) -> Self {
        Self(secs)
    }

    pub const fn as_seconds(&self) -> u32 {
        self.0
    }

    /// Renders `HH:MM:SS`. Hours are not wrapped, 25:10:00 stays 25:10:00.
    pub fn to_hms_string(&self) -> String {
        self.to_string()
    }

    /// Parses the GTFS clock format `H:MM:SS`.
    /// The hour part can have any number of digits and may exceed 23.
    pub fn from_hms(time: &str) -> Option<Self> {
        const HOUR_TO_SEC: u32 = 60 * 60;
        const MINUTE_TO_SEC: u32 = 60;
        let mut split = time.trim().split(':');
        let hours = parse_digits(split.next()?, None)?;
        let minutes = parse_digits(split.next()?, Some(2))?;
        let seconds = parse_digits(split.next()?, Some(2))?;
        if split.next().is_some() {
            return None;
        }
        let seconds = hours
            .checked_mul(HOUR_TO_SEC)?
            .checked_add(minutes * MINUTE_TO_SEC)?
            .checked_add(seconds)?;
        Some(Self(seconds))
    }
}

fn parse_digits(part: &str, width: Option<usize>) -> Option<u32> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if let Some(width) = width
        && part.len() != width
    {
        return None;
    }
    part.parse().ok()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Duration(u32);

impl From<u32> for Duration {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl Duration {
    pub const fn from_seconds(secs: u32) -> Self {
        Self(secs)
    }

    pub const fn from_minutes(minutes: u32) -> Self {
        Self(minutes * 60)
    }

    pub const fn as_seconds(&self) -> u32 {
        self.0
    }
}

impl Serialize for Duration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.0)
    }
}

#[test]
fn parse_unparse_1() {
    let time = "00:00:00";
    let stime = Time::from_hms(time).unwrap();
    assert_eq!(time, stime.to_hms_string())
}

#[test]
fn parse_unparse_2() {
    let time = "12:30:30";
    let stime = Time::from_hms(time).unwrap();
    assert_eq!(time, stime.to_hms_string())
}

#[test]
fn parse_unparse_past_midnight() {
    let time = "25:10:00";
    let stime = Time::from_hms(time).unwrap();
    assert_eq!(stime.as_seconds(), 90600);
    assert_eq!(time, stime.to_hms_string())
}

#[test]
fn valid_time_test_1() {
    let time = "00:01:30";
    assert_eq!(Time::from_hms(time).unwrap().as_seconds(), 90);
}

#[test]
fn valid_time_test_2() {
    let time = "01:01:30";
    assert_eq!(Time::from_hms(time).unwrap().as_seconds(), 3690);
}

#[test]
fn valid_time_single_digit_hour() {
    let time = " 7:05:00";
    assert_eq!(Time::from_hms(time).unwrap().as_seconds(), 25500);
}

#[test]
fn invalid_time_test_1() {
    let time = "00:00:0a";
    assert!(Time::from_hms(time).is_none())
}

#[test]
fn invalid_time_test_2() {
    let time = "00:00";
    assert!(Time::from_hms(time).is_none())
}

#[test]
fn invalid_time_test_3() {
    assert!(Time::from_hms("12:5:00").is_none());
    assert!(Time::from_hms("12:05:00:00").is_none());
    assert!(Time::from_hms("-1:05:00").is_none());
    assert!(Time::from_hms("").is_none());
}

#[test]
fn invalid_time_overflow() {
    assert!(Time::from_hms("99999999:00:00").is_none())
}

#[test]
fn formats_morning_time() {
    assert_eq!(Time::from_seconds(28000).to_hms_string(), "07:46:40");
}

#[test]
fn difference_saturates_at_zero() {
    let early = Time::from_seconds(28800);
    let late = Time::from_seconds(29400);
    assert_eq!((late - early).as_seconds(), 600);
    assert_eq!((early - late).as_seconds(), 0);
    assert_eq!((MAX + Duration::from_seconds(5)).as_seconds(), u32::MAX);
}
