use std::sync::Arc;

use chrono::Weekday;

use crate::{
    gtfs::GtfsCalendar,
    repository::Repository,
    shared::ServiceDate,
};

/// The days a service runs on: a date range plus a weekly pattern.
#[derive(Debug, Default, Clone)]
pub struct Calendar {
    pub index: u32,
    pub service_id: Arc<str>,
    /// First active day, `YYYYMMDD`.
    pub start_date: u32,
    /// Last active day, `YYYYMMDD`, inclusive.
    pub end_date: u32,
    /// Monday first.
    pub weekdays: [bool; 7],
}

impl Calendar {
    pub fn is_active_on(&self, date: ServiceDate) -> bool {
        let day = date.as_yyyymmdd();
        if day < self.start_date || day > self.end_date {
            return false;
        }
        self.runs_on(date.weekday())
    }

    pub fn runs_on(&self, weekday: Weekday) -> bool {
        self.weekdays[weekday.num_days_from_monday() as usize]
    }
}

impl From<GtfsCalendar> for Calendar {
    fn from(value: GtfsCalendar) -> Self {
        Self {
            index: u32::MAX,
            service_id: value.service_id.into(),
            start_date: value.start_date,
            end_date: value.end_date,
            weekdays: [
                value.monday == 1,
                value.tuesday == 1,
                value.wednesday == 1,
                value.thursday == 1,
                value.friday == 1,
                value.saturday == 1,
                value.sunday == 1,
            ],
        }
    }
}

impl Repository {
    /// Whether the service runs on the given date.
    /// Services missing from the calendar never run.
    pub fn is_service_active(&self, service_id: &str, date: ServiceDate) -> bool {
        self.calendar_by_service_id(service_id)
            .is_some_and(|calendar| calendar.is_active_on(date))
    }
}
