#![allow(dead_code)]

use ferroute::{
    gtfs::{GtfsCalendar, GtfsData, GtfsRoute, GtfsShape, GtfsStop, GtfsStopTime, GtfsTrip},
    prelude::*,
};

pub const EVERY_DAY: [u8; 7] = [1, 1, 1, 1, 1, 1, 1];
pub const WEEKDAYS: [u8; 7] = [1, 1, 1, 1, 1, 0, 0];

/// 2024-03-15, a friday.
pub fn friday() -> ServiceDate {
    ServiceDate::from_ymd(2024, 3, 15).unwrap()
}

/// 2024-03-16, a saturday.
pub fn saturday() -> ServiceDate {
    ServiceDate::from_ymd(2024, 3, 16).unwrap()
}

pub fn hms(time: &str) -> Time {
    Time::from_hms(time).unwrap()
}

/// Small in memory feed builder.
#[derive(Default)]
pub struct Feed {
    data: GtfsData,
}

impl Feed {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn stop(mut self, id: &str, name: &str) -> Self {
        self.data.stops.push(GtfsStop {
            stop_id: id.into(),
            stop_name: Some(name.into()),
            location_type: Some(0),
            parent_station: None,
        });
        self
    }

    pub fn platform(mut self, id: &str, name: &str, parent_station: &str) -> Self {
        self.data.stops.push(GtfsStop {
            stop_id: id.into(),
            stop_name: Some(name.into()),
            location_type: Some(0),
            parent_station: Some(parent_station.into()),
        });
        self
    }

    /// Adds a non platform location, e.g. an entrance (`2`) or a node (`3`).
    pub fn location(mut self, id: &str, location_type: u8, parent_station: &str) -> Self {
        self.data.stops.push(GtfsStop {
            stop_id: id.into(),
            stop_name: None,
            location_type: Some(location_type),
            parent_station: Some(parent_station.into()),
        });
        self
    }

    pub fn route(mut self, id: &str, short_name: &str, color: &str) -> Self {
        self.data.routes.push(GtfsRoute {
            route_id: id.into(),
            route_short_name: Some(short_name.into()),
            route_long_name: None,
            route_color: Some(color.into()),
        });
        self
    }

    pub fn service(mut self, id: &str, days: [u8; 7], start_date: u32, end_date: u32) -> Self {
        self.data.calendar.push(GtfsCalendar {
            service_id: id.into(),
            monday: days[0],
            tuesday: days[1],
            wednesday: days[2],
            thursday: days[3],
            friday: days[4],
            saturday: days[5],
            sunday: days[6],
            start_date,
            end_date,
        });
        self
    }

    /// Adds a trip and its calls as `(stop, arrival, departure)`, in sequence order.
    pub fn trip(mut self, id: &str, route_id: &str, service_id: &str, calls: &[(&str, &str, &str)]) -> Self {
        self.data.trips.push(GtfsTrip {
            route_id: route_id.into(),
            service_id: service_id.into(),
            trip_id: id.into(),
            shape_id: None,
        });
        self.calls(id, calls)
    }

    /// Adds a shape from `(lat, lon)` points, given in drawing order.
    pub fn shape(mut self, id: &str, points: &[(f64, f64)]) -> Self {
        points.iter().enumerate().for_each(|(i, (lat, lon))| {
            self.data.shapes.push(GtfsShape {
                shape_id: id.into(),
                shape_pt_lat: *lat,
                shape_pt_lon: *lon,
                shape_pt_sequence: i as u32 + 1,
            })
        });
        self
    }

    /// Draws an already added trip with the given shape.
    pub fn drawn_as(mut self, trip_id: &str, shape_id: &str) -> Self {
        self.data
            .trips
            .iter_mut()
            .filter(|trip| trip.trip_id == trip_id)
            .for_each(|trip| trip.shape_id = Some(shape_id.into()));
        self
    }

    /// Adds stop times without a matching row in the trip table.
    pub fn calls(mut self, trip_id: &str, calls: &[(&str, &str, &str)]) -> Self {
        calls
            .iter()
            .enumerate()
            .for_each(|(i, (stop_id, arrival, departure))| {
                self.data.stop_times.push(GtfsStopTime {
                    trip_id: trip_id.into(),
                    arrival_time: (*arrival).into(),
                    departure_time: (*departure).into(),
                    stop_id: (*stop_id).into(),
                    stop_sequence: i as u32 + 1,
                })
            });
        self
    }

    pub fn data(self) -> GtfsData {
        self.data
    }

    pub fn build(self) -> Repository {
        Repository::new().with_data(self.data)
    }
}

/// Two stops and a single weekday trip from `A` at 08:00:00 to `B` at 08:10:00.
pub fn single_hop() -> Feed {
    Feed::new()
        .stop("A", "Alpha")
        .stop("B", "Bravo")
        .route("M1", "M1", "FF0000")
        .service("WK", WEEKDAYS, 20240101, 20241231)
        .trip(
            "T1",
            "M1",
            "WK",
            &[("A", "08:00:00", "08:00:00"), ("B", "08:10:00", "08:10:00")],
        )
}
