use std::sync::Arc;

use crate::{
    gtfs::{GtfsRoute, GtfsStop},
    shared::Coordinate,
};

/// A physical point where passengers can board or alight from a vehicle.
#[derive(Debug, Default, Clone)]
pub struct Stop {
    /// The global internal index used for O(1) array lookups in the repository.
    pub index: u32,
    /// Unique external identifier for the stop.
    pub id: Arc<str>,
    /// Human-readable name (e.g., "Central Station, Platform 2").
    pub name: Option<Arc<str>>,
    /// Identifier of the station grouping co-located platforms.
    pub parent_station: Option<Arc<str>>,
    /// GTFS `location_type`, 0 when the feed leaves it empty.
    pub location_type: u8,
}

impl Stop {
    /// The display name, or the id when the feed did not name the stop.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }

    /// Only platforms (boarding points) take part in station transfers.
    /// Stations, entrances and other nodes do not.
    pub fn is_platform(&self) -> bool {
        self.location_type == 0
    }
}

impl From<GtfsStop> for Stop {
    fn from(value: GtfsStop) -> Self {
        Self {
            index: u32::MAX,
            id: value.stop_id.into(),
            name: value.stop_name.map(|val| val.into()),
            parent_station: value.parent_station.map(|val| val.into()),
            location_type: value.location_type.unwrap_or_default(),
        }
    }
}

/// A grouping of trips that are displayed to riders under a single name (e.g., "Blue Line").
#[derive(Debug, Default, Clone)]
pub struct Route {
    pub index: u32,
    pub id: Arc<str>,
    pub short_name: Option<Arc<str>>,
    pub long_name: Option<Arc<str>>,
    /// Hex color as given in the feed, without `#`.
    pub color: Option<Arc<str>>,
}

impl Route {
    pub fn display_name(&self) -> Option<&str> {
        self.short_name.as_deref().or(self.long_name.as_deref())
    }

    /// The color as a css hex string, e.g. `#FF0000`.
    pub fn display_color(&self) -> Option<String> {
        self.color.as_ref().map(|color| format!("#{color}"))
    }
}

impl From<GtfsRoute> for Route {
    fn from(value: GtfsRoute) -> Self {
        Self {
            index: u32::MAX,
            id: value.route_id.into(),
            short_name: value.route_short_name.map(|val| val.into()),
            long_name: value.route_long_name.map(|val| val.into()),
            color: value.route_color.map(|val| val.into()),
        }
    }
}

/// A specific journey taken by a vehicle through a sequence of stops.
#[derive(Debug, Default, Clone)]
pub struct Trip {
    pub index: u32,
    pub id: Arc<str>,
    pub service_id: Arc<str>,
    pub route_id: Arc<str>,
    /// Pointer to the service calendar, `None` if the service is not in the calendar.
    pub calendar_idx: Option<u32>,
    /// Pointer to the parent [`Route`].
    pub route_idx: Option<u32>,
    /// Pointer to the [`Shape`] the trip is drawn with, if the feed has one.
    pub shape_idx: Option<u32>,
}

/// The line a trip draws on a map.
#[derive(Debug, Default, Clone)]
pub struct Shape {
    pub index: u32,
    pub id: Arc<str>,
    /// Ordered by `shape_pt_sequence`.
    pub points: Box<[Coordinate]>,
}
