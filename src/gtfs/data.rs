use crate::gtfs::{GtfsCalendar, GtfsRoute, GtfsShape, GtfsStop, GtfsStopTime, GtfsTrip};

/// The typed tables of a feed, ready to be turned into a repository.
#[derive(Default, Debug, Clone)]
pub struct GtfsData {
    pub stops: Vec<GtfsStop>,
    pub routes: Vec<GtfsRoute>,
    pub trips: Vec<GtfsTrip>,
    pub stop_times: Vec<GtfsStopTime>,
    pub calendar: Vec<GtfsCalendar>,
    pub shapes: Vec<GtfsShape>,
}

impl GtfsData {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }
}
