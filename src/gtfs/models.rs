use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct GtfsStop {
    pub stop_id: String,
    pub stop_name: Option<String>,
    pub location_type: Option<u8>,
    pub parent_station: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct GtfsRoute {
    pub route_id: String,
    pub route_short_name: Option<String>,
    pub route_long_name: Option<String>,
    /// Hex color without the leading `#`.
    pub route_color: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct GtfsTrip {
    pub route_id: String,
    pub service_id: String,
    pub trip_id: String,
    #[serde(default)]
    pub shape_id: Option<String>,
}

/// One row of `stop_times.txt`.
/// Times are kept as raw clock strings, parsing happens while building the graph.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct GtfsStopTime {
    pub trip_id: String,
    pub arrival_time: String,
    pub departure_time: String,
    pub stop_id: String,
    pub stop_sequence: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct GtfsCalendar {
    pub service_id: String,
    pub monday: u8,
    pub tuesday: u8,
    pub wednesday: u8,
    pub thursday: u8,
    pub friday: u8,
    pub saturday: u8,
    pub sunday: u8,
    /// `YYYYMMDD`
    pub start_date: u32,
    /// `YYYYMMDD`, inclusive
    pub end_date: u32,
}

/// One point of a drawn route line in `shapes.txt`.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct GtfsShape {
    pub shape_id: String,
    pub shape_pt_lat: f64,
    pub shape_pt_lon: f64,
    pub shape_pt_sequence: u32,
}
