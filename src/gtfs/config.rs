/// File names read from a feed, relative to the archive or directory root.
#[derive(Debug, Clone)]
pub struct Config {
    pub stops_path: String,
    pub routes_path: String,
    pub trips_path: String,
    pub stop_times_path: String,
    pub calendar_path: String,
    /// Optional, a feed without it simply has no route lines.
    pub shapes_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            stops_path: "stops.txt".into(),
            routes_path: "routes.txt".into(),
            trips_path: "trips.txt".into(),
            stop_times_path: "stop_times.txt".into(),
            calendar_path: "calendar.txt".into(),
            shapes_path: "shapes.txt".into(),
        }
    }
}
