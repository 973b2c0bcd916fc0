use ferroute::prelude::*;
use serde::Serialize;

const FALLBACK_COLOR: &str = "#808080";

/// One route drawn on a map, with every distinct shape its trips follow.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapLineDto {
    pub route_id: String,
    pub route_name: Option<String>,
    pub route_color: String,
    pub shapes: Vec<Vec<Coordinate>>,
}

impl MapLineDto {
    pub fn from(route: &Route, shapes: &[&Shape]) -> Self {
        Self {
            route_id: route.id.to_string(),
            route_name: route.display_name().map(String::from),
            route_color: route
                .display_color()
                .unwrap_or_else(|| FALLBACK_COLOR.into()),
            shapes: shapes.iter().map(|shape| shape.points.to_vec()).collect(),
        }
    }

    pub fn all(repository: &Repository) -> Vec<Self> {
        repository
            .route_lines()
            .map(|(route, shapes)| Self::from(route, &shapes))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ferroute::gtfs::{GtfsRoute, GtfsShape, GtfsTrip};

    fn trip(trip_id: &str, route_id: &str, shape_id: Option<&str>) -> GtfsTrip {
        GtfsTrip {
            route_id: route_id.into(),
            service_id: "WK".into(),
            trip_id: trip_id.into(),
            shape_id: shape_id.map(String::from),
        }
    }

    fn point(shape_id: &str, sequence: u32, lat: f64, lon: f64) -> GtfsShape {
        GtfsShape {
            shape_id: shape_id.into(),
            shape_pt_lat: lat,
            shape_pt_lon: lon,
            shape_pt_sequence: sequence,
        }
    }

    #[test]
    fn groups_shapes_per_route() {
        let mut data = GtfsData::new();
        data.routes = vec![
            GtfsRoute {
                route_id: "R1".into(),
                route_short_name: Some("1".into()),
                route_long_name: None,
                route_color: Some("00AA00".into()),
            },
            GtfsRoute {
                route_id: "R2".into(),
                route_short_name: None,
                route_long_name: Some("Harbour line".into()),
                route_color: None,
            },
            GtfsRoute {
                route_id: "R3".into(),
                ..Default::default()
            },
        ];
        data.shapes = vec![
            point("OUT", 2, 59.1, 18.1),
            point("OUT", 1, 59.0, 18.0),
            point("BACK", 1, 59.1, 18.1),
            point("BACK", 2, 59.0, 18.0),
            point("HARBOUR", 1, 58.0, 17.0),
        ];
        data.trips = vec![
            trip("T1", "R1", Some("OUT")),
            trip("T2", "R1", Some("BACK")),
            trip("T3", "R1", Some("OUT")),
            trip("T4", "R2", Some("HARBOUR")),
            trip("T5", "R3", None),
        ];
        let repository = Repository::new().with_data(data);

        let lines = MapLineDto::all(&repository);
        assert_eq!(lines.len(), 2);

        assert_eq!(lines[0].route_id, "R1");
        assert_eq!(lines[0].route_name.as_deref(), Some("1"));
        assert_eq!(lines[0].route_color, "#00AA00");
        assert_eq!(
            lines[0].shapes,
            vec![
                vec![Coordinate::new(59.0, 18.0), Coordinate::new(59.1, 18.1)],
                vec![Coordinate::new(59.1, 18.1), Coordinate::new(59.0, 18.0)],
            ]
        );

        assert_eq!(lines[1].route_id, "R2");
        assert_eq!(lines[1].route_name.as_deref(), Some("Harbour line"));
        assert_eq!(lines[1].route_color, FALLBACK_COLOR);
        assert_eq!(lines[1].shapes, vec![vec![Coordinate::new(58.0, 17.0)]]);
    }
}
