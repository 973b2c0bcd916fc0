use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
    time::Instant,
};

mod calendar;
mod models;
pub use calendar::*;
pub use models::*;

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::{
    graph::Graph,
    gtfs::{self, GtfsCalendar, GtfsData, GtfsRoute, GtfsShape, GtfsStop, GtfsTrip},
    router::Router,
    shared::Coordinate,
};

type IdToIndex = HashMap<Arc<str>, u32>;

/// Every table of a loaded schedule plus the graph built from it.
///
/// Built once, then only read. Share it between searches by reference
/// (or behind an `Arc`), no locking needed.
#[derive(Debug, Clone, Default)]
pub struct Repository {
    pub stops: Box<[Stop]>,
    pub routes: Box<[Route]>,
    pub trips: Box<[Trip]>,
    pub calendars: Box<[Calendar]>,
    pub shapes: Box<[Shape]>,
    pub graph: Graph,

    stop_lookup: IdToIndex,
    route_lookup: IdToIndex,
    trip_lookup: IdToIndex,
    calendar_lookup: IdToIndex,
    shape_lookup: IdToIndex,
    /// Parent station id to the platforms under it.
    station_lookup: HashMap<Arc<str>, Box<[u32]>>,
    /// Distinct shapes drawn by the trips of each route, indexed by route index.
    route_to_shapes: Box<[Box<[u32]>]>,
}

impl Repository {
    pub fn new() -> Self {
        Default::default()
    }

    /// Reads the feed and builds the repository from it.
    /// Depending on the size of the data this can be a long blocking function.
    pub fn load_gtfs(self, gtfs: gtfs::Gtfs) -> Result<Self, gtfs::Error> {
        let data = gtfs.load()?;
        Ok(self.with_data(data))
    }

    /// Builds the lookup tables and the graph from already parsed tables.
    pub fn with_data(mut self, data: GtfsData) -> Self {
        let now = Instant::now();
        self.load_stops(data.stops);
        self.load_routes(data.routes);
        self.load_calendar(data.calendar);
        self.load_shapes(data.shapes);
        self.load_trips(data.trips);
        self.graph = Graph::build(&self.stops, &data.stop_times);
        debug!("Building repository took {:?}", now.elapsed());
        self
    }

    fn load_stops(&mut self, stops: Vec<GtfsStop>) {
        let mut stop_lookup: IdToIndex = HashMap::with_capacity(stops.len());
        let mut values: Vec<Stop> = Vec::with_capacity(stops.len());
        stops.into_iter().for_each(|stop| {
            let mut value: Stop = stop.into();
            if stop_lookup.contains_key(&value.id) {
                warn!("Duplicate stop {}, keeping the first one", value.id);
                return;
            }
            value.index = values.len() as u32;
            stop_lookup.insert(value.id.clone(), value.index);
            values.push(value);
        });
        let mut station_lookup: HashMap<Arc<str>, Vec<u32>> = HashMap::new();
        values
            .iter()
            .filter(|stop| stop.is_platform())
            .for_each(|stop| {
                if let Some(parent_station) = &stop.parent_station {
                    station_lookup
                        .entry(parent_station.clone())
                        .or_default()
                        .push(stop.index);
                }
            });
        debug!(
            "Loaded {} stops in {} stations",
            values.len(),
            station_lookup.len()
        );
        self.stops = values.into();
        self.stop_lookup = stop_lookup;
        self.station_lookup = station_lookup
            .into_iter()
            .map(|(station, platforms)| (station, platforms.into()))
            .collect();
    }

    fn load_routes(&mut self, routes: Vec<GtfsRoute>) {
        let mut route_lookup: IdToIndex = HashMap::with_capacity(routes.len());
        let mut values: Vec<Route> = Vec::with_capacity(routes.len());
        routes.into_iter().for_each(|route| {
            let mut value: Route = route.into();
            if route_lookup.contains_key(&value.id) {
                warn!("Duplicate route {}, keeping the first one", value.id);
                return;
            }
            value.index = values.len() as u32;
            route_lookup.insert(value.id.clone(), value.index);
            values.push(value);
        });
        debug!("Loaded {} routes", values.len());
        self.routes = values.into();
        self.route_lookup = route_lookup;
    }

    fn load_calendar(&mut self, calendar: Vec<GtfsCalendar>) {
        let mut calendar_lookup: IdToIndex = HashMap::with_capacity(calendar.len());
        let mut values: Vec<Calendar> = Vec::with_capacity(calendar.len());
        calendar.into_iter().for_each(|entry| {
            let mut value: Calendar = entry.into();
            if calendar_lookup.contains_key(&value.service_id) {
                warn!(
                    "Duplicate calendar entry for service {}, keeping the first one",
                    value.service_id
                );
                return;
            }
            value.index = values.len() as u32;
            calendar_lookup.insert(value.service_id.clone(), value.index);
            values.push(value);
        });
        debug!("Loaded {} services", values.len());
        self.calendars = values.into();
        self.calendar_lookup = calendar_lookup;
    }

    fn load_shapes(&mut self, shapes: Vec<GtfsShape>) {
        let mut shape_lookup: IdToIndex = HashMap::new();
        let mut groups: Vec<(Arc<str>, Vec<(u32, Coordinate)>)> = Vec::new();
        shapes.into_iter().for_each(|point| {
            let index = *shape_lookup
                .entry(point.shape_id.as_str().into())
                .or_insert_with(|| {
                    groups.push((point.shape_id.as_str().into(), Vec::new()));
                    groups.len() as u32 - 1
                });
            groups[index as usize].1.push((
                point.shape_pt_sequence,
                Coordinate::new(point.shape_pt_lat, point.shape_pt_lon),
            ));
        });

        let values: Vec<Shape> = groups
            .into_par_iter()
            .enumerate()
            .map(|(index, (id, mut points))| {
                points.sort_by_key(|(sequence, _)| *sequence);
                Shape {
                    index: index as u32,
                    id,
                    points: points.into_iter().map(|(_, point)| point).collect(),
                }
            })
            .collect();
        debug!("Loaded {} shapes", values.len());
        self.shapes = values.into();
        self.shape_lookup = shape_lookup;
    }

    fn load_trips(&mut self, trips: Vec<GtfsTrip>) {
        let mut trip_lookup: IdToIndex = HashMap::with_capacity(trips.len());
        let mut values: Vec<Trip> = Vec::with_capacity(trips.len());
        let mut unknown_services = 0;
        let mut route_to_shapes: Vec<Vec<u32>> = vec![Vec::new(); self.routes.len()];
        let mut drawn: HashSet<(u32, u32)> = HashSet::new();
        trips.into_iter().for_each(|trip| {
            if trip_lookup.contains_key(trip.trip_id.as_str()) {
                warn!("Duplicate trip {}, keeping the first one", trip.trip_id);
                return;
            }
            let calendar_idx = self.calendar_lookup.get(trip.service_id.as_str()).copied();
            if calendar_idx.is_none() {
                unknown_services += 1;
            }
            let route_idx = self.route_lookup.get(trip.route_id.as_str()).copied();
            let shape_idx = trip
                .shape_id
                .as_deref()
                .and_then(|shape_id| self.shape_lookup.get(shape_id).copied());
            if let (Some(route_idx), Some(shape_idx)) = (route_idx, shape_idx)
                && drawn.insert((route_idx, shape_idx))
            {
                route_to_shapes[route_idx as usize].push(shape_idx);
            }
            let value = Trip {
                index: values.len() as u32,
                id: trip.trip_id.into(),
                service_id: trip.service_id.into(),
                route_id: trip.route_id.into(),
                calendar_idx,
                route_idx,
                shape_idx,
            };
            trip_lookup.insert(value.id.clone(), value.index);
            values.push(value);
        });
        debug!("Loaded {} trips", values.len());
        if unknown_services > 0 {
            warn!("{unknown_services} trips reference a service missing from the calendar");
        }
        self.trips = values.into();
        self.trip_lookup = trip_lookup;
        self.route_to_shapes = route_to_shapes
            .into_iter()
            .map(|shapes| shapes.into())
            .collect();
    }

    /// Get a stop with the given id.
    /// If no stop is found with the given id None is returned.
    pub fn stop_by_id(&self, id: &str) -> Option<&Stop> {
        let index = self.stop_lookup.get(id)?;
        Some(&self.stops[*index as usize])
    }

    /// Gets a trip with the given id.
    /// If no trip with the given id was found None is returned.
    pub fn trip_by_id(&self, id: &str) -> Option<&Trip> {
        let index = self.trip_lookup.get(id)?;
        Some(&self.trips[*index as usize])
    }

    pub fn route_by_trip_id(&self, trip_id: &str) -> Option<&Route> {
        let route_idx = self.trip_by_id(trip_id)?.route_idx?;
        Some(&self.routes[route_idx as usize])
    }

    pub fn calendar_by_service_id(&self, service_id: &str) -> Option<&Calendar> {
        let index = self.calendar_lookup.get(service_id)?;
        Some(&self.calendars[*index as usize])
    }

    pub fn calendar_by_trip_id(&self, trip_id: &str) -> Option<&Calendar> {
        let calendar_idx = self.trip_by_id(trip_id)?.calendar_idx?;
        Some(&self.calendars[calendar_idx as usize])
    }

    /// Platforms sharing the given parent station.
    pub fn stops_by_parent_station(&self, parent_station: &str) -> Vec<&Stop> {
        self.station_lookup
            .get(parent_station)
            .map(|platforms| {
                platforms
                    .iter()
                    .map(|stop_idx| &self.stops[*stop_idx as usize])
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn shape_by_id(&self, id: &str) -> Option<&Shape> {
        let index = self.shape_lookup.get(id)?;
        Some(&self.shapes[*index as usize])
    }

    /// The distinct shapes the trips of a route are drawn with, in trip order.
    pub fn shapes_by_route_idx(&self, route_idx: u32) -> Vec<&Shape> {
        self.route_to_shapes
            .get(route_idx as usize)
            .map(|shapes| {
                shapes
                    .iter()
                    .map(|shape_idx| &self.shapes[*shape_idx as usize])
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn shapes_by_route_id(&self, route_id: &str) -> Vec<&Shape> {
        self.route_lookup
            .get(route_id)
            .map(|route_idx| self.shapes_by_route_idx(*route_idx))
            .unwrap_or_default()
    }

    /// Every route that has at least one shape, with its shapes, in route table order.
    pub fn route_lines(&self) -> impl Iterator<Item = (&Route, Vec<&Shape>)> {
        self.routes
            .iter()
            .map(|route| (route, self.shapes_by_route_idx(route.index)))
            .filter(|(_, shapes)| !shapes.is_empty())
    }

    /// Plans a journey between two stops, see [`Router`].
    pub fn router(&self, from: &str, to: &str) -> Router<'_> {
        Router::new(self, from, to)
    }
}
