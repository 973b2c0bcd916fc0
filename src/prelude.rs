pub use crate::{
    graph::{Edge, Graph, TRANSFER_DURATION},
    gtfs::{Gtfs, GtfsData},
    repository::{Calendar, Repository, Route, Shape, Stop, Trip},
    router::{EdgeType, Itinerary, Router, Step, find_fastest_path},
    shared::{Coordinate, Duration, ServiceDate, Time},
};
