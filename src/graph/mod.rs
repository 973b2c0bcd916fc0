mod edge;
pub use edge::*;

use std::{collections::HashMap, sync::Arc, time::Instant};

use rayon::prelude::*;
use tracing::debug;

use crate::{gtfs::GtfsStopTime, repository::Stop, shared::Time};

/// Outgoing edges per stop, indexed by stop index.
/// Built once per feed and only read afterwards.
#[derive(Debug, Default, Clone)]
pub struct Graph {
    edges: Box<[Box<[Edge]>]>,
}

impl Graph {
    /// Builds the graph from the stop table and the raw stop times.
    ///
    /// Every stop gets an entry, even when nothing departs from it.
    /// Stop time pairs that can not become an edge (unparsable clock strings or
    /// unknown stops) are skipped, they never fail the build. An arrival before its
    /// departure still gives an edge, with a travel duration of zero.
    pub fn build(stops: &[Stop], stop_times: &[GtfsStopTime]) -> Self {
        let now = Instant::now();
        let stop_lookup: HashMap<&str, u32> = stops
            .iter()
            .enumerate()
            .map(|(i, stop)| (stop.id.as_ref(), i as u32))
            .collect();
        let mut adjacency: Vec<Vec<Edge>> = vec![Vec::new(); stops.len()];

        // Trips keep the order they first show up in so the edge lists are stable
        let mut trip_lookup: HashMap<&str, usize> = HashMap::new();
        let mut trips: Vec<Vec<&GtfsStopTime>> = Vec::new();
        stop_times.iter().for_each(|stop_time| {
            let index = *trip_lookup
                .entry(stop_time.trip_id.as_str())
                .or_insert_with(|| {
                    trips.push(Vec::new());
                    trips.len() - 1
                });
            trips[index].push(stop_time);
        });

        let trip_count = trips.len();
        let trip_edges: Vec<(Vec<(u32, Edge)>, usize)> = trips
            .into_par_iter()
            .map(|mut stop_times| {
                stop_times.sort_by_key(|stop_time| stop_time.stop_sequence);
                travel_edges(&stop_times, &stop_lookup)
            })
            .collect();

        let mut travel_count = 0;
        let mut skipped = 0;
        trip_edges.into_iter().for_each(|(edges, skipped_pairs)| {
            skipped += skipped_pairs;
            travel_count += edges.len();
            edges.into_iter().for_each(|(from_stop_idx, edge)| {
                adjacency[from_stop_idx as usize].push(edge);
            });
        });

        let mut station_lookup: HashMap<&str, usize> = HashMap::new();
        let mut stations: Vec<Vec<u32>> = Vec::new();
        stops.iter().enumerate().for_each(|(i, stop)| {
            if !stop.is_platform() {
                return;
            }
            if let Some(parent_station) = &stop.parent_station {
                let index = *station_lookup
                    .entry(parent_station.as_ref())
                    .or_insert_with(|| {
                        stations.push(Vec::new());
                        stations.len() - 1
                    });
                stations[index].push(i as u32);
            }
        });

        let mut transfer_count = 0;
        stations
            .iter()
            .filter(|siblings| siblings.len() > 1)
            .for_each(|siblings| {
                for from in siblings.iter() {
                    for to in siblings.iter().filter(|to| *to != from) {
                        adjacency[*from as usize].push(Edge::transfer(*to));
                        transfer_count += 1;
                    }
                }
            });

        debug!(
            "Built graph with {} stops, {} travel edges from {} trips and {} transfer edges in {:?}",
            stops.len(),
            travel_count,
            trip_count,
            transfer_count,
            now.elapsed()
        );
        if skipped > 0 {
            debug!("Skipped {skipped} malformed stop time pairs");
        }

        Self {
            edges: adjacency.into_iter().map(|edges| edges.into()).collect(),
        }
    }

    /// The outgoing edges of a stop, empty for unknown indexes.
    pub fn edges(&self, stop_idx: u32) -> &[Edge] {
        self.edges
            .get(stop_idx as usize)
            .map(|edges| edges.as_ref())
            .unwrap_or_default()
    }

    /// Number of stops in the graph.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.iter().map(|edges| edges.len()).sum()
    }
}

/// Turns the sorted stop times of one trip into one edge per consecutive pair.
/// Also returns how many pairs were skipped.
fn travel_edges(
    stop_times: &[&GtfsStopTime],
    stop_lookup: &HashMap<&str, u32>,
) -> (Vec<(u32, Edge)>, usize) {
    let Some(first) = stop_times.first() else {
        return (Vec::new(), 0);
    };
    let trip_id: Arc<str> = first.trip_id.as_str().into();
    let mut edges = Vec::with_capacity(stop_times.len().saturating_sub(1));
    let mut skipped = 0;
    stop_times.windows(2).for_each(|pair| {
        match travel_edge(pair[0], pair[1], &trip_id, stop_lookup) {
            Some(edge) => edges.push(edge),
            None => skipped += 1,
        }
    });
    (edges, skipped)
}

fn travel_edge(
    current: &GtfsStopTime,
    next: &GtfsStopTime,
    trip_id: &Arc<str>,
    stop_lookup: &HashMap<&str, u32>,
) -> Option<(u32, Edge)> {
    let from_stop_idx = *stop_lookup.get(current.stop_id.as_str())?;
    let to_stop_idx = *stop_lookup.get(next.stop_id.as_str())?;
    let departure_time = Time::from_hms(&current.departure_time)?;
    let arrival_time = Time::from_hms(&next.arrival_time)?;
    Some((
        from_stop_idx,
        Edge::travel(to_stop_idx, trip_id.clone(), departure_time, arrival_time),
    ))
}
