use std::{
    cmp::Ordering,
    collections::{BinaryHeap, HashMap, HashSet},
};

use tracing::debug;

use crate::{
    graph::Edge,
    repository::Repository,
    shared::{Duration, ServiceDate, Time, time},
};

/// A stop reached at a specific time.
/// The same stop can show up with several times, each is its own state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SearchState {
    pub stop_idx: u32,
    pub time: Time,
}

impl SearchState {
    pub fn new(stop_idx: u32, time: Time) -> Self {
        Self { stop_idx, time }
    }
}

// Reversed so `BinaryHeap` pops the earliest state first
impl Ord for SearchState {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .time
            .cmp(&self.time)
            .then_with(|| other.stop_idx.cmp(&self.stop_idx))
    }
}

impl PartialOrd for SearchState {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// How a state was reached: the state we came from and the edge we took.
#[derive(Debug, Clone, Copy)]
pub struct Transition<'a> {
    pub from: SearchState,
    pub to: SearchState,
    pub edge: &'a Edge,
    /// When the vehicle left `from`, `None` for transfers.
    pub departure_time: Option<Time>,
    /// Time spent at `from` waiting for the vehicle, `None` for transfers.
    pub wait_duration: Option<Duration>,
}

impl<'a> Transition<'a> {
    pub fn new_travel(
        from: SearchState,
        to: SearchState,
        edge: &'a Edge,
        departure_time: Time,
    ) -> Self {
        Self {
            from,
            to,
            edge,
            departure_time: Some(departure_time),
            wait_duration: Some(departure_time - from.time),
        }
    }

    pub fn new_transfer(from: SearchState, to: SearchState, edge: &'a Edge) -> Self {
        Self {
            from,
            to,
            edge,
            departure_time: None,
            wait_duration: None,
        }
    }
}

/// Scratch data of a single search. Never shared between searches.
pub struct State<'a> {
    /// Best known arrival per stop.
    pub tau_star: Vec<Time>,
    pub heap: BinaryHeap<SearchState>,
    /// Predecessor link of every state that improved a label.
    pub trail: HashMap<SearchState, Transition<'a>>,
    /// Per calendar entry, whether it runs on the search date. Filled lazily.
    services: Vec<Option<bool>>,
    /// Trips whose service could not be resolved, reported once.
    unresolved: HashSet<&'a str>,
}

impl<'a> State<'a> {
    pub fn new(repository: &Repository) -> Self {
        Self {
            tau_star: vec![time::MAX; repository.stops.len()],
            heap: BinaryHeap::new(),
            trail: HashMap::new(),
            services: vec![None; repository.calendars.len()],
            unresolved: HashSet::new(),
        }
    }

    /// Sets the starting label and queues it.
    pub fn seed(&mut self, start: SearchState) {
        self.tau_star[start.stop_idx as usize] = start.time;
        self.heap.push(start);
    }

    pub fn best(&self, stop_idx: u32) -> Time {
        self.tau_star[stop_idx as usize]
    }

    /// A state is stale when its stop has been reached earlier since it was queued.
    pub fn is_stale(&self, state: &SearchState) -> bool {
        state.time > self.best(state.stop_idx)
    }

    /// Records the transition if it strictly improves the label of its target.
    /// Labels only ever go down, on a tie the earlier transition stays.
    pub fn improve(&mut self, transition: Transition<'a>) -> bool {
        let to = transition.to;
        if to.time >= self.best(to.stop_idx) {
            return false;
        }
        self.tau_star[to.stop_idx as usize] = to.time;
        self.trail.insert(to, transition);
        self.heap.push(to);
        true
    }

    /// Whether the trip runs on `date`. Trips we can not tie to a calendar entry never run.
    pub fn is_trip_active(
        &mut self,
        repository: &Repository,
        trip_id: &'a str,
        date: ServiceDate,
    ) -> bool {
        let Some(calendar_idx) = repository
            .trip_by_id(trip_id)
            .and_then(|trip| trip.calendar_idx)
        else {
            if self.unresolved.insert(trip_id) {
                debug!("Trip {trip_id} has no resolvable service, skipping its edges");
            }
            return false;
        };
        *self.services[calendar_idx as usize]
            .get_or_insert_with(|| repository.calendars[calendar_idx as usize].is_active_on(date))
    }
}
