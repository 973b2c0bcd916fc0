pub mod itinerary;
pub mod state;

pub use itinerary::*;
pub use state::*;

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    graph::Edge,
    repository::Repository,
    shared::{ServiceDate, Time},
};

/// Upper bound on popped states per search.
pub const MAX_ITERATIONS: usize = 1_000_000;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Stop id {0} does not match any entry")]
    InvalidStopID(String),
    #[error("A route was found but failed to build it")]
    FailedToBuildRoute,
    #[error("Could not find a route")]
    NoRouteFound,
}

/// Earliest arrival search between two stops.
///
/// ```no_run
/// # use ferroute::prelude::*;
/// # fn plan(repository: &Repository) -> Result<Itinerary, ferroute::router::Error> {
/// let itinerary = repository
///     .router("CENTRAL", "AIRPORT")
///     .departure_at(Time::from_seconds(8 * 3600))
///     .on_date("2024-03-15".parse().expect("valid date"))
///     .solve()?;
/// # Ok(itinerary)
/// # }
/// ```
pub struct Router<'a> {
    repository: &'a Repository,
    from: Arc<str>,
    to: Arc<str>,
    departure: Time,
    date: ServiceDate,
    max_iterations: usize,
}

impl<'a> Router<'a> {
    /// Departs now, today.
    pub fn new(repository: &'a Repository, from: &str, to: &str) -> Self {
        Self {
            repository,
            from: from.into(),
            to: to.into(),
            departure: Time::now(),
            date: ServiceDate::today(),
            max_iterations: MAX_ITERATIONS,
        }
    }

    pub fn departure_at(mut self, departure: Time) -> Self {
        self.departure = departure;
        self
    }

    pub fn on_date(mut self, date: ServiceDate) -> Self {
        self.date = date;
        self
    }

    /// Gives up after this many popped states and reports [`Error::NoRouteFound`].
    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn solve(self) -> Result<Itinerary, self::Error> {
        let repository = self.repository;
        let start_idx = self.stop_idx(&self.from)?;
        let end_idx = self.stop_idx(&self.to)?;
        debug!(
            "Searching {} -> {} departing {} on {}",
            self.from, self.to, self.departure, self.date
        );

        let start = SearchState::new(start_idx, self.departure);
        let mut state = State::new(repository);
        state.seed(start);

        let mut iterations = 0;
        while let Some(current) = state.heap.pop() {
            iterations += 1;
            if iterations > self.max_iterations {
                warn!(
                    "Search {} -> {} gave up after {} iterations",
                    self.from, self.to, self.max_iterations
                );
                return Err(self::Error::NoRouteFound);
            }
            if state.is_stale(&current) {
                continue;
            }
            if current.stop_idx == end_idx {
                debug!(
                    "Reached {} at {} after {iterations} iterations",
                    self.to, current.time
                );
                return Itinerary::new(start, current, &state.trail, repository)
                    .ok_or(self::Error::FailedToBuildRoute);
            }

            for edge in repository.graph.edges(current.stop_idx) {
                if let Some(transition) = self.relax(&mut state, current, edge) {
                    state.improve(transition);
                }
            }
        }

        debug!(
            "No route {} -> {} after {iterations} iterations",
            self.from, self.to
        );
        Err(self::Error::NoRouteFound)
    }

    /// The transition taking `edge` from `current` would give, `None` if the edge can not be used.
    fn relax(
        &self,
        state: &mut State<'a>,
        current: SearchState,
        edge: &'a Edge,
    ) -> Option<Transition<'a>> {
        match edge {
            Edge::Transfer {
                to_stop_idx,
                walk_duration,
            } => Some(Transition::new_transfer(
                current,
                SearchState::new(*to_stop_idx, current.time + *walk_duration),
                edge,
            )),
            Edge::Travel {
                to_stop_idx,
                trip_id,
                departure_time,
                arrival_time,
                ..
            } => {
                // The vehicle already left
                if current.time > *departure_time {
                    return None;
                }
                if !state.is_trip_active(self.repository, trip_id, self.date) {
                    return None;
                }
                Some(Transition::new_travel(
                    current,
                    SearchState::new(*to_stop_idx, *arrival_time),
                    edge,
                    *departure_time,
                ))
            }
        }
    }

    fn stop_idx(&self, id: &str) -> Result<u32, self::Error> {
        self.repository
            .stop_by_id(id)
            .map(|stop| stop.index)
            .ok_or_else(|| self::Error::InvalidStopID(id.to_string()))
    }
}

/// Earliest arrival itinerary from `start_stop` to `end_stop`, leaving no earlier
/// than `departure_time` on `target_date`.
pub fn find_fastest_path(
    repository: &Repository,
    start_stop: &str,
    end_stop: &str,
    departure_time: Time,
    target_date: ServiceDate,
) -> Result<Itinerary, self::Error> {
    repository
        .router(start_stop, end_stop)
        .departure_at(departure_time)
        .on_date(target_date)
        .solve()
}
