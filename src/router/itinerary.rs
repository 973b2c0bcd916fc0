use std::{collections::HashMap, fmt::Display};

use serde::Serialize;

use crate::{
    graph::Edge,
    repository::{Repository, Route},
    router::state::{SearchState, Transition},
    shared::{Duration, Time},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeType {
    Start,
    Travel,
    Transfer,
}

impl Display for EdgeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EdgeType::Start => f.write_str("start"),
            EdgeType::Travel => f.write_str("travel"),
            EdgeType::Transfer => f.write_str("transfer"),
        }
    }
}

impl From<&Edge> for EdgeType {
    fn from(value: &Edge) -> Self {
        match value {
            Edge::Travel { .. } => EdgeType::Travel,
            Edge::Transfer { .. } => EdgeType::Transfer,
        }
    }
}

/// The earliest arrival journey, ready to hand to a rider.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Itinerary {
    pub total_time_seconds: Duration,
    pub departure_time: Time,
    pub arrival_time: Time,
    /// Chronological, starting with the synthetic start step.
    pub steps: Vec<Step>,
}

/// One stop along the journey and how we got there.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    pub stop_id: String,
    pub stop_name: String,
    pub edge_type: EdgeType,
    pub arrival_time: Option<Time>,
    pub departure_time: Option<Time>,
    pub trip_id: Option<String>,
    pub route_short_name: Option<String>,
    pub route_color: Option<String>,
    pub walk_duration_seconds: Option<Duration>,
    pub travel_duration_seconds: Option<Duration>,
    pub wait_duration_seconds: Option<Duration>,
}

impl Itinerary {
    /// Walks the trail back from `end` to `start`.
    /// Returns `None` if the chain breaks before reaching `start`.
    pub fn new(
        start: SearchState,
        end: SearchState,
        trail: &HashMap<SearchState, Transition<'_>>,
        repository: &Repository,
    ) -> Option<Self> {
        let mut steps = Vec::new();
        let mut current = end;
        while current != start {
            // A chain longer than the trail can only be a loop
            if steps.len() > trail.len() {
                return None;
            }
            let transition = trail.get(&current)?;
            steps.push(Step::from_transition(transition, repository));
            current = transition.from;
        }
        steps.push(Step::start(start, repository));
        steps.reverse();

        Some(Self {
            total_time_seconds: end.time - start.time,
            departure_time: start.time,
            arrival_time: end.time,
            steps,
        })
    }

    /// Number of vehicles boarded.
    pub fn boardings(&self) -> usize {
        self.steps
            .windows(2)
            .filter(|pair| {
                pair[1].edge_type == EdgeType::Travel
                    && (pair[0].edge_type != EdgeType::Travel || pair[0].trip_id != pair[1].trip_id)
            })
            .count()
    }
}

impl Step {
    fn start(state: SearchState, repository: &Repository) -> Self {
        let stop = &repository.stops[state.stop_idx as usize];
        Self {
            stop_id: stop.id.to_string(),
            stop_name: stop.display_name().to_string(),
            edge_type: EdgeType::Start,
            arrival_time: None,
            departure_time: Some(state.time),
            trip_id: None,
            route_short_name: None,
            route_color: None,
            walk_duration_seconds: None,
            travel_duration_seconds: None,
            wait_duration_seconds: None,
        }
    }

    fn from_transition(transition: &Transition<'_>, repository: &Repository) -> Self {
        let stop = &repository.stops[transition.to.stop_idx as usize];
        let mut step = Self {
            stop_id: stop.id.to_string(),
            stop_name: stop.display_name().to_string(),
            edge_type: transition.edge.into(),
            arrival_time: Some(transition.to.time),
            departure_time: transition.departure_time,
            trip_id: None,
            route_short_name: None,
            route_color: None,
            walk_duration_seconds: None,
            travel_duration_seconds: None,
            wait_duration_seconds: transition.wait_duration,
        };
        match transition.edge {
            Edge::Travel {
                trip_id,
                travel_duration,
                ..
            } => {
                let route = repository.route_by_trip_id(trip_id);
                step.trip_id = Some(trip_id.to_string());
                step.route_short_name = route.and_then(Route::display_name).map(String::from);
                step.route_color = route.and_then(Route::display_color);
                step.travel_duration_seconds = Some(*travel_duration);
            }
            Edge::Transfer { walk_duration, .. } => {
                step.walk_duration_seconds = Some(*walk_duration);
            }
        }
        step
    }
}
