use std::sync::Arc;

use crate::shared::{Duration, Time};

/// Walking time between two platforms of the same station.
pub const TRANSFER_DURATION: Duration = Duration::from_minutes(5);

/// An outgoing connection of a stop. The origin is implied by the list the edge sits in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edge {
    /// One hop between consecutive stops of a single trip.
    Travel {
        to_stop_idx: u32,
        trip_id: Arc<str>,
        /// Departure from the origin stop.
        departure_time: Time,
        /// Arrival at `to_stop_idx`.
        arrival_time: Time,
        travel_duration: Duration,
    },
    /// A walk between sibling platforms, usable at any time.
    Transfer {
        to_stop_idx: u32,
        walk_duration: Duration,
    },
}

impl Edge {
    pub fn travel(
        to_stop_idx: u32,
        trip_id: Arc<str>,
        departure_time: Time,
        arrival_time: Time,
    ) -> Self {
        Self::Travel {
            to_stop_idx,
            trip_id,
            departure_time,
            arrival_time,
            travel_duration: arrival_time - departure_time,
        }
    }

    pub fn transfer(to_stop_idx: u32) -> Self {
        Self::Transfer {
            to_stop_idx,
            walk_duration: TRANSFER_DURATION,
        }
    }

    pub fn to_stop_idx(&self) -> u32 {
        match self {
            Edge::Travel { to_stop_idx, .. } | Edge::Transfer { to_stop_idx, .. } => *to_stop_idx,
        }
    }

    pub fn trip_id(&self) -> Option<&str> {
        match self {
            Edge::Travel { trip_id, .. } => Some(trip_id),
            Edge::Transfer { .. } => None,
        }
    }

    pub fn is_travel(&self) -> bool {
        matches!(self, Edge::Travel { .. })
    }

    pub fn is_transfer(&self) -> bool {
        matches!(self, Edge::Transfer { .. })
    }
}
