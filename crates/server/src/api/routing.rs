use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use ferroute::{
    prelude::*,
    router::{self, Error},
};
use serde::Deserialize;
use tracing::{debug, error};

use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RoutingParams {
    pub from: String,
    pub to: String,
    /// `HH:MM:SS`, defaults to now.
    pub time: Option<String>,
    /// `YYYY-MM-DD` or `YYYYMMDD`, defaults to today.
    pub date: Option<String>,
}

pub async fn routing(
    Query(params): Query<RoutingParams>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Itinerary>, StatusCode> {
    let departure = parse_time(params.time.as_deref())?;
    let date = parse_date(params.date.as_deref())?;

    let result = tokio::task::spawn_blocking(move || {
        router::find_fastest_path(&state.repository, &params.from, &params.to, departure, date)
    })
    .await
    .map_err(|err| {
        error!("Routing task failed: {err}");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    match result {
        Ok(itinerary) => Ok(Json(itinerary)),
        Err(err) => {
            debug!("Routing failed: {err}");
            Err(status_for(&err))
        }
    }
}

fn parse_time(value: Option<&str>) -> Result<Time, StatusCode> {
    match value {
        Some(value) => Time::from_hms(value).ok_or(StatusCode::BAD_REQUEST),
        None => Ok(Time::now()),
    }
}

fn parse_date(value: Option<&str>) -> Result<ServiceDate, StatusCode> {
    match value {
        Some(value) => value.parse().map_err(|_| StatusCode::BAD_REQUEST),
        None => Ok(ServiceDate::today()),
    }
}

fn status_for(err: &Error) -> StatusCode {
    match err {
        Error::InvalidStopID(_) | Error::NoRouteFound => StatusCode::NOT_FOUND,
        Error::FailedToBuildRoute => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
