use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{dto::StopDto, state::AppState};

pub async fn stop(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<StopDto>, StatusCode> {
    let stop = state
        .repository
        .stop_by_id(&id)
        .ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(StopDto::from(stop, &state.repository)))
}
