use std::sync::Arc;

use axum::{Json, extract::State};

use crate::{dto::MapLineDto, state::AppState};

pub async fn map_lines(State(state): State<Arc<AppState>>) -> Json<Vec<MapLineDto>> {
    Json(MapLineDto::all(&state.repository))
}
