mod api;
mod dto;
mod state;

use crate::state::AppState;
use axum::routing::get;
use ferroute::{gtfs::Gtfs, repository::Repository};
use std::{env, sync::Arc, time::Instant};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const DEFAULT_PORT: u16 = 3000;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting server...");
    let Some(path) = env::args().nth(1) else {
        error!("Missing path to a gtfs zip or directory");
        std::process::exit(1);
    };
    let port = match env::var("PORT") {
        Ok(value) => match value.parse::<u16>() {
            Ok(port) => port,
            Err(err) => {
                error!("Invalid PORT {value}: {err}");
                std::process::exit(1);
            }
        },
        Err(_) => DEFAULT_PORT,
    };

    info!("Loading data from {path}...");
    let now = Instant::now();
    let repository = match Repository::new().load_gtfs(Gtfs::new().from_path(&path)) {
        Ok(repository) => repository,
        Err(err) => {
            error!("Failed to load gtfs: {err}");
            std::process::exit(1);
        }
    };
    info!(
        "Loaded {} stops and {} edges in {:?}",
        repository.stops.len(),
        repository.graph.edge_count(),
        now.elapsed()
    );
    let state = Arc::new(AppState::new(repository));

    let app = axum::Router::new()
        .route("/routing", get(api::routing))
        .route("/stops/{id}", get(api::stop))
        .route("/map/lines", get(api::map_lines))
        .with_state(state);
    let listener = match tokio::net::TcpListener::bind(("0.0.0.0", port)).await {
        Ok(listener) => listener,
        Err(err) => {
            error!("Failed to bind port {port}: {err}");
            std::process::exit(1);
        }
    };
    info!("Listening to port {port}");
    if let Err(err) = axum::serve(listener, app).await {
        error!("Server stopped: {err}");
    }
}
