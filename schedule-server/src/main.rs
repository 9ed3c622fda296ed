use std::sync::Arc;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use schedule_server::cache::CachedNetwork;
use schedule_server::config::ServerConfig;
use schedule_server::planner::SearchConfig;
use schedule_server::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("schedule_server=info,tower_http=info")),
        )
        .init();

    let config = ServerConfig::from_env();
    let network = CachedNetwork::new(config.network_source(), &config.cache);

    // Load once up front so a broken dataset fails at startup, not on the
    // first request
    match network.snapshot().await {
        Ok(index) => info!(
            stations = index.station_count(),
            trains = index.train_count(),
            stops = index.stop_count(),
            "network loaded"
        ),
        Err(e) => {
            error!(source = %network.source().describe(), error = %e, "failed to load network");
            std::process::exit(1);
        }
    }

    let state = AppState::new(network, SearchConfig::default());

    let refresh_network = Arc::clone(&state.network);
    let refresh_every = config.cache.refresh_interval();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(refresh_every);
        interval.tick().await; // First tick is immediate, skip it
        loop {
            interval.tick().await;
            match refresh_network.refresh().await {
                Ok(index) => info!(trains = index.train_count(), "refreshed network snapshot"),
                Err(e) => warn!(error = %e, "network refresh failed, keeping current snapshot"),
            }
        }
    });

    let app = create_router(state);

    let addr = config.bind_addr;
    info!("Itinerary search listening on http://{addr}");
    info!("  GET  /health              - Health check");
    info!("  GET  /api/stations        - List stations");
    info!("  GET  /api/lines           - List lines");
    info!("  GET  /api/search          - Search itineraries (from, to, time, day)");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    axum::serve(listener, app).await.expect("Server error");
}
