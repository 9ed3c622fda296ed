//! HTTP route handlers.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use tower_http::trace::TraceLayer;
use tracing::{debug, error, warn};

use crate::domain::{LineId, ServiceDay, StationId};
use crate::network::{DatasetError, NetworkRepository};
use crate::planner::{Planner, SearchError, SearchQuery, SearchRequest};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/stations", get(list_stations))
        .route("/api/stations/:id", get(get_station))
        .route("/api/lines", get(list_lines))
        .route("/api/lines/:id", get(get_line))
        .route("/api/search", get(search_schedule))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// All stations, ordered by French name.
async fn list_stations(State(state): State<AppState>) -> Result<Json<Vec<StationDto>>, AppError> {
    let network = state.network.snapshot().await?;
    let stations = network
        .stations_by_name()
        .into_iter()
        .map(|s| StationDto::from_station(s, s.line.and_then(|l| network.line(l))))
        .collect();
    Ok(Json(stations))
}

async fn get_station(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<StationDto>, AppError> {
    let id = StationId::parse(&id).map_err(|e| AppError::BadRequest {
        message: e.to_string(),
    })?;
    let network = state.network.snapshot().await?;
    let station = network.station(id).map_err(|e| AppError::NotFound {
        message: e.to_string(),
    })?;
    let line = station.line.and_then(|l| network.line(l));
    Ok(Json(StationDto::from_station(station, line)))
}

async fn list_lines(State(state): State<AppState>) -> Result<Json<Vec<LineDto>>, AppError> {
    let network = state.network.snapshot().await?;
    Ok(Json(network.lines().map(LineDto::from_line).collect()))
}

async fn get_line(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<LineDto>, AppError> {
    let id = id.trim().parse::<u32>().map(LineId).map_err(|_| AppError::BadRequest {
        message: format!("invalid line id: {id:?}"),
    })?;
    let network = state.network.snapshot().await?;
    let line = network.line(id).ok_or_else(|| AppError::NotFound {
        message: format!("line {id} not found"),
    })?;
    Ok(Json(LineDto::from_line(line)))
}

/// Search itineraries between two stations.
///
/// Query parameters: `from`, `to` (station ids), `time` (HH:MM, optional),
/// `day` (0 = Sunday, defaults to today).
async fn search_schedule(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<ItineraryDto>>, AppError> {
    let request = SearchRequest::from_query(&query, ServiceDay::today())?;
    let network = state.network.snapshot().await?;

    let result = Planner::new(network.as_ref(), &state.config).search(&request)?;
    debug!(
        results = result.itineraries.len(),
        direct = result.direct_count,
        connections = result.connection_count,
        ranked = result.ranked,
        "search complete"
    );

    Ok(Json(
        result
            .itineraries
            .iter()
            .map(ItineraryDto::from_ranked)
            .collect(),
    ))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl From<Arc<DatasetError>> for AppError {
    fn from(e: Arc<DatasetError>) -> Self {
        AppError::Internal {
            message: format!("network data unavailable: {e}"),
        }
    }
}

impl From<SearchError> for AppError {
    fn from(e: SearchError) -> Self {
        match e {
            SearchError::MissingStation(_) | SearchError::InvalidStationId(_) => {
                AppError::BadRequest {
                    message: e.to_string(),
                }
            }
            SearchError::StationNotFound(_) => AppError::NotFound {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "request rejected");
        }

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
