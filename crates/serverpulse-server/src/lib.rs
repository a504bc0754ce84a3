//! HTTP API for serverpulse.
//!
//! Serves the dashboard's status, history and alert queries. Response
//! bodies keep the established wire field names (`waktu`, `suhu`,
//! `pesanAlert`) so existing chart clients keep working.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};

use serverpulse_core::{query, Metric, MetricPoint, MonitorService, Reading, DEFAULT_HISTORY_LIMIT};

/// Shared server state.
struct AppState {
    monitor: Arc<MonitorService>,
}

#[derive(Deserialize)]
struct HistoryParams {
    /// Number of most-recent points, default 120.
    limit: Option<usize>,
    /// One of cpu|mem|disk|suhu, default cpu.
    metric: Option<String>,
}

#[derive(Serialize)]
struct HistoryResponse {
    data: Vec<MetricPoint>,
    /// Error message if the request was rejected.
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    readings: usize,
    capacity: usize,
    /// The cached most-recent alerting reading, null when none fired yet.
    last_alert: Option<Reading>,
}

async fn handle_index(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let history = state.monitor.history();
    Json(serde_json::json!({
        "name": "Serverpulse API",
        "version": serverpulse_core::VERSION,
        "readings": history.len(),
        "endpoints": {
            "/": "This API index",
            "/api/server-status": "Latest telemetry reading",
            "/api/server-status/history": {
                "method": "GET",
                "description": "Recent history for one metric, oldest-first",
                "params": {
                    "limit": format!("Number of points (default: {DEFAULT_HISTORY_LIMIT})"),
                    "metric": "Metric name: cpu, mem, disk, suhu (default: cpu)",
                }
            },
            "/api/server-status/alert": "Most recent alerting reading",
            "/health": "Service health check",
        },
        "examples": {
            "cpu_history": "/api/server-status/history?limit=30&metric=cpu",
            "temperature_history": "/api/server-status/history?limit=30&metric=suhu",
        }
    }))
}

async fn handle_status(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({ "data": state.monitor.latest() }))
}

async fn handle_history(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HistoryParams>,
) -> (StatusCode, Json<HistoryResponse>) {
    let limit = params.limit.unwrap_or(DEFAULT_HISTORY_LIMIT);
    if limit == 0 {
        return (
            StatusCode::BAD_REQUEST,
            Json(HistoryResponse {
                data: Vec::new(),
                error: Some("limit must be a positive integer".to_string()),
            }),
        );
    }

    let metric: Metric = match params.metric.as_deref().unwrap_or("cpu").parse() {
        Ok(m) => m,
        Err(err) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(HistoryResponse {
                    data: Vec::new(),
                    error: Some(err.to_string()),
                }),
            );
        }
    };

    let data = query(&state.monitor.history(), metric, limit);
    (StatusCode::OK, Json(HistoryResponse { data, error: None }))
}

async fn handle_alert(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({ "data": state.monitor.last_alert() }))
}

async fn handle_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let history = state.monitor.history();
    Json(HealthResponse {
        status: "ok".to_string(),
        readings: history.len(),
        capacity: history.capacity(),
        last_alert: state.monitor.last_alert(),
    })
}

/// Build the axum router.
pub fn build_router(monitor: Arc<MonitorService>) -> Router {
    let state = Arc::new(AppState { monitor });

    Router::new()
        .route("/", get(handle_index))
        .route("/api/server-status", get(handle_status))
        .route("/api/server-status/history", get(handle_history))
        .route("/api/server-status/alert", get(handle_alert))
        .route("/health", get(handle_health))
        .with_state(state)
}


/// Bind and serve the HTTP API. Runs until the listener fails.
pub async fn run_server(
    monitor: Arc<MonitorService>,
    host: &str,
    port: u16,
) -> std::io::Result<()> {
    let app = build_router(monitor);
    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    log::info!("listening on {addr}");
    axum::serve(listener, app).await
}
