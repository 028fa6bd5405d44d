use axum::{
    extract::State,
    routing::{get, post},
    Router,
    Json,
    http::Method,
};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use crate::{
    AppState,
    error::AppError,
    models::MetricsSnapshot,
    services::pulse::{self, Pipeline},
};
use tower_http::cors::{CorsLayer, Any};

pub fn routes() -> Router<Arc<AppState>> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
        .max_age(std::time::Duration::from_secs(3600));

    Router::new()
        .route("/metrics/snapshot", get(get_snapshot))
        .route("/metrics/export", post(export_snapshot))
        .layer(cors)
}

#[derive(Debug, Serialize)]
pub struct ExportResponse {
    sheet: String,
    file: String,
}

fn workbook_path(state: &AppState) -> Result<PathBuf, AppError> {
    state.config.workbook.clone().ok_or_else(|| {
        AppError::InvalidInput("No workbook configured (set PULSE_WORKBOOK)".to_string())
    })
}

/// Run the full extraction pipeline and hand the snapshot to the dashboard
/// frontend. The frontend owns all presentation; it pulls fields by name.
async fn get_snapshot(
    State(state): State<Arc<AppState>>,
) -> Result<Json<MetricsSnapshot>, AppError> {
    let start = std::time::Instant::now();
    let path = workbook_path(&state)?;

    let pipeline = Pipeline::new(state.config.header_row);
    let snapshot = pipeline.run(&path)?;

    tracing::info!(
        "Snapshot for week {} computed in {:?}",
        snapshot.week_ending,
        start.elapsed()
    );
    Ok(Json(snapshot))
}

/// Run the pipeline and append the snapshot back into the workbook.
/// Explicit request only; the extraction itself never persists anything.
async fn export_snapshot(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ExportResponse>, AppError> {
    let path = workbook_path(&state)?;

    let pipeline = Pipeline::new(state.config.header_row);
    let snapshot = pipeline.run(&path)?;
    pulse::write_snapshot(&snapshot, &path)?;

    Ok(Json(ExportResponse {
        sheet: pulse::SNAPSHOT_SHEET.to_string(),
        file: path.display().to_string(),
    }))
}
