use crate::errors::AppError;
use crate::models::{HealthResponse, SummaryParams, SummaryResponse};
use crate::report::fetch_geo_report;
use crate::state::AppState;
use crate::summary::build_summary;
use axum::{
    Json,
    extract::{Query, State},
};
use tracing::info;

const DEFAULT_DAYS: u32 = 30;
const MAX_DAYS: u32 = 90;

pub async fn get_summary(
    State(state): State<AppState>,
    Query(params): Query<SummaryParams>,
) -> Result<Json<SummaryResponse>, AppError> {
    let days = parse_days(params.days.as_deref())?;
    let report = fetch_geo_report(state.source.as_ref(), days).await?;
    let summary = build_summary(&report);

    info!(
        days,
        regions = summary.regions.len(),
        rows = report.current.rows.len(),
        "assembled geo summary"
    );
    Ok(Json(summary))
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        uptime_seconds: state.started_at.elapsed().as_secs_f64(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// Kubernetes-style probes. There is no database or cache behind this
// service, so readiness has nothing further to check.
pub async fn ready() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ready" }))
}

pub async fn live() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "alive" }))
}

pub async fn ping() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "pong" }))
}

fn parse_days(raw: Option<&str>) -> Result<u32, AppError> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_DAYS);
    };
    let days: i64 = raw
        .trim()
        .parse()
        .map_err(|_| AppError::validation("days must be an integer"))?;
    if !(1..=i64::from(MAX_DAYS)).contains(&days) {
        return Err(AppError::validation(format!(
            "days must be between 1 and {MAX_DAYS}"
        )));
    }
    Ok(days as u32)
}
