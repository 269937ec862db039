use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;
use uuid::Uuid;

use crate::error::AppResult;
use crate::state::AppState;

use super::dto::{HealthScoreSummary, HistoryRange, ReportRequest};
use super::model::NutritionReport;
use super::services;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/nutrition/reports/:profile_id", post(generate_report))
        .route("/nutrition/quick-report/:profile_id", post(quick_report))
        .route("/nutrition/history/:profile_id", get(history))
        .route("/nutrition/health-score/:profile_id", get(health_score))
}

#[instrument(skip(state, body))]
pub async fn generate_report(
    State(state): State<AppState>,
    Path(profile_id): Path<Uuid>,
    Json(body): Json<ReportRequest>,
) -> AppResult<Json<NutritionReport>> {
    let report = services::generate_report(
        &state,
        profile_id,
        &body.item_ids,
        body.report_date.as_deref(),
    )
    .await?;
    Ok(Json(report))
}

#[instrument(skip(state))]
pub async fn quick_report(
    State(state): State<AppState>,
    Path(profile_id): Path<Uuid>,
) -> AppResult<Json<NutritionReport>> {
    Ok(Json(services::quick_report(&state, profile_id).await?))
}

#[instrument(skip(state))]
pub async fn history(
    State(state): State<AppState>,
    Path(profile_id): Path<Uuid>,
    Query(range): Query<HistoryRange>,
) -> AppResult<Json<Vec<NutritionReport>>> {
    Ok(Json(services::history(&state, profile_id, &range).await?))
}

#[instrument(skip(state))]
pub async fn health_score(
    State(state): State<AppState>,
    Path(profile_id): Path<Uuid>,
) -> AppResult<Json<HealthScoreSummary>> {
    Ok(Json(services::health_score(&state, profile_id).await?))
}
