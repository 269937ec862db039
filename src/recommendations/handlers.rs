use axum::{
    extract::{Path, Query, State},
    routing::{get, post, put},
    Json, Router,
};
use tracing::instrument;
use uuid::Uuid;

use crate::error::AppResult;
use crate::state::AppState;

use super::dto::{CountParam, RecommendationStats};
use super::model::{Feedback, Recommendation, RecommendationQuery};
use super::services;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/recommendations", post(generate))
        .route("/recommendations/simple/:profile_id", get(simple))
        .route("/recommendations/history/:profile_id", get(history))
        .route("/recommendations/stats/:profile_id", get(stats))
        .route("/recommendations/:id/feedback", put(record_feedback))
}

#[instrument(skip(state))]
pub async fn generate(
    State(state): State<AppState>,
    Json(query): Json<RecommendationQuery>,
) -> AppResult<Json<Vec<Recommendation>>> {
    Ok(Json(services::generate(&state, query).await?))
}

#[instrument(skip(state))]
pub async fn simple(
    State(state): State<AppState>,
    Path(profile_id): Path<Uuid>,
    Query(p): Query<CountParam>,
) -> AppResult<Json<Vec<Recommendation>>> {
    Ok(Json(services::simple(&state, profile_id, p.count).await?))
}

#[instrument(skip(state))]
pub async fn history(
    State(state): State<AppState>,
    Path(profile_id): Path<Uuid>,
) -> AppResult<Json<Vec<Recommendation>>> {
    Ok(Json(services::history(&state, profile_id).await?))
}

#[instrument(skip(state))]
pub async fn record_feedback(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(feedback): Json<Feedback>,
) -> AppResult<Json<Recommendation>> {
    Ok(Json(services::record_feedback(&state, id, feedback).await?))
}

#[instrument(skip(state))]
pub async fn stats(
    State(state): State<AppState>,
    Path(profile_id): Path<Uuid>,
) -> AppResult<Json<RecommendationStats>> {
    Ok(Json(services::stats(&state, profile_id).await?))
}
