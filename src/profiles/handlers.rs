use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::instrument;
use uuid::Uuid;

use crate::error::AppResult;
use crate::state::AppState;

use super::dto::{ProfileMetrics, ProfileRequest};
use super::model::Profile;
use super::services;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/profiles", get(list_profiles).post(create_profile))
        .route(
            "/profiles/:id",
            get(get_profile).put(update_profile).delete(delete_profile),
        )
        .route("/profiles/:id/metrics", get(profile_metrics))
}

#[instrument(skip(state))]
pub async fn list_profiles(State(state): State<AppState>) -> AppResult<Json<Vec<Profile>>> {
    Ok(Json(services::list_profiles(&state).await?))
}

#[instrument(skip(state, body))]
pub async fn create_profile(
    State(state): State<AppState>,
    Json(body): Json<ProfileRequest>,
) -> AppResult<(StatusCode, Json<Profile>)> {
    let profile = services::create_profile(&state, body).await?;
    Ok((StatusCode::CREATED, Json(profile)))
}

#[instrument(skip(state))]
pub async fn get_profile(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Profile>> {
    Ok(Json(services::get_profile(&state, id).await?))
}

#[instrument(skip(state, body))]
pub async fn update_profile(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<ProfileRequest>,
) -> AppResult<Json<Profile>> {
    Ok(Json(services::update_profile(&state, id, body).await?))
}

#[instrument(skip(state))]
pub async fn delete_profile(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    services::delete_profile(&state, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state))]
pub async fn profile_metrics(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ProfileMetrics>> {
    Ok(Json(services::profile_metrics(&state, id).await?))
}
