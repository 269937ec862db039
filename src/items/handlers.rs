use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::instrument;
use uuid::Uuid;

use crate::error::AppResult;
use crate::state::AppState;
use crate::store::ItemFilter;

use super::dto::{ItemDetails, ItemRequest};
use super::model::Item;
use super::services;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/items", get(list_items).post(create_item))
        .route(
            "/items/:id",
            get(get_item).put(update_item).delete(delete_item),
        )
}

#[instrument(skip(state))]
pub async fn list_items(
    State(state): State<AppState>,
    Query(filter): Query<ItemFilter>,
) -> AppResult<Json<Vec<Item>>> {
    Ok(Json(services::search_items(&state, &filter).await?))
}

#[instrument(skip(state, body))]
pub async fn create_item(
    State(state): State<AppState>,
    Json(body): Json<ItemRequest>,
) -> AppResult<(StatusCode, Json<Item>)> {
    let item = services::create_item(&state, body).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

#[instrument(skip(state))]
pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ItemDetails>> {
    let item = services::get_item(&state, id).await?;
    Ok(Json(item.into()))
}

#[instrument(skip(state, body))]
pub async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<ItemRequest>,
) -> AppResult<Json<Item>> {
    Ok(Json(services::update_item(&state, id, body).await?))
}

#[instrument(skip(state))]
pub async fn delete_item(State(state): State<AppState>, Path(id): Path<Uuid>) -> AppResult<StatusCode> {
    services::delete_item(&state, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
