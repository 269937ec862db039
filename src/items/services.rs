use tracing::info;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::state::AppState;
use crate::store::ItemFilter;

use super::dto::ItemRequest;
use super::model::Item;

const MAX_RATING: f64 = 5.0;

fn validate(req: &ItemRequest) -> AppResult<()> {
    if req.name.trim().is_empty() {
        return Err(AppError::Validation("name must not be empty".into()));
    }
    if req.rating.is_some_and(|r| !(0.0..=MAX_RATING).contains(&r)) {
        return Err(AppError::Validation("rating must be between 0 and 5".into()));
    }
    let nutrients = [
        req.calories,
        req.protein,
        req.fat,
        req.carbohydrate,
        req.fiber,
        req.sodium,
        req.cholesterol,
    ];
    if nutrients.iter().flatten().any(|v| *v < 0.0) {
        return Err(AppError::Validation("nutrient values must not be negative".into()));
    }
    Ok(())
}

pub async fn create_item(state: &AppState, req: ItemRequest) -> AppResult<Item> {
    validate(&req)?;
    let mut item = Item::new(String::new());
    req.apply(&mut item);
    let item = state.items.create(item).await?;
    info!(item_id = %item.id, name = %item.name, "item created");
    Ok(item)
}

pub async fn get_item(state: &AppState, id: Uuid) -> AppResult<Item> {
    state.items.get(id).await?.ok_or(AppError::ItemNotFound(id))
}

pub async fn search_items(state: &AppState, filter: &ItemFilter) -> AppResult<Vec<Item>> {
    Ok(state.items.search(filter).await?)
}

pub async fn update_item(state: &AppState, id: Uuid, req: ItemRequest) -> AppResult<Item> {
    validate(&req)?;
    let mut item = get_item(state, id).await?;
    req.apply(&mut item);
    state
        .items
        .update(item)
        .await?
        .ok_or(AppError::ItemNotFound(id))
}

pub async fn delete_item(state: &AppState, id: Uuid) -> AppResult<()> {
    if !state.items.delete(id).await? {
        return Err(AppError::ItemNotFound(id));
    }
    Ok(())
}
