pub mod advisory;
pub mod aggregate;
pub mod assessment;
mod dto;
pub mod engine;
pub mod handlers;
pub mod model;
pub mod repo;
pub mod services;
pub mod targets;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    handlers::routes()
}
