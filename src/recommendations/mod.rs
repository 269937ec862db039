mod dto;
pub mod engine;
pub mod filter;
pub mod handlers;
pub mod model;
pub mod ranking;
pub mod repo;
pub mod scoring;
pub mod services;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    handlers::routes()
}
