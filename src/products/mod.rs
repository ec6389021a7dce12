pub mod cache;
mod dto;
pub mod handlers;
pub mod model;
mod service;
pub mod validate;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    handlers::router()
}
