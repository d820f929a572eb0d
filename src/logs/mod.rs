//! Meal and activity logging. Every write refreshes the affected day's summary.

mod dto;
pub mod handlers;
pub mod presets;
pub mod repo_types;
pub mod services;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(handlers::read_routes())
        .merge(handlers::write_routes())
}
