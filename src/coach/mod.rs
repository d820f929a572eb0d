//! Trend coaching: classifies recent daily net energy and keeps one tip per day.

pub mod handlers;
pub mod repo_types;
pub mod rules;
pub mod services;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    handlers::routes()
}
