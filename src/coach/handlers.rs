use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;
use uuid::Uuid;

use super::repo_types::CoachTip;
use super::services::{evaluate_coach, get_today_tip};
use crate::{auth::jwt::AuthUser, dogs::services::load_target, error::ApiError, state::AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/dogs/:dog_id/coach", post(evaluate))
        .route("/dogs/:dog_id/coach/today", get(today))
}

/// POST /dogs/:dog_id/coach, re-evaluates and stores today's tip.
#[instrument(skip(state))]
pub async fn evaluate(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(dog_id): Path<Uuid>,
) -> Result<Json<CoachTip>, ApiError> {
    let today = state.today();
    let (_, result) = load_target(&*state.store, user_id, dog_id, today)
        .await?
        .ok_or_else(|| ApiError::NotFound("dog profile not found".into()))?;

    let tip = evaluate_coach(&*state.store, user_id, dog_id, today, result.recommended, state.now()).await?;
    Ok(Json(tip))
}

#[instrument(skip(state))]
pub async fn today(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(dog_id): Path<Uuid>,
) -> Result<Json<CoachTip>, ApiError> {
    let tip = get_today_tip(&*state.store, user_id, dog_id, state.today())
        .await?
        .ok_or_else(|| ApiError::NotFound("no coach tip for today".into()))?;
    Ok(Json(tip))
}
