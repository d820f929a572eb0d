use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;
use uuid::Uuid;

use super::dto::{RangeQuery, SummaryListResponse};
use super::repo_types::DailySummary;
use super::services::{ensure_today_summary, recompute_daily_summary};
use crate::{
    auth::jwt::AuthUser,
    day::{parse_day, window_start},
    dogs::services::load_target,
    error::ApiError,
    state::AppState,
};

const DEFAULT_RANGE_DAYS: u16 = 14;
const MAX_RANGE_DAYS: i64 = 366;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/dogs/:dog_id/summaries", get(list))
        .route("/dogs/:dog_id/summaries/today", get(today))
        .route("/dogs/:dog_id/summaries/:day/recompute", post(recompute))
}

fn bad_day(e: anyhow::Error) -> ApiError {
    ApiError::BadRequest(e.to_string())
}

async fn current_target(state: &AppState, user_id: Uuid, dog_id: Uuid) -> Result<i64, ApiError> {
    let (_, result) = load_target(&*state.store, user_id, dog_id, state.today())
        .await?
        .ok_or_else(|| ApiError::NotFound("dog profile not found".into()))?;
    Ok(result.recommended)
}

/// GET /dogs/:dog_id/summaries?from=&to=, defaults to the last 14 days.
#[instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(dog_id): Path<Uuid>,
    Query(q): Query<RangeQuery>,
) -> Result<Json<SummaryListResponse>, ApiError> {
    let to = match q.to.as_deref() {
        Some(raw) => parse_day(raw).map_err(bad_day)?,
        None => state.today(),
    };
    let from = match q.from.as_deref() {
        Some(raw) => parse_day(raw).map_err(bad_day)?,
        None => window_start(to, DEFAULT_RANGE_DAYS),
    };
    if from > to {
        return Err(ApiError::BadRequest("from must not be after to".into()));
    }
    if (to - from).whole_days() >= MAX_RANGE_DAYS {
        return Err(ApiError::BadRequest(format!(
            "range is limited to {MAX_RANGE_DAYS} days"
        )));
    }

    let summaries = state.store.list_summaries(user_id, dog_id, from, to).await?;
    Ok(Json(SummaryListResponse { from, to, summaries }))
}

#[instrument(skip(state))]
pub async fn today(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(dog_id): Path<Uuid>,
) -> Result<Json<DailySummary>, ApiError> {
    let target = current_target(&state, user_id, dog_id).await?;
    let summary =
        ensure_today_summary(&*state.store, user_id, dog_id, state.today(), target, state.now()).await?;
    Ok(Json(summary))
}

/// POST /dogs/:dog_id/summaries/:day/recompute, rebuilds one day with the current target.
#[instrument(skip(state))]
pub async fn recompute(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path((dog_id, day)): Path<(Uuid, String)>,
) -> Result<Json<DailySummary>, ApiError> {
    let day = parse_day(&day).map_err(bad_day)?;
    let target = current_target(&state, user_id, dog_id).await?;
    let summary =
        recompute_daily_summary(&*state.store, user_id, dog_id, day, target, state.now()).await?;
    Ok(Json(summary))
}
