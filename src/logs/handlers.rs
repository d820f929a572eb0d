use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;
use uuid::Uuid;

use super::dto::{
    DayLogsResponse, DayQuery, LogActivityRequest, LogMealRequest, LoggedActivityResponse,
    LoggedMealResponse, PresetsResponse,
};
use super::presets::{ACTIVITY_PRESETS, FOOD_PRESETS};
use super::services::{record_activity, record_meal, resolve_activity, resolve_meal};
use crate::{
    auth::jwt::AuthUser,
    day::parse_day,
    dogs::services::load_target,
    energy::{CalorieResult, DogProfile},
    error::ApiError,
    state::AppState,
};

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/presets", get(list_presets))
        .route("/dogs/:dog_id/logs", get(day_logs))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/dogs/:dog_id/meals", post(log_meal))
        .route("/dogs/:dog_id/activities", post(log_activity))
}

async fn target_for(
    state: &AppState,
    user_id: Uuid,
    dog_id: Uuid,
) -> Result<(DogProfile, CalorieResult), ApiError> {
    load_target(&*state.store, user_id, dog_id, state.today())
        .await?
        .ok_or_else(|| ApiError::NotFound("dog profile not found".into()))
}

pub async fn list_presets() -> Json<PresetsResponse> {
    Json(PresetsResponse {
        foods: FOOD_PRESETS,
        activities: ACTIVITY_PRESETS,
    })
}

#[instrument(skip(state, body))]
pub async fn log_meal(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(dog_id): Path<Uuid>,
    Json(body): Json<LogMealRequest>,
) -> Result<(StatusCode, Json<LoggedMealResponse>), ApiError> {
    let (_, target) = target_for(&state, user_id, dog_id).await?;
    let meal = resolve_meal(&body, state.today())?;
    let (meal, summary) =
        record_meal(&*state.store, user_id, dog_id, &meal, target.recommended, state.now()).await?;
    Ok((StatusCode::CREATED, Json(LoggedMealResponse { meal, summary })))
}

#[instrument(skip(state, body))]
pub async fn log_activity(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(dog_id): Path<Uuid>,
    Json(body): Json<LogActivityRequest>,
) -> Result<(StatusCode, Json<LoggedActivityResponse>), ApiError> {
    let (profile, target) = target_for(&state, user_id, dog_id).await?;
    let activity = resolve_activity(&body, profile.weight_kg, state.today())?;
    let (activity, summary) = record_activity(
        &*state.store,
        user_id,
        dog_id,
        &activity,
        target.recommended,
        state.now(),
    )
    .await?;
    Ok((
        StatusCode::CREATED,
        Json(LoggedActivityResponse { activity, summary }),
    ))
}

/// GET /dogs/:dog_id/logs?day=YYYY-MM-DD, defaults to today.
#[instrument(skip(state))]
pub async fn day_logs(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(dog_id): Path<Uuid>,
    Query(q): Query<DayQuery>,
) -> Result<Json<DayLogsResponse>, ApiError> {
    let day = match q.day.as_deref() {
        Some(raw) => parse_day(raw).map_err(|e| ApiError::BadRequest(e.to_string()))?,
        None => state.today(),
    };
    let meals = state.store.meals_for_day(user_id, dog_id, day).await?;
    let activities = state.store.activities_for_day(user_id, dog_id, day).await?;
    Ok(Json(DayLogsResponse {
        day,
        meals,
        activities,
    }))
}
