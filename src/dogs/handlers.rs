use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use super::dto::TargetResponse;
use super::services::{load_target, validate_profile};
use crate::{auth::jwt::AuthUser, energy::DogProfile, error::ApiError, state::AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/dogs/:dog_id/profile", get(get_profile).put(put_profile))
        .route("/dogs/:dog_id/target", get(get_target))
}

fn dog_not_found() -> ApiError {
    ApiError::NotFound("dog profile not found".into())
}

#[instrument(skip(state))]
pub async fn get_profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(dog_id): Path<Uuid>,
) -> Result<Json<DogProfile>, ApiError> {
    let profile = state
        .store
        .get_profile(user_id, dog_id)
        .await?
        .ok_or_else(dog_not_found)?;
    Ok(Json(profile))
}

/// PUT /dogs/:dog_id/profile, full replacement.
#[instrument(skip(state, body))]
pub async fn put_profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(dog_id): Path<Uuid>,
    Json(body): Json<DogProfile>,
) -> Result<Json<DogProfile>, ApiError> {
    validate_profile(&body)?;
    state.store.put_profile(user_id, dog_id, &body).await?;
    info!(%user_id, %dog_id, "dog profile saved");
    Ok(Json(body))
}

#[instrument(skip(state))]
pub async fn get_target(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(dog_id): Path<Uuid>,
) -> Result<Json<TargetResponse>, ApiError> {
    let today = state.today();
    let (profile, result) = load_target(&*state.store, user_id, dog_id, today)
        .await?
        .ok_or_else(dog_not_found)?;
    Ok(Json(TargetResponse {
        day: today,
        season: profile.season_factor,
        result,
    }))
}
