//! Bearer-token identity. Tokens are issued elsewhere; this side only verifies.

pub mod jwt;

use axum::{routing::get, Json, Router};
use serde::Serialize;
use tracing::instrument;
use uuid::Uuid;

use crate::state::AppState;
use jwt::AuthUser;

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub id: Uuid,
}

#[instrument]
async fn me(AuthUser(user_id): AuthUser) -> Json<MeResponse> {
    Json(MeResponse { id: user_id })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/me", get(me))
}
