use axum::{extract::State, http::StatusCode, Json};
use gym_core::{Checkin, CheckinView};
use gym_shared::EntityId;
use serde::Deserialize;
use validator::Validate;

use super::{ApiResult, CreatedResult};
use crate::extract::{IdPath, ValidatedJson};
use crate::middleware::Principal;
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct CheckinRequest {
    #[validate(range(min = 1, message = "member_id must be a positive integer"))]
    pub member_id: EntityId,
    /// Defaults to the caller.
    #[validate(range(min = 1, message = "staff_id must be a positive integer"))]
    pub staff_id: Option<EntityId>,
}

pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<CheckinView>> {
    Ok(Json(ApiResponse::success(state.checkins.list().await?)))
}

pub async fn get(State(state): State<AppState>, IdPath(id): IdPath) -> ApiResult<CheckinView> {
    Ok(Json(ApiResponse::success(state.checkins.get(id).await?)))
}

pub async fn create(
    State(state): State<AppState>,
    principal: Principal,
    ValidatedJson(req): ValidatedJson<CheckinRequest>,
) -> CreatedResult<Checkin> {
    let checkin = state
        .checkins
        .check_in(req.member_id, req.staff_id, principal.user_id)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(checkin))))
}

/// PUT /api/checkins/{id}/checkout
pub async fn check_out(State(state): State<AppState>, IdPath(id): IdPath) -> ApiResult<Checkin> {
    Ok(Json(ApiResponse::success(state.checkins.check_out(id).await?)))
}

pub async fn delete(State(state): State<AppState>, IdPath(id): IdPath) -> ApiResult<()> {
    state.checkins.delete(id).await?;
    Ok(Json(ApiResponse::message(format!("check-in {} deleted", id))))
}
