//! User and login handlers

use axum::{extract::State, http::StatusCode, Json};
use gym_core::services::LoginResult;
use gym_core::validation::Payload;
use gym_core::UserInfo;
use serde::Deserialize;
use validator::Validate;

use super::{ApiResult, CreatedResult};
use crate::extract::{IdPath, JsonBody, ValidatedJson};
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

/// POST /api/users/login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> ApiResult<LoginResult> {
    let result = state.auth.login(&req.username, &req.password).await?;
    Ok(Json(ApiResponse::success(result)))
}

/// GET /api/users
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<UserInfo>> {
    Ok(Json(ApiResponse::success(state.users.list().await?)))
}

/// POST /api/users (admin)
pub async fn create(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<Payload>,
) -> CreatedResult<UserInfo> {
    let user = state.users.create(&payload).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(user))))
}

/// PUT /api/users/{id}
pub async fn update(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    JsonBody(payload): JsonBody<Payload>,
) -> ApiResult<UserInfo> {
    Ok(Json(ApiResponse::success(state.users.update(id, &payload).await?)))
}

/// DELETE /api/users/{id} (admin)
pub async fn delete(State(state): State<AppState>, IdPath(id): IdPath) -> ApiResult<()> {
    state.users.delete(id).await?;
    Ok(Json(ApiResponse::message(format!("user {} deleted", id))))
}
