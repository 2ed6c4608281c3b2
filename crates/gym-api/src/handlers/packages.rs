use axum::{extract::State, http::StatusCode, Json};
use gym_core::validation::Payload;
use gym_core::Package;

use super::{ApiResult, CreatedResult};
use crate::extract::{IdPath, JsonBody};
use crate::response::ApiResponse;
use crate::state::AppState;

pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<Package>> {
    Ok(Json(ApiResponse::success(state.packages.list().await?)))
}

pub async fn get(State(state): State<AppState>, IdPath(id): IdPath) -> ApiResult<Package> {
    Ok(Json(ApiResponse::success(state.packages.get(id).await?)))
}

pub async fn create(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<Payload>,
) -> CreatedResult<Package> {
    let package = state.packages.create(&payload).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(package))))
}

pub async fn update(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    JsonBody(payload): JsonBody<Payload>,
) -> ApiResult<Package> {
    Ok(Json(ApiResponse::success(state.packages.update(id, &payload).await?)))
}

pub async fn delete(State(state): State<AppState>, IdPath(id): IdPath) -> ApiResult<()> {
    state.packages.delete(id).await?;
    Ok(Json(ApiResponse::message(format!("package {} deleted", id))))
}
