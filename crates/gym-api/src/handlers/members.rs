use axum::{extract::State, http::StatusCode, Json};
use gym_core::validation::Payload;
use gym_core::{Member, MemberDetail, MemberSummary};

use super::{ApiResult, CreatedResult};
use crate::extract::{IdPath, JsonBody};
use crate::response::ApiResponse;
use crate::state::AppState;

pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<MemberSummary>> {
    Ok(Json(ApiResponse::success(state.members.list().await?)))
}

pub async fn get(State(state): State<AppState>, IdPath(id): IdPath) -> ApiResult<MemberDetail> {
    Ok(Json(ApiResponse::success(state.members.get(id).await?)))
}

pub async fn create(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<Payload>,
) -> CreatedResult<Member> {
    let member = state.members.create(&payload).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(member))))
}

pub async fn update(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    JsonBody(payload): JsonBody<Payload>,
) -> ApiResult<Member> {
    Ok(Json(ApiResponse::success(state.members.update(id, &payload).await?)))
}

pub async fn delete(State(state): State<AppState>, IdPath(id): IdPath) -> ApiResult<()> {
    state.members.delete(id).await?;
    Ok(Json(ApiResponse::message(format!("member {} deleted", id))))
}
