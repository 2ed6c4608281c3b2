use axum::{extract::State, http::StatusCode, Json};
use gym_core::validation::Payload;
use gym_core::{Payment, PaymentView};

use super::{ApiResult, CreatedResult};
use crate::extract::{IdPath, JsonBody};
use crate::middleware::Principal;
use crate::response::ApiResponse;
use crate::state::AppState;

pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<PaymentView>> {
    Ok(Json(ApiResponse::success(state.payments.list().await?)))
}

pub async fn get(State(state): State<AppState>, IdPath(id): IdPath) -> ApiResult<PaymentView> {
    Ok(Json(ApiResponse::success(state.payments.get(id).await?)))
}

/// POST /api/payments. The caller is recorded as staff unless `staff_id` is given.
pub async fn create(
    State(state): State<AppState>,
    principal: Principal,
    JsonBody(payload): JsonBody<Payload>,
) -> CreatedResult<Payment> {
    let payment = state.payments.create(&payload, principal.user_id).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(payment))))
}

pub async fn update(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    JsonBody(payload): JsonBody<Payload>,
) -> ApiResult<PaymentView> {
    Ok(Json(ApiResponse::success(state.payments.update(id, &payload).await?)))
}

pub async fn delete(State(state): State<AppState>, IdPath(id): IdPath) -> ApiResult<()> {
    state.payments.delete(id).await?;
    Ok(Json(ApiResponse::message(format!("payment {} deleted", id))))
}
