//! HTTP handlers

pub mod checkins;
pub mod health;
pub mod members;
pub mod packages;
pub mod payments;
pub mod users;

use axum::{http::StatusCode, Json};

use crate::error::ApiError;
use crate::response::ApiResponse;

pub type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;
pub type CreatedResult<T> = Result<(StatusCode, Json<ApiResponse<T>>), ApiError>;

pub async fn not_found() -> ApiError {
    ApiError::RouteNotFound
}
