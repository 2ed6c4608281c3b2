//! Auth gate
//!
//! `require_auth` verifies the bearer token and stores the [`Principal`] in
//! the request extensions. `require_admin` does the same and additionally
//! rejects non-admin principals. Handlers read the principal with the
//! [`Principal`] extractor.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use gym_core::DomainError;
use gym_security::JwtService;
use gym_shared::{EntityId, Role};
use tracing::warn;

use crate::error::ApiError;
use crate::state::AppState;

/// The authenticated caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    pub user_id: EntityId,
    pub role: Role,
}

pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let principal = authenticate(&state, req.headers())?;
    req.extensions_mut().insert(principal);
    Ok(next.run(req).await)
}

pub async fn require_admin(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let principal = match req.extensions().get::<Principal>() {
        Some(principal) => *principal,
        None => authenticate(&state, req.headers())?,
    };

    if !principal.role.is_admin() {
        warn!(
            user_id = principal.user_id,
            role = %principal.role,
            uri = %req.uri(),
            "Admin access denied"
        );
        return Err(DomainError::AdminRequired.into());
    }

    req.extensions_mut().insert(principal);
    Ok(next.run(req).await)
}

fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<Principal, ApiError> {
    let header = headers.get(AUTHORIZATION).ok_or(DomainError::MissingToken)?;
    let token = header
        .to_str()
        .ok()
        .and_then(JwtService::extract_from_header)
        .ok_or(DomainError::InvalidToken)?;

    let claims = state.auth.verify_token(token)?;
    Ok(Principal {
        user_id: claims.id,
        role: claims.role,
    })
}

impl FromRequestParts<AppState> for Principal {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        if let Some(principal) = parts.extensions.get::<Principal>() {
            return Ok(*principal);
        }

        let principal = authenticate(state, &parts.headers)?;
        parts.extensions.insert(principal);
        Ok(principal)
    }
}
