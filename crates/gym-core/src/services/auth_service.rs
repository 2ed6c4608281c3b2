//! Authentication service: credential check, token issue and verification

use std::sync::Arc;

use gym_security::{Claims, JwtError, JwtService, PasswordService};
use serde::Serialize;
use tracing::{info, warn};

use crate::domain::UserInfo;
use crate::error::DomainError;
use crate::repositories::UserRepository;

pub struct AuthService {
    users: Arc<dyn UserRepository>,
    jwt: Arc<JwtService>,
}

/// Result of a successful login
#[derive(Debug, Clone, Serialize)]
pub struct LoginResult {
    pub token: String,
    pub user: UserInfo,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>, jwt: Arc<JwtService>) -> Self {
        Self { users, jwt }
    }

    /// Login with username and password.
    ///
    /// The password is checked before the account status, so a caller
    /// without the password learns nothing about whether the account is
    /// disabled.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResult, DomainError> {
        info!("Login attempt for username: {}", username);

        let user = self.users.find_by_username(username).await?.ok_or_else(|| {
            warn!("Login failed: username not found: {}", username);
            DomainError::UnknownUsername
        })?;

        let password_valid = PasswordService::verify(password, &user.password_hash)
            .map_err(|_| DomainError::InvalidCredentials)?;
        if !password_valid {
            warn!("Login failed: invalid password for: {}", username);
            return Err(DomainError::InvalidCredentials);
        }

        if !user.can_login() {
            warn!("Login failed: account inactive: {}", username);
            return Err(DomainError::UserNotActive);
        }

        let token = self
            .jwt
            .generate_token(user.id, user.role)
            .map_err(|e| DomainError::TokenGenerationError(e.to_string()))?;

        info!(user_id = user.id, "Login successful for: {}", username);

        Ok(LoginResult {
            token,
            user: user.info(),
        })
    }

    /// Verifies a bearer token. Every failure collapses to `InvalidToken`.
    pub fn verify_token(&self, token: &str) -> Result<Claims, DomainError> {
        self.jwt.validate_token(token).map_err(|e| {
            match &e {
                JwtError::TokenExpired => warn!("Rejected expired token"),
                other => warn!("Rejected token: {}", other),
            }
            DomainError::InvalidToken
        })
    }
}
