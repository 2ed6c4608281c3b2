//! User account management

use std::sync::Arc;

use gym_shared::EntityId;
use tracing::{info, warn};

use crate::domain::{User, UserField, UserInfo};
use crate::error::DomainError;
use crate::repositories::UserRepository;
use crate::update::UpdatePlan;
use crate::validation::{self, user, Payload};

pub struct UserService {
    users: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn list(&self) -> Result<Vec<UserInfo>, DomainError> {
        let users = self.users.list().await?;
        Ok(users.iter().map(UserInfo::from).collect())
    }

    /// Registers an account. The password is hashed before it reaches the store.
    pub async fn create(&self, payload: &Payload) -> Result<UserInfo, DomainError> {
        let new_user = user::check_create(payload)?;

        if self.users.username_taken(&new_user.username, None).await? {
            warn!("Registration failed: username already exists: {}", new_user.username);
            return Err(DomainError::AlreadyExists(format!("username {}", new_user.username)));
        }

        let created = self.users.create(&new_user).await?;
        info!(user_id = created.id, "User registered: {}", created.username);
        Ok(created.info())
    }

    pub async fn update(&self, id: EntityId, payload: &Payload) -> Result<UserInfo, DomainError> {
        let entries = validation::whitelist::<UserField>(payload)?;
        self.find(id).await?;

        let fields = user::check_update(&entries)?;
        if let Some(username) = fields.get(UserField::Username).and_then(|v| v.as_text()) {
            if self.users.username_taken(username, Some(id)).await? {
                return Err(DomainError::AlreadyExists(format!("username {}", username)));
            }
        }

        let plan = UpdatePlan::for_row::<User>(id, fields)?;
        self.users.apply(&plan).await?;
        info!(user_id = id, columns = plan.assignments().len(), "User updated");

        Ok(self.find(id).await?.info())
    }

    pub async fn delete(&self, id: EntityId) -> Result<(), DomainError> {
        if self.users.delete(id).await? == 0 {
            return Err(DomainError::NotFound { entity: "user", id });
        }
        info!(user_id = id, "User deleted");
        Ok(())
    }

    async fn find(&self, id: EntityId) -> Result<User, DomainError> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound { entity: "user", id })
    }
}
