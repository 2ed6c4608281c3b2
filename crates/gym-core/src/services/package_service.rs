//! Package management

use std::sync::Arc;

use gym_shared::EntityId;
use tracing::{info, warn};

use crate::domain::{Package, PackageField};
use crate::error::DomainError;
use crate::repositories::PackageRepository;
use crate::update::{FieldValue, UpdatePlan};
use crate::validation::{self, package, Payload};

pub struct PackageService {
    packages: Arc<dyn PackageRepository>,
}

impl PackageService {
    pub fn new(packages: Arc<dyn PackageRepository>) -> Self {
        Self { packages }
    }

    pub async fn list(&self) -> Result<Vec<Package>, DomainError> {
        self.packages.list().await
    }

    pub async fn get(&self, id: EntityId) -> Result<Package, DomainError> {
        self.packages
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound { entity: "package", id })
    }

    pub async fn create(&self, payload: &Payload) -> Result<Package, DomainError> {
        let new_package = package::check_create(payload)?;
        self.ensure_unique_name(&new_package.package_name, None).await?;

        let created = self.packages.create(&new_package).await?;
        info!(package_id = created.package_id, "Package created: {}", created.package_name);
        Ok(created)
    }

    pub async fn update(&self, id: EntityId, payload: &Payload) -> Result<Package, DomainError> {
        let entries = validation::whitelist::<PackageField>(payload)?;
        self.get(id).await?;

        let fields = package::check_update(&entries)?;
        if let Some(name) = fields.get(PackageField::PackageName).and_then(FieldValue::as_text) {
            self.ensure_unique_name(name, Some(id)).await?;
        }

        let plan = UpdatePlan::for_row::<Package>(id, fields)?;
        self.packages.apply(&plan).await?;
        info!(package_id = id, columns = plan.assignments().len(), "Package updated");

        self.get(id).await
    }

    pub async fn delete(&self, id: EntityId) -> Result<(), DomainError> {
        if self.packages.delete(id).await? == 0 {
            return Err(DomainError::NotFound { entity: "package", id });
        }
        info!(package_id = id, "Package deleted");
        Ok(())
    }

    async fn ensure_unique_name(&self, name: &str, exclude: Option<EntityId>) -> Result<(), DomainError> {
        if self.packages.name_taken(name, exclude).await? {
            warn!("Rejected duplicate package name: {}", name);
            return Err(DomainError::AlreadyExists(format!("package {}", name)));
        }
        Ok(())
    }
}
