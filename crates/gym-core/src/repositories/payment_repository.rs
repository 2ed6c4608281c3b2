//! Payment repository trait (port)

use async_trait::async_trait;
use gym_shared::EntityId;

use crate::domain::{NewPayment, Payment, PaymentView};
use crate::error::DomainError;
use crate::update::UpdatePlan;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PaymentRepository: Send + Sync {
    /// Newest first.
    async fn list(&self) -> Result<Vec<PaymentView>, DomainError>;
    async fn find_by_id(&self, id: EntityId) -> Result<Option<PaymentView>, DomainError>;
    async fn create(&self, payment: &NewPayment) -> Result<Payment, DomainError>;
    async fn apply(&self, plan: &UpdatePlan) -> Result<u64, DomainError>;
    async fn delete(&self, id: EntityId) -> Result<u64, DomainError>;
}
