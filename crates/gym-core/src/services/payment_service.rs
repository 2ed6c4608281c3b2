//! Payment recording

use std::sync::Arc;

use gym_shared::EntityId;
use tracing::info;

use crate::domain::{Payment, PaymentField, PaymentView};
use crate::error::DomainError;
use crate::repositories::PaymentRepository;
use crate::update::UpdatePlan;
use crate::validation::{self, payment, Payload};

pub struct PaymentService {
    payments: Arc<dyn PaymentRepository>,
}

impl PaymentService {
    pub fn new(payments: Arc<dyn PaymentRepository>) -> Self {
        Self { payments }
    }

    pub async fn list(&self) -> Result<Vec<PaymentView>, DomainError> {
        self.payments.list().await
    }

    pub async fn get(&self, id: EntityId) -> Result<PaymentView, DomainError> {
        self.payments
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound { entity: "payment", id })
    }

    /// `recorded_by` becomes `staff_id` unless the payload names one.
    pub async fn create(&self, payload: &Payload, recorded_by: EntityId) -> Result<Payment, DomainError> {
        let new_payment = payment::check_create(payload, recorded_by)?;
        let created = self.payments.create(&new_payment).await?;
        info!(
            payment_id = created.payment_id,
            member_id = created.member_id,
            amount = created.amount,
            "Payment recorded"
        );
        Ok(created)
    }

    pub async fn update(&self, id: EntityId, payload: &Payload) -> Result<PaymentView, DomainError> {
        let entries = validation::whitelist::<PaymentField>(payload)?;
        self.get(id).await?;

        let fields = payment::check_update(&entries)?;
        let plan = UpdatePlan::for_row::<Payment>(id, fields)?;
        self.payments.apply(&plan).await?;
        info!(payment_id = id, columns = plan.assignments().len(), "Payment updated");

        self.get(id).await
    }

    pub async fn delete(&self, id: EntityId) -> Result<(), DomainError> {
        if self.payments.delete(id).await? == 0 {
            return Err(DomainError::NotFound { entity: "payment", id });
        }
        info!(payment_id = id, "Payment deleted");
        Ok(())
    }
}
