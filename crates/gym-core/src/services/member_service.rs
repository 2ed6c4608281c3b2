//! Member management

use std::sync::Arc;

use gym_shared::EntityId;
use tracing::{info, warn};

use crate::domain::{Member, MemberDetail, MemberField, MemberSummary};
use crate::error::DomainError;
use crate::repositories::{MemberRepository, PackageRepository};
use crate::update::{FieldValue, UpdatePlan};
use crate::validation::{self, member, Payload};

pub struct MemberService {
    members: Arc<dyn MemberRepository>,
    packages: Arc<dyn PackageRepository>,
}

impl MemberService {
    pub fn new(members: Arc<dyn MemberRepository>, packages: Arc<dyn PackageRepository>) -> Self {
        Self { members, packages }
    }

    pub async fn list(&self) -> Result<Vec<MemberSummary>, DomainError> {
        self.members.list().await
    }

    pub async fn get(&self, id: EntityId) -> Result<MemberDetail, DomainError> {
        self.members
            .find_detail(id)
            .await?
            .ok_or(DomainError::NotFound { entity: "member", id })
    }

    pub async fn create(&self, payload: &Payload) -> Result<Member, DomainError> {
        let new_member = member::check_create(payload)?;
        self.ensure_package(new_member.package_id).await?;

        let created = self.members.create(&new_member).await?;
        info!(member_id = created.member_id, "Member created");
        Ok(created)
    }

    /// Applies a partial update. The stored row is loaded first so a lone
    /// `start_date` or `expiry_date` is ordered against its stored partner.
    pub async fn update(&self, id: EntityId, payload: &Payload) -> Result<Member, DomainError> {
        let entries = validation::whitelist::<MemberField>(payload)?;
        let stored = self.find(id).await?;

        let fields = member::check_update(&entries, &stored)?;
        if let Some(package_id) = fields.get(MemberField::PackageId).and_then(FieldValue::as_integer) {
            self.ensure_package(package_id).await?;
        }

        let plan = UpdatePlan::for_row::<Member>(id, fields)?;
        self.members.apply(&plan).await?;
        info!(member_id = id, columns = plan.assignments().len(), "Member updated");

        self.find(id).await
    }

    pub async fn delete(&self, id: EntityId) -> Result<(), DomainError> {
        if self.members.delete(id).await? == 0 {
            return Err(DomainError::NotFound { entity: "member", id });
        }
        info!(member_id = id, "Member deleted");
        Ok(())
    }

    async fn find(&self, id: EntityId) -> Result<Member, DomainError> {
        self.members
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound { entity: "member", id })
    }

    async fn ensure_package(&self, package_id: EntityId) -> Result<(), DomainError> {
        if !self.packages.exists(package_id).await? {
            warn!("Rejected unknown package_id {}", package_id);
            return Err(DomainError::invalid("package_id", "package does not exist"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::{MockMemberRepository, MockPackageRepository};
    use chrono::NaiveDate;
    use mockall::predicate::eq;
    use serde_json::json;

    fn payload(value: serde_json::Value) -> Payload {
        value.as_object().cloned().unwrap()
    }

    fn stored(id: EntityId) -> Member {
        Member {
            member_id: id,
            first_name: "Somchai".into(),
            last_name: "Jaidee".into(),
            phone_number: Some("0812345678".into()),
            package_id: 1,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap(),
            expiry_date: NaiveDate::from_ymd_opt(2024, 12, 31).unwrap().and_hms_opt(0, 0, 0).unwrap().into(),
            photo_url: None,
            is_active: 1,
        }
    }

    fn packages(known: bool) -> MockPackageRepository {
        let mut repo = MockPackageRepository::new();
        repo.expect_exists().returning(move |_| Ok(known));
        repo
    }

    fn service(members: MockMemberRepository, packages: MockPackageRepository) -> MemberService {
        MemberService::new(Arc::new(members), Arc::new(packages))
    }

    #[tokio::test]
    async fn empty_payload_never_reaches_the_store() {
        let mut members = MockMemberRepository::new();
        members.expect_find_by_id().never();
        members.expect_apply().never();

        let err = service(members, MockPackageRepository::new())
            .update(7, &Payload::new())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "no fields provided");
    }

    #[tokio::test]
    async fn lone_expiry_is_ordered_against_stored_start() {
        let mut members = MockMemberRepository::new();
        members.expect_find_by_id().with(eq(7)).returning(|id| Ok(Some(stored(id))));
        members.expect_apply().never();

        let err = service(members, packages(true))
            .update(7, &payload(json!({"expiry_date": "2023-06-01"})))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "invalid expiry_date: cannot be before start date");
    }

    #[tokio::test]
    async fn unknown_package_is_a_validation_error() {
        let mut members = MockMemberRepository::new();
        members.expect_create().never();

        let err = service(members, packages(false))
            .create(&payload(json!({
                "first_name": "Somchai",
                "last_name": "Jaidee",
                "package_id": 9999,
                "start_date": "2024-01-01"
            })))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "invalid package_id: package does not exist");
    }

    #[tokio::test]
    async fn update_to_unknown_package_is_not_applied() {
        let mut members = MockMemberRepository::new();
        members.expect_find_by_id().returning(|id| Ok(Some(stored(id))));
        members.expect_apply().never();

        let mut packages = MockPackageRepository::new();
        packages
            .expect_exists()
            .with(eq(9999))
            .times(1)
            .returning(|_| Ok(false));

        let err = service(members, packages)
            .update(7, &payload(json!({"package_id": 9999})))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "invalid package_id: package does not exist");
    }

    #[tokio::test]
    async fn valid_update_is_applied_once() {
        let mut members = MockMemberRepository::new();
        members.expect_find_by_id().returning(|id| Ok(Some(stored(id))));
        members
            .expect_apply()
            .withf(|plan| {
                plan.sql() == "UPDATE members SET is_active = $1, phone_number = $2 WHERE member_id = $3"
            })
            .times(1)
            .returning(|_| Ok(1));

        let updated = service(members, MockPackageRepository::new())
            .update(7, &payload(json!({"is_active": false, "phone_number": null})))
            .await
            .unwrap();
        assert_eq!(updated.member_id, 7);
    }

    #[tokio::test]
    async fn get_missing_member_is_not_found() {
        let mut members = MockMemberRepository::new();
        members.expect_find_detail().returning(|_| Ok(None));

        let err = service(members, MockPackageRepository::new()).get(42).await.unwrap_err();
        assert_eq!(err.to_string(), "member 42 not found");
    }
}
