//! Repository traits (ports)

pub mod user_repository;
pub mod member_repository;
pub mod package_repository;
pub mod checkin_repository;
pub mod payment_repository;

use std::sync::Arc;

pub use user_repository::UserRepository;
pub use member_repository::MemberRepository;
pub use package_repository::PackageRepository;
pub use checkin_repository::CheckinRepository;
pub use payment_repository::PaymentRepository;

#[cfg(test)]
pub use checkin_repository::MockCheckinRepository;
#[cfg(test)]
pub use member_repository::MockMemberRepository;
#[cfg(test)]
pub use package_repository::MockPackageRepository;
#[cfg(test)]
pub use payment_repository::MockPaymentRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;

/// One handle per store port, shared by the services.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub members: Arc<dyn MemberRepository>,
    pub packages: Arc<dyn PackageRepository>,
    pub checkins: Arc<dyn CheckinRepository>,
    pub payments: Arc<dyn PaymentRepository>,
}
