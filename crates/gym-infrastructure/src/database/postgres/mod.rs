//! PostgreSQL repository implementations

pub mod user_repo_impl;
pub mod member_repo_impl;
pub mod package_repo_impl;
pub mod checkin_repo_impl;
pub mod payment_repo_impl;

pub use user_repo_impl::PgUserRepository;
pub use member_repo_impl::PgMemberRepository;
pub use package_repo_impl::PgPackageRepository;
pub use checkin_repo_impl::PgCheckinRepository;
pub use payment_repo_impl::PgPaymentRepository;
