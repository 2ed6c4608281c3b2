//! Application services

pub mod auth_service;
pub mod user_service;
pub mod member_service;
pub mod package_service;
pub mod checkin_service;
pub mod payment_service;

use std::sync::Arc;

use gym_security::JwtService;

pub use auth_service::{AuthService, LoginResult};
pub use checkin_service::CheckinService;
pub use member_service::MemberService;
pub use package_service::PackageService;
pub use payment_service::PaymentService;
pub use user_service::UserService;

use crate::repositories::Repositories;

/// Every service, wired over one set of repositories.
#[derive(Clone)]
pub struct Services {
    pub auth: Arc<AuthService>,
    pub users: Arc<UserService>,
    pub members: Arc<MemberService>,
    pub packages: Arc<PackageService>,
    pub checkins: Arc<CheckinService>,
    pub payments: Arc<PaymentService>,
}

impl Services {
    pub fn new(repos: Repositories, jwt: Arc<JwtService>) -> Self {
        Self {
            auth: Arc::new(AuthService::new(repos.users.clone(), jwt)),
            users: Arc::new(UserService::new(repos.users)),
            members: Arc::new(MemberService::new(repos.members, repos.packages.clone())),
            packages: Arc::new(PackageService::new(repos.packages)),
            checkins: Arc::new(CheckinService::new(repos.checkins)),
            payments: Arc::new(PaymentService::new(repos.payments)),
        }
    }
}
