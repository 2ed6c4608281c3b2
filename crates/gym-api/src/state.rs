use std::ops::Deref;
use std::sync::Arc;

use gym_core::repositories::Repositories;
use gym_core::services::Services;
use gym_security::JwtService;

#[derive(Clone)]
pub struct AppState {
    services: Services,
}

impl AppState {
    pub fn new(repos: Repositories, jwt: Arc<JwtService>) -> Self {
        Self {
            services: Services::new(repos, jwt),
        }
    }
}

impl Deref for AppState {
    type Target = Services;

    fn deref(&self) -> &Self::Target {
        &self.services
    }
}
