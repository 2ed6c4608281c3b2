//! Application-wide constants

pub const DEFAULT_TOKEN_EXPIRY_SECONDS: i64 = 86_400;
pub const MIN_JWT_SECRET_LENGTH: usize = 32;
pub const MIN_PASSWORD_LENGTH: usize = 6;
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const DEFAULT_LOG_FILTER: &str = "info,gym_api=debug,gym_core=debug";
pub const DEFAULT_LOG_FILE_PREFIX: &str = "gym-server.log";
