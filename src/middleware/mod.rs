//! HTTP middleware

pub mod auth;
pub mod client_ip;
pub mod guard;
pub mod logging;
pub mod rate_limit;

pub use auth::{auth_middleware, optional_auth_middleware, AuthenticatedUser, OptionalAuth};
pub use client_ip::ClientIp;
pub use guard::{require_roles, GuardDecision, RoleGuard, ADMIN_ONLY, HOSTS, JUDGES};
pub use logging::logging_middleware;
pub use rate_limit::rate_limit_middleware;
