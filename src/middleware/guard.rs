//! Role-based access guarding
//!
//! A [`RoleGuard`] decides whether the caller may reach a route group. When
//! the answer is no, the error body carries a `details.redirect` hint telling
//! the front-end where to send the user: the login page for anonymous
//! visitors, the user's own dashboard for authenticated users without access.

use axum::{
    body::Body,
    extract::{OriginalUri, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::debug;

use crate::{
    constants::{API_BASE_PATH, LOGIN_PATH},
    error::AppError,
    middleware::auth::AuthenticatedUser,
    models::Role,
};

/// Set of roles allowed through a route group. Admins always pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleGuard {
    pub allowed: &'static [Role],
}

pub const ADMIN_ONLY: RoleGuard = RoleGuard::new(&[Role::Admin]);
pub const HOSTS: RoleGuard = RoleGuard::new(&[Role::Host]);
pub const JUDGES: RoleGuard = RoleGuard::new(&[Role::Judge]);

/// Outcome of a guard check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Unauthenticated { redirect: String },
    Forbidden { redirect: String },
}

impl RoleGuard {
    pub const fn new(allowed: &'static [Role]) -> Self {
        Self { allowed }
    }

    pub fn permits(&self, role: Role) -> bool {
        role == Role::Admin || self.allowed.contains(&role)
    }

    pub fn evaluate(&self, user: Option<&AuthenticatedUser>, requested_path: &str) -> GuardDecision {
        match user {
            None => GuardDecision::Unauthenticated {
                redirect: login_redirect(requested_path),
            },
            Some(user) if self.permits(user.role) => GuardDecision::Allow,
            Some(user) => GuardDecision::Forbidden {
                redirect: user.role.home_path().to_string(),
            },
        }
    }

    fn describe(&self) -> String {
        self.allowed
            .iter()
            .map(Role::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Login page URL that returns the user to `requested_path` afterwards.
///
/// The API prefix is dropped so `next` names the front-end area.
pub fn login_redirect(requested_path: &str) -> String {
    let path = requested_path
        .strip_prefix(API_BASE_PATH)
        .filter(|rest| rest.starts_with('/'))
        .unwrap_or(requested_path);

    // Protocol-relative paths ("//host") would leave the site
    let next = if path.starts_with('/') && !path.starts_with("//") {
        path
    } else {
        "/"
    };
    format!("{}?next={}", LOGIN_PATH, next)
}

/// Apply a [`RoleGuard`] to a route group.
///
/// Use with `axum::middleware::from_fn_with_state(guard, require_roles)`
/// inside the authentication layer.
pub async fn require_roles(
    State(guard): State<RoleGuard>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let path = request
        .extensions()
        .get::<OriginalUri>()
        .map(|uri| uri.path().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());
    let user = request.extensions().get::<AuthenticatedUser>();
    let role = user.map(|u| u.role);
    let decision = guard.evaluate(user, &path);

    match decision {
        GuardDecision::Allow => next.run(request).await,
        GuardDecision::Unauthenticated { redirect } => {
            debug!(path = %path, "Guard rejected anonymous request");
            AppError::Unauthorized.with_redirect(redirect).into_response()
        }
        GuardDecision::Forbidden { redirect } => {
            debug!(path = %path, role = ?role, "Guard rejected role");
            AppError::Forbidden(format!("Requires one of: {}", guard.describe()))
                .with_redirect(redirect)
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn user(role: Role) -> AuthenticatedUser {
        AuthenticatedUser {
            id: Uuid::new_v4(),
            username: "tester".to_string(),
            role,
            session_id: Uuid::new_v4(),
        }
    }

    #[test]
    fn test_anonymous_is_sent_to_login() {
        assert_eq!(
            HOSTS.evaluate(None, "/host/contests"),
            GuardDecision::Unauthenticated {
                redirect: "/login?next=/host/contests".to_string()
            }
        );
    }

    #[test]
    fn test_non_absolute_paths_fall_back_to_root() {
        assert_eq!(login_redirect("admin"), "/login?next=/");
        assert_eq!(login_redirect("//evil.example"), "/login?next=/");
        assert_eq!(login_redirect(""), "/login?next=/");
    }

    #[test]
    fn test_api_prefix_is_stripped() {
        assert_eq!(
            login_redirect("/api/v1/host/contests"),
            "/login?next=/host/contests"
        );
        assert_eq!(login_redirect("/api/v1"), "/login?next=/api/v1");
        assert_eq!(login_redirect("/api/v1//evil.example"), "/login?next=/");
    }

    #[test]
    fn test_admin_always_allowed() {
        let admin = user(Role::Admin);
        for guard in [ADMIN_ONLY, HOSTS, JUDGES] {
            assert_eq!(guard.evaluate(Some(&admin), "/x"), GuardDecision::Allow);
        }
    }

    #[test]
    fn test_wrong_role_goes_home() {
        let participant = user(Role::Participant);
        assert_eq!(
            JUDGES.evaluate(Some(&participant), "/judge"),
            GuardDecision::Forbidden {
                redirect: "/dashboard".to_string()
            }
        );

        let judge = user(Role::Judge);
        assert_eq!(JUDGES.evaluate(Some(&judge), "/judge"), GuardDecision::Allow);
        assert_eq!(
            HOSTS.evaluate(Some(&judge), "/host"),
            GuardDecision::Forbidden {
                redirect: "/judge".to_string()
            }
        );
    }
}
