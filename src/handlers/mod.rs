//! HTTP Request Handlers
//!
//! This module contains all HTTP request handlers organized by domain.
//! Route groups for staff areas are gated twice: `auth_middleware`
//! resolves the session, then a [`RoleGuard`](crate::middleware::RoleGuard)
//! checks the caller's role.

pub mod admin;
pub mod analytics;
pub mod auth;
pub mod contests;
pub mod health;
pub mod inquiries;
pub mod judging;
pub mod submissions;
pub mod users;

use axum::{middleware, Router};

use crate::{
    middleware::{
        auth::{auth_middleware, optional_auth_middleware},
        guard::{require_roles, RoleGuard, ADMIN_ONLY, HOSTS, JUDGES},
    },
    state::AppState,
};

/// Create all API routes
pub fn routes(state: AppState) -> Router<AppState> {
    let host = Router::new()
        .merge(contests::host_routes())
        .merge(submissions::host_routes())
        .merge(judging::host_routes())
        .merge(analytics::host_routes());

    let admin = Router::new()
        .merge(admin::routes())
        .merge(inquiries::admin_routes())
        .merge(analytics::admin_routes());

    Router::new()
        .merge(health::routes())
        .nest("/auth", auth::routes(state.clone()))
        .nest("/users", users::routes(state.clone()))
        .nest(
            "/contests",
            contests::routes().route_layer(middleware::from_fn_with_state(
                state.clone(),
                optional_auth_middleware,
            )),
        )
        .nest(
            "/submissions",
            submissions::routes()
                .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware)),
        )
        .nest("/inquiries", inquiries::routes())
        .nest("/host", guarded(host, HOSTS, &state))
        .nest("/judge", guarded(judging::judge_routes(), JUDGES, &state))
        .nest("/admin", guarded(admin, ADMIN_ONLY, &state))
}

/// Put a route group behind authentication and a role guard.
///
/// Layers run last-added first, so authentication wraps the guard.
fn guarded(routes: Router<AppState>, guard: RoleGuard, state: &AppState) -> Router<AppState> {
    routes
        .route_layer(middleware::from_fn_with_state(guard, require_roles))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
}
