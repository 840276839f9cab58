//! Admin management handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::state::AppState;

/// Admin routes (mounted behind the admin guard)
pub fn routes() -> Router<AppState> {
    Router::new()
        // User management
        .route("/users", get(handler::list_all_users))
        .route("/users/{id}/role", put(handler::update_user_role))
        .route("/users/{id}/deactivate", post(handler::deactivate_user))
        .route("/users/{id}/reactivate", post(handler::reactivate_user))
        // Audit trail
        .route("/activity", get(handler::list_activity))
        // System overview
        .route("/stats", get(handler::get_system_stats))
}
