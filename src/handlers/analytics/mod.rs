//! Dashboard analytics handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{routing::get, Router};

use crate::state::AppState;

/// Contest dashboard routes (mounted under `/host`)
pub fn host_routes() -> Router<AppState> {
    Router::new().route("/contests/{id}/analytics", get(handler::get_contest_analytics))
}

/// Platform dashboard routes (mounted under `/admin`)
pub fn admin_routes() -> Router<AppState> {
    Router::new().route("/analytics", get(handler::get_platform_analytics))
}
