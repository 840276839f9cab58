//! Contact form handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

/// Public contact form
pub fn routes() -> Router<AppState> {
    Router::new().route("/", post(handler::create_inquiry))
}

/// Inbox routes (mounted under `/admin`)
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/inquiries", get(handler::list_inquiries))
        .route("/inquiries/{id}/resolve", post(handler::resolve_inquiry))
}
