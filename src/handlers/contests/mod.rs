//! Contest handlers
//!
//! Public listing and landing pages, plus contest management for hosts.

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

/// Public contest routes (optional authentication)
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::list_contests))
        .route("/{slug}", get(handler::get_contest))
        .route("/{slug}/submissions", get(handler::list_gallery))
        .route("/{slug}/results", get(handler::get_results))
}

/// Contest management routes (mounted under `/host`)
pub fn host_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/contests",
            get(handler::list_hosted_contests).post(handler::create_contest),
        )
        .route(
            "/contests/{id}",
            get(handler::get_managed_contest)
                .put(handler::update_contest)
                .delete(handler::delete_contest),
        )
        .route("/contests/{id}/publish", post(handler::publish_contest))
        .route("/contests/{id}/archive", post(handler::archive_contest))
}
