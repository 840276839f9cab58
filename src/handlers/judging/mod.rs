//! Judging handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{
    routing::{delete, get, put},
    Router,
};

use crate::state::AppState;

/// Panel management routes (mounted under `/host`)
pub fn host_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/contests/{id}/judges",
            get(handler::list_panel).post(handler::assign_judge),
        )
        .route("/contests/{id}/judges/{judge_id}", delete(handler::unassign_judge))
}

/// Judge workspace routes (mounted under `/judge`)
pub fn judge_routes() -> Router<AppState> {
    Router::new()
        .route("/contests", get(handler::list_assigned_contests))
        .route("/contests/{id}/submissions", get(handler::get_judge_queue))
        .route("/submissions/{id}/score", put(handler::upsert_score))
}
