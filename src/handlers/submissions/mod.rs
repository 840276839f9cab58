//! Submission handlers

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

/// Participant submission routes (authenticated)
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(handler::create_submission))
        .route("/mine", get(handler::list_my_submissions))
        .route("/{id}", get(handler::get_submission))
        .route("/{id}/withdraw", post(handler::withdraw_submission))
}

/// Moderation routes (mounted under `/host`)
pub fn host_routes() -> Router<AppState> {
    Router::new()
        .route("/contests/{id}/submissions", get(handler::list_contest_submissions))
        .route("/submissions/{id}/review", post(handler::review_submission))
}
