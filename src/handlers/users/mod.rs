//! User profile handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{middleware, routing::get, Router};

use crate::{middleware::auth::auth_middleware, state::AppState};

/// User routes
pub fn routes(state: AppState) -> Router<AppState> {
    let own_profile = Router::new()
        .route("/me", get(handler::get_own_profile).put(handler::update_own_profile))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    Router::new()
        .route("/{username}", get(handler::get_public_profile))
        .merge(own_profile)
}
