//! Public routes.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at the root.
///
/// ```text
/// GET  /         -> landing
/// POST /login    -> login
/// POST /logout   -> logout
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(auth::landing))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
}
