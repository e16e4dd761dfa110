//! Handlers for the public routes (landing, login, logout).

use axum::extract::State;
use axum::response::Redirect;
use axum::Json;
use crm_client::ClientError;
use crm_core::error::CoreError;
use crm_core::login::LoginForm;
use crm_core::navigation::{home_route, LANDING_ROUTE};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Payload of the landing route.
#[derive(Debug, Serialize)]
pub struct LandingView {
    pub page: &'static str,
    pub authenticated: bool,
    /// Where an already authenticated operator should go.
    pub continue_to: Option<String>,
}

/// GET /
pub async fn landing(State(state): State<AppState>) -> Json<LandingView> {
    let authenticated = state.session.current().is_authenticated();
    Json(LandingView {
        page: "login",
        authenticated,
        continue_to: authenticated.then(home_route),
    })
}

/// POST /login
///
/// Validate the form, authenticate upstream, and only then start the
/// session. Any failure leaves the session store untouched.
pub async fn login(
    State(state): State<AppState>,
    Json(form): Json<LoginForm>,
) -> AppResult<Redirect> {
    form.check()?;

    let profile = state
        .upstream
        .authenticate(&form)
        .await
        .map_err(|e| {
            if e.is_unauthorized() {
                let message = match e {
                    ClientError::Rejected { message, .. } => message,
                    other => other.to_string(),
                };
                AppError::Core(CoreError::Unauthorized(message))
            } else {
                AppError::Upstream(e)
            }
        })?;

    state.session.login(profile);
    Ok(Redirect::to(&home_route()))
}

/// POST /logout
///
/// Always succeeds, with or without a session.
pub async fn logout(State(state): State<AppState>) -> Redirect {
    state.session.logout();
    Redirect::to(LANDING_ROUTE)
}
