//! Authentication and role gates as Axum middleware.
//!
//! The store is read once per request, by the authentication gate; the role
//! gate reuses that snapshot. A logout is seen by the very next request.
//! A refused request gets `303 See Other` to the landing route; a wrong
//! role and a missing session look the same from outside.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use crm_core::guard::{evaluate_chain, AuthGate, Gate, GuardDecision, RoleGate};
use crm_core::roles::RoleSet;
use crm_core::session::{Session, SessionProfile};

use crate::state::AppState;

/// Authentication gate for the `/admin` subtree.
///
/// On success the [`SessionProfile`] of the snapshot just checked is
/// inserted into the request extensions for handlers to extract.
pub async fn require_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let session = state.session.current();
    match AuthGate.evaluate(&session) {
        GuardDecision::Render => {
            if let Session::Authenticated(profile) = session {
                request.extensions_mut().insert(profile);
            }
            next.run(request).await
        }
        GuardDecision::Redirect { to, .. } => {
            tracing::debug!(path = %request.uri().path(), "No session, redirecting to landing");
            Redirect::to(to).into_response()
        }
    }
}

/// Guard chain of one mounted page: authentication, then the page's role
/// allow-list.
#[derive(Debug, Clone, Copy)]
pub struct RoleGuard {
    chain: [Gate; 2],
}

impl RoleGuard {
    pub fn new(allowed: RoleSet) -> Self {
        Self {
            chain: [AuthGate.into(), RoleGate::new(allowed).into()],
        }
    }
}

/// Role gate for a single page. Mount with
/// `middleware::from_fn_with_state(RoleGuard::new(..), require_roles)` inside
/// [`require_session`].
///
/// Decides on the profile [`require_session`] put in the request, so the
/// check and the handler see the same session even if a login or logout
/// lands in between. Without that extension the request is treated as
/// anonymous.
pub async fn require_roles(
    State(guard): State<RoleGuard>,
    request: Request,
    next: Next,
) -> Response {
    let session = request
        .extensions()
        .get::<SessionProfile>()
        .cloned()
        .map(Session::Authenticated)
        .unwrap_or_default();

    match evaluate_chain(&session, &guard.chain) {
        GuardDecision::Render => next.run(request).await,
        GuardDecision::Redirect { to, .. } => {
            tracing::debug!(
                path = %request.uri().path(),
                role = ?session.role(),
                "Role not permitted, redirecting to landing"
            );
            Redirect::to(to).into_response()
        }
    }
}
