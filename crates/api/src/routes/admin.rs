//! The guarded `/admin` subtree.

use axum::middleware;
use axum::routing::{get, MethodRouter};
use axum::Router;
use crm_core::navigation::AdminPage;

use crate::handlers::pages;
use crate::middleware::gate::{require_roles, require_session, RoleGuard};
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// The authentication gate wraps the whole subtree and takes the one session
/// snapshot of the request; each page additionally sits behind a role gate
/// built from [`AdminPage::allowed_roles`] that checks that same snapshot.
///
/// ```text
/// GET /            -> redirect to /admin/dashboard
/// GET /dashboard   -> dashboard
/// GET /leads       -> leads
/// GET /users       -> users
/// GET /products    -> products
/// GET /orders      -> orders
/// GET /profile     -> profile
/// ```
pub fn router(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(pages::admin_root))
        .merge(page(AdminPage::Dashboard, get(pages::dashboard)))
        .merge(page(AdminPage::Leads, get(pages::leads)))
        .merge(page(AdminPage::Users, get(pages::users)))
        .merge(page(AdminPage::Products, get(pages::products)))
        .merge(page(AdminPage::Orders, get(pages::orders)))
        .merge(page(AdminPage::Profile, get(pages::profile)))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_session,
        ))
}

fn page(page: AdminPage, handler: MethodRouter<AppState>) -> Router<AppState> {
    Router::new()
        .route(&format!("/{}", page.segment()), handler)
        .route_layer(middleware::from_fn_with_state(
            RoleGuard::new(page.allowed_roles()),
            require_roles,
        ))
}
