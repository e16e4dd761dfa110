//! Handlers for the pages under `/admin`.
//!
//! Every handler here runs behind both gates, so the
//! [`SessionProfile`] extension is always present.

use axum::extract::State;
use axum::response::Redirect;
use axum::{Extension, Json};
use crm_core::navigation::{home_route, AdminPage};
use crm_core::session::SessionProfile;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::response::{DataResponse, MenuEntry, ProfileView};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct DashboardView {
    pub user: ProfileView,
    pub menu: Vec<MenuEntry>,
}

/// GET /admin
pub async fn admin_root() -> Redirect {
    Redirect::to(&home_route())
}

/// GET /admin/dashboard
pub async fn dashboard(
    Extension(profile): Extension<SessionProfile>,
) -> Json<DataResponse<DashboardView>> {
    let menu = AdminPage::visible_to(profile.role)
        .into_iter()
        .map(MenuEntry::from)
        .collect();
    Json(DataResponse {
        data: DashboardView {
            user: ProfileView::from(&profile),
            menu,
        },
    })
}

/// GET /admin/profile
pub async fn profile(
    Extension(profile): Extension<SessionProfile>,
) -> Json<DataResponse<ProfileView>> {
    Json(DataResponse {
        data: ProfileView::from(&profile),
    })
}

/// GET /admin/leads
pub async fn leads(
    state: State<AppState>,
    profile: Extension<SessionProfile>,
) -> AppResult<Json<DataResponse<serde_json::Value>>> {
    collection(state, profile, AdminPage::Leads).await
}

/// GET /admin/users
pub async fn users(
    state: State<AppState>,
    profile: Extension<SessionProfile>,
) -> AppResult<Json<DataResponse<serde_json::Value>>> {
    collection(state, profile, AdminPage::Users).await
}

/// GET /admin/products
pub async fn products(
    state: State<AppState>,
    profile: Extension<SessionProfile>,
) -> AppResult<Json<DataResponse<serde_json::Value>>> {
    collection(state, profile, AdminPage::Products).await
}

/// GET /admin/orders
pub async fn orders(
    state: State<AppState>,
    profile: Extension<SessionProfile>,
) -> AppResult<Json<DataResponse<serde_json::Value>>> {
    collection(state, profile, AdminPage::Orders).await
}

/// Fetch the page's upstream collection with the operator's token.
async fn collection(
    State(state): State<AppState>,
    Extension(profile): Extension<SessionProfile>,
    page: AdminPage,
) -> AppResult<Json<DataResponse<serde_json::Value>>> {
    let resource = page.resource().ok_or_else(|| {
        AppError::Core(crm_core::error::CoreError::Internal(format!(
            "page '{}' has no backing collection",
            page.segment()
        )))
    })?;

    let data = state
        .upstream
        .fetch_collection(resource, &profile.token)
        .await?;

    tracing::debug!(user_id = %profile.id, resource, "Fetched collection");
    Ok(Json(DataResponse { data }))
}
