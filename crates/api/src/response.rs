//! Shared response envelope types for page handlers.
//!
//! All page payloads use a `{ "data": ... }` envelope. Use [`DataResponse`]
//! instead of ad-hoc `serde_json::json!({ "data": ... })`.

use crm_core::navigation::AdminPage;
use crm_core::roles::Role;
use crm_core::session::SessionProfile;
use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// Operator identity as shown to the UI. Never includes the token.
#[derive(Debug, Serialize)]
pub struct ProfileView {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl From<&SessionProfile> for ProfileView {
    fn from(p: &SessionProfile) -> Self {
        Self {
            id: p.id.clone(),
            name: p.name.clone(),
            email: p.email.clone(),
            role: p.role,
        }
    }
}

/// One entry of the navigation menu.
#[derive(Debug, Serialize)]
pub struct MenuEntry {
    pub page: AdminPage,
    pub path: String,
}

impl From<AdminPage> for MenuEntry {
    fn from(page: AdminPage) -> Self {
        Self {
            page,
            path: page.path(),
        }
    }
}
