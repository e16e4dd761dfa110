use std::sync::Arc;

use crm_client::ApiClient;
use crm_session::SessionStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: everything is behind `Arc` or is already a handle.
#[derive(Clone)]
pub struct AppState {
    /// Console configuration.
    pub config: Arc<ServerConfig>,
    /// The one operator session of this console.
    pub session: Arc<SessionStore>,
    /// Client for the upstream CRM API.
    pub upstream: ApiClient,
}
