//! `reqwest`-backed client for the upstream CRM API.

use std::time::Duration;

use crm_core::login::LoginForm;
use crm_core::session::{BearerToken, SessionProfile};
use reqwest::header::AUTHORIZATION;
use reqwest::{Response, StatusCode};

use crate::error::ClientError;
use crate::wire::{ErrorBody, LoginRequest, LoginResponse};

/// Path of the authentication endpoint below the base URL.
pub const LOGIN_PATH: &str = "auth/login";

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client for the API rooted at `base_url`
    /// (e.g. `http://localhost:3000/api`).
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Exchange credentials for a session profile.
    ///
    /// Only a 2xx reply with a complete profile and a known role succeeds.
    pub async fn authenticate(&self, form: &LoginForm) -> Result<SessionProfile, ClientError> {
        let body = LoginRequest {
            email: &form.email,
            password: &form.password,
        };
        let resp = self.http.post(self.url(LOGIN_PATH)).json(&body).send().await?;
        let resp = ensure_success(resp).await?;

        let payload: LoginResponse = resp
            .json()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))?;
        let profile = SessionProfile::try_from(payload)?;

        tracing::debug!(user_id = %profile.id, role = %profile.role, "Upstream authentication succeeded");
        Ok(profile)
    }

    /// `GET {base}/{resource}` with bearer auth. The body is returned as-is.
    pub async fn fetch_collection(
        &self,
        resource: &str,
        token: &BearerToken,
    ) -> Result<serde_json::Value, ClientError> {
        let resp = self
            .http
            .get(self.url(resource))
            .header(AUTHORIZATION, token.header_value())
            .send()
            .await?;
        let resp = ensure_success(resp).await?;

        resp.json()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }
}

/// Turn a non-2xx reply into [`ClientError::Rejected`], pulling the
/// upstream message out of the body when there is one.
async fn ensure_success(resp: Response) -> Result<Response, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let message = resp
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(ErrorBody::into_message)
        .unwrap_or_else(|| default_message(status));

    tracing::debug!(status = status.as_u16(), %message, "Upstream rejected request");
    Err(ClientError::Rejected {
        status: status.as_u16(),
        message,
    })
}

fn default_message(status: StatusCode) -> String {
    status
        .canonical_reason()
        .unwrap_or("Unexpected response")
        .to_string()
}
