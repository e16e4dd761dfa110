//! Request and response bodies of the upstream CRM API.

use crm_core::session::{Session, SessionProfile, SessionRecord};
use serde::{Deserialize, Serialize};

use crate::error::ClientError;

/// Request body for `POST /auth/login`.
#[derive(Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Successful reply of `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub user: UserPayload,
    pub token: String,
}

/// User profile embedded in [`LoginResponse`].
#[derive(Debug, Deserialize)]
pub struct UserPayload {
    pub id: OpaqueId,
    pub name: String,
    pub email: String,
    pub role: String,
}

/// Ids come back as strings from some endpoints and numbers from others.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum OpaqueId {
    Text(String),
    Number(serde_json::Number),
}

impl OpaqueId {
    pub fn into_string(self) -> String {
        match self {
            OpaqueId::Text(s) => s,
            OpaqueId::Number(n) => n.to_string(),
        }
    }
}

/// Error body of a non-2xx reply. Both `message` and `error` keys are seen
/// in the wild.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub message: Option<String>,
    pub error: Option<String>,
}

impl ErrorBody {
    pub fn into_message(self) -> Option<String> {
        self.message.or(self.error)
    }
}

impl TryFrom<LoginResponse> for SessionProfile {
    type Error = ClientError;

    fn try_from(resp: LoginResponse) -> Result<Self, Self::Error> {
        let record = SessionRecord {
            id: resp.user.id.into_string(),
            name: resp.user.name,
            email: resp.user.email,
            role: resp.user.role,
            token: resp.token,
        };
        let role = record.role.clone();
        match Session::from_record(record) {
            Session::Authenticated(profile) => Ok(profile),
            Session::Anonymous => Err(ClientError::Decode(format!(
                "login reply is missing fields or carries unknown role '{role}'"
            ))),
        }
    }
}
