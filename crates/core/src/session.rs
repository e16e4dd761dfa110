//! The operator session.
//!
//! A [`Session`] is either fully populated or fully empty. The enum makes a
//! half-filled session unrepresentable in memory; [`Session::from_record`]
//! enforces the same rule at the persistence boundary, where every field is
//! an independent string.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::roles::Role;
use crate::types::UserId;

/// Opaque bearer credential issued by the upstream login endpoint.
///
/// `Debug` output is redacted so tokens never reach the logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BearerToken(String);

impl BearerToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value for the `Authorization` header.
    pub fn header_value(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(***)")
    }
}

/// Identity, role and credential of an authenticated operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionProfile {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub token: BearerToken,
}

impl SessionProfile {
    /// Build a complete profile. Blank (or whitespace-only) fields are
    /// rejected, since such a profile could not be restored from storage.
    pub fn new(
        id: impl Into<UserId>,
        name: impl Into<String>,
        email: impl Into<String>,
        role: Role,
        token: BearerToken,
    ) -> Result<Self, CoreError> {
        let profile = Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            role,
            token,
        };
        let fields = [
            ("id", &profile.id),
            ("name", &profile.name),
            ("email", &profile.email),
            ("token", &profile.token.0),
        ];
        match fields.iter().find(|(_, value)| value.trim().is_empty()) {
            Some((field, _)) => Err(CoreError::Validation(format!(
                "session profile field '{field}' is blank"
            ))),
            None => Ok(profile),
        }
    }
}

/// Raw, field-per-field form of a session as it sits in storage.
///
/// Nothing about this type guarantees consistency; convert through
/// [`Session::from_record`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub token: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Session {
    #[default]
    Anonymous,
    Authenticated(SessionProfile),
}

impl Session {
    /// Build a session from a raw record, all or nothing.
    ///
    /// Any blank field or an unrecognised role tag yields
    /// [`Session::Anonymous`]. Populated fields are carried over verbatim.
    pub fn from_record(record: SessionRecord) -> Self {
        let Ok(role) = record.role.parse::<Role>() else {
            return Session::Anonymous;
        };
        SessionProfile::new(
            record.id,
            record.name,
            record.email,
            role,
            BearerToken(record.token),
        )
        .map_or(Session::Anonymous, Session::Authenticated)
    }

    /// Flatten into a raw record. An anonymous session becomes the all-blank
    /// record.
    pub fn to_record(&self) -> SessionRecord {
        match self {
            Session::Anonymous => SessionRecord::default(),
            Session::Authenticated(p) => SessionRecord {
                id: p.id.clone(),
                name: p.name.clone(),
                email: p.email.clone(),
                role: p.role.as_str().to_string(),
                token: p.token.0.clone(),
            },
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::Authenticated(_))
    }

    pub fn profile(&self) -> Option<&SessionProfile> {
        match self {
            Session::Anonymous => None,
            Session::Authenticated(p) => Some(p),
        }
    }

    pub fn role(&self) -> Option<Role> {
        self.profile().map(|p| p.role)
    }

    pub fn token(&self) -> Option<&BearerToken> {
        self.profile().map(|p| &p.token)
    }
}

impl From<SessionProfile> for Session {
    fn from(profile: SessionProfile) -> Self {
        Session::Authenticated(profile)
    }
}
