//! Operator roles and role allow-lists.
//!
//! Role tags match the `role` field returned by the upstream login
//! endpoint.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_SUBADMIN: &str = "subadmin";
pub const ROLE_TEAMHEAD: &str = "teamhead";
pub const ROLE_AGENT: &str = "agent";

/// The closed set of operator roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Subadmin,
    Teamhead,
    Agent,
}

impl Role {
    /// Every role, in descending order of privilege.
    pub const ALL: [Role; 4] = [Role::Admin, Role::Subadmin, Role::Teamhead, Role::Agent];

    pub const fn as_str(self) -> &'static str {
        match self {
            Role::Admin => ROLE_ADMIN,
            Role::Subadmin => ROLE_SUBADMIN,
            Role::Teamhead => ROLE_TEAMHEAD,
            Role::Agent => ROLE_AGENT,
        }
    }

    const fn bit(self) -> u8 {
        match self {
            Role::Admin => 1 << 0,
            Role::Subadmin => 1 << 1,
            Role::Teamhead => 1 << 2,
            Role::Agent => 1 << 3,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ROLE_ADMIN => Ok(Role::Admin),
            ROLE_SUBADMIN => Ok(Role::Subadmin),
            ROLE_TEAMHEAD => Ok(Role::Teamhead),
            ROLE_AGENT => Ok(Role::Agent),
            other => Err(CoreError::Validation(format!(
                "Unknown role: '{other}'. Valid roles: {ROLE_ADMIN}, {ROLE_SUBADMIN}, {ROLE_TEAMHEAD}, {ROLE_AGENT}"
            ))),
        }
    }
}

/// A fixed allow-list of roles.
///
/// Built in `const` context so route tables can declare their allow-lists
/// as constants:
///
/// ```
/// use crm_core::roles::{Role, RoleSet};
///
/// const MANAGERS: RoleSet = RoleSet::of(&[Role::Admin, Role::Subadmin]);
/// assert!(MANAGERS.contains(Role::Admin));
/// assert!(!MANAGERS.contains(Role::Agent));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RoleSet(u8);

impl RoleSet {
    pub const EMPTY: RoleSet = RoleSet(0);
    pub const ALL: RoleSet = RoleSet::of(&Role::ALL);

    pub const fn of(roles: &[Role]) -> Self {
        let mut bits = 0;
        let mut i = 0;
        while i < roles.len() {
            bits |= roles[i].bit();
            i += 1;
        }
        RoleSet(bits)
    }

    pub const fn contains(self, role: Role) -> bool {
        self.0 & role.bit() != 0
    }

    pub const fn with(self, role: Role) -> Self {
        RoleSet(self.0 | role.bit())
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Members in descending order of privilege.
    pub fn iter(self) -> impl Iterator<Item = Role> {
        Role::ALL.into_iter().filter(move |r| self.contains(*r))
    }
}

impl FromIterator<Role> for RoleSet {
    fn from_iter<I: IntoIterator<Item = Role>>(iter: I) -> Self {
        iter.into_iter().fold(RoleSet::EMPTY, RoleSet::with)
    }
}

impl fmt::Display for RoleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().map(Role::as_str).collect();
        write!(f, "[{}]", names.join(", "))
    }
}
