//! Route guards.
//!
//! Both gates are pure functions of the current [`Session`]; they never fail
//! and always resolve to a [`GuardDecision`]. A role outside the allow-list
//! and a missing session redirect to the same place: the landing route
//! gives no hint which of the two happened.

use crate::navigation::LANDING_ROUTE;
use crate::roles::RoleSet;
use crate::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Render the guarded subtree unchanged.
    Render,
    /// Navigate away. `replace` means the guarded entry must not stay in
    /// history.
    Redirect { to: &'static str, replace: bool },
}

impl GuardDecision {
    pub const fn to_landing() -> Self {
        GuardDecision::Redirect {
            to: LANDING_ROUTE,
            replace: true,
        }
    }

    pub fn is_render(self) -> bool {
        self == GuardDecision::Render
    }
}

/// Lets any session with a role through.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AuthGate;

impl AuthGate {
    pub fn evaluate(self, session: &Session) -> GuardDecision {
        match session.role() {
            Some(_) => GuardDecision::Render,
            None => GuardDecision::to_landing(),
        }
    }
}

/// Lets a session through only if its role is in the allow-list.
///
/// Meant to be nested inside an [`AuthGate`], but stays total on its own:
/// an anonymous session is redirected like any disallowed role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleGate {
    allowed: RoleSet,
}

impl RoleGate {
    pub const fn new(allowed: RoleSet) -> Self {
        Self { allowed }
    }

    pub const fn allowed(self) -> RoleSet {
        self.allowed
    }

    pub fn evaluate(self, session: &Session) -> GuardDecision {
        match session.role() {
            Some(role) if self.allowed.contains(role) => GuardDecision::Render,
            _ => GuardDecision::to_landing(),
        }
    }
}

/// One link in a guard chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    Auth(AuthGate),
    Role(RoleGate),
}

impl Gate {
    pub fn evaluate(self, session: &Session) -> GuardDecision {
        match self {
            Gate::Auth(g) => g.evaluate(session),
            Gate::Role(g) => g.evaluate(session),
        }
    }
}

impl From<AuthGate> for Gate {
    fn from(g: AuthGate) -> Self {
        Gate::Auth(g)
    }
}

impl From<RoleGate> for Gate {
    fn from(g: RoleGate) -> Self {
        Gate::Role(g)
    }
}

/// Evaluate nested gates outermost first; the first redirect wins.
pub fn evaluate_chain(session: &Session, gates: &[Gate]) -> GuardDecision {
    gates
        .iter()
        .map(|g| g.evaluate(session))
        .find(|d| !d.is_render())
        .unwrap_or(GuardDecision::Render)
}
