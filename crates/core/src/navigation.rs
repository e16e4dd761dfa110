//! Navigation surface of the console.
//!
//! ```text
//! /                   landing (login), public
//! /admin              guarded subtree root, redirects to the dashboard
//! /admin/dashboard    all roles
//! /admin/leads        all roles
//! /admin/users        admin, subadmin, teamhead
//! /admin/products     admin, subadmin
//! /admin/orders       admin, subadmin
//! /admin/profile      all roles
//! ```

use serde::Serialize;

use crate::roles::{Role, RoleSet};

/// Public landing route. Every guard redirect points here.
pub const LANDING_ROUTE: &str = "/";

/// Root of the guarded subtree.
pub const ADMIN_ROOT: &str = "/admin";

const MANAGERS: RoleSet = RoleSet::of(&[Role::Admin, Role::Subadmin]);
const SUPERVISORS: RoleSet = RoleSet::of(&[Role::Admin, Role::Subadmin, Role::Teamhead]);

/// A page inside the guarded subtree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AdminPage {
    Dashboard,
    Leads,
    Users,
    Products,
    Orders,
    Profile,
}

impl AdminPage {
    /// Menu order.
    pub const ALL: [AdminPage; 6] = [
        AdminPage::Dashboard,
        AdminPage::Leads,
        AdminPage::Users,
        AdminPage::Products,
        AdminPage::Orders,
        AdminPage::Profile,
    ];

    /// Path segment below [`ADMIN_ROOT`].
    pub const fn segment(self) -> &'static str {
        match self {
            AdminPage::Dashboard => "dashboard",
            AdminPage::Leads => "leads",
            AdminPage::Users => "users",
            AdminPage::Products => "products",
            AdminPage::Orders => "orders",
            AdminPage::Profile => "profile",
        }
    }

    /// Full route, e.g. `/admin/leads`.
    pub fn path(self) -> String {
        format!("{ADMIN_ROOT}/{}", self.segment())
    }

    /// Roles allowed to open the page.
    pub const fn allowed_roles(self) -> RoleSet {
        match self {
            AdminPage::Dashboard | AdminPage::Leads | AdminPage::Profile => RoleSet::ALL,
            AdminPage::Users => SUPERVISORS,
            AdminPage::Products | AdminPage::Orders => MANAGERS,
        }
    }

    /// Upstream collection backing the page, if it shows one.
    pub const fn resource(self) -> Option<&'static str> {
        match self {
            AdminPage::Leads => Some("leads"),
            AdminPage::Users => Some("users"),
            AdminPage::Products => Some("products"),
            AdminPage::Orders => Some("orders"),
            AdminPage::Dashboard | AdminPage::Profile => None,
        }
    }

    /// Pages a role may navigate to, in menu order.
    pub fn visible_to(role: Role) -> Vec<AdminPage> {
        Self::ALL
            .into_iter()
            .filter(|p| p.allowed_roles().contains(role))
            .collect()
    }
}

/// Where a freshly authenticated operator lands.
pub fn home_route() -> String {
    AdminPage::Dashboard.path()
}
