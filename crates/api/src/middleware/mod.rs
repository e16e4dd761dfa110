//! Navigation gates.
//!
//! - [`gate::require_session`] -- Authentication gate, any role.
//! - [`gate::require_roles`] -- Role gate with a per-page allow-list.

pub mod gate;
