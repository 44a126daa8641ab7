//! Access registry for Guild organizations.
//!
//! Maps named roles and named actions to authorized callers:
//!
//! - **Roles** have members and an admin role. Holding a role's admin role is
//!   what allows granting or revoking it (delegated administration). Roles
//!   without an explicit admin are administered by `DEFAULT_ADMIN_ROLE`.
//! - **Actions** (a function on a target contract) carry an insertion-ordered
//!   set of authorized roles. A caller is authorized for an action iff it holds
//!   at least one of them.
//!
//! The registry's own administrative entry points are actions too, so they are
//! gated by the same predicate as everything else.

pub mod registry;
pub mod role_set;

pub use registry::AccessRegistry;
pub use role_set::RoleSet;
