//! Named roles.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// A named capability group. Membership is a many-to-many relation to addresses
/// kept by the access registry.
///
/// Roles come into existence the first time they are referenced; there is no
/// declaration step.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(Cow<'static, str>);

impl Role {
    /// Root role: administers itself and every role without an explicit admin.
    pub const DEFAULT_ADMIN: Role = Role(Cow::Borrowed("DEFAULT_ADMIN_ROLE"));

    /// Granted to the bootstrap executors passed to `initialize`.
    pub const EXECUTOR: Role = Role(Cow::Borrowed("EXECUTE_ROLE"));

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_default_admin(&self) -> bool {
        *self == Self::DEFAULT_ADMIN
    }
}

impl fmt::Debug for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Role({})", self.0)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for Role {
    fn from(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }
}

impl From<String> for Role {
    fn from(name: String) -> Self {
        Self(Cow::Owned(name))
    }
}
