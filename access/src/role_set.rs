//! Insertion-ordered, duplicate-free set of roles.

use guild_types::Role;

/// The authorized-role set of one action.
///
/// Order is observable through `getActionRoles`; removing a role and adding it
/// back moves it to the end.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RoleSet(Vec<Role>);

impl RoleSet {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Append `role` unless already present. Returns whether it was added.
    pub fn insert(&mut self, role: Role) -> bool {
        if self.contains(&role) {
            return false;
        }
        self.0.push(role);
        true
    }

    /// Remove `role`, keeping the relative order of the rest. Returns whether
    /// it was present.
    pub fn remove(&mut self, role: &Role) -> bool {
        match self.0.iter().position(|r| r == role) {
            Some(index) => {
                self.0.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, role: &Role) -> bool {
        self.0.contains(role)
    }

    pub fn as_slice(&self) -> &[Role] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
