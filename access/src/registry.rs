//! The access registry state machine.
//!
//! Every mutating entry point takes the immediate caller and an event sink.
//! Authorization and argument checks run before the first write, so a failing
//! call leaves the registry untouched even without the runtime's rollback.

use crate::role_set::RoleSet;
use guild_types::{
    signatures, Action, Address, Call, CallOutput, ContractError, Event, RegistryInit, Role,
};
use std::collections::{HashMap, HashSet};

/// Registry functions that are themselves gated actions on the registry.
const SELF_GATED: [&str; 3] = [
    signatures::CREATE_ROLES,
    signatures::ADD_ACTIONS_ROLES,
    signatures::REMOVE_ACTIONS_ROLES,
];

/// Role membership, role administration and action authorization for one org.
#[derive(Clone, Debug)]
pub struct AccessRegistry {
    /// Address this registry instance lives at.
    address: Address,
    /// The org bound to the default-admin role at initialization. Never changes.
    root: Option<Address>,
    /// Explicit admin role per role. Absent entries fall back to default-admin.
    admins: HashMap<Role, Role>,
    members: HashMap<Role, HashSet<Address>>,
    actions: HashMap<Action, RoleSet>,
}

impl AccessRegistry {
    pub fn new(address: Address) -> Self {
        Self {
            address,
            root: None,
            admins: HashMap::new(),
            members: HashMap::new(),
            actions: HashMap::new(),
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// The principal holding default-admin since initialization (the org).
    pub fn root(&self) -> Option<Address> {
        self.root
    }

    pub fn is_initialized(&self) -> bool {
        self.root.is_some()
    }

    /// The registry's own administrative action for `function`.
    pub fn admin_action(&self, function: &'static str) -> Action {
        Action::new(self.address, function)
    }

    /// Route a decoded call to this registry.
    pub fn handle(
        &mut self,
        caller: &Address,
        call: Call,
        events: &mut Vec<Event>,
    ) -> Result<CallOutput, ContractError> {
        match call {
            Call::Initialize(init) => self.initialize(caller, init, events).map(|_| CallOutput::Unit),
            Call::CreateRoles {
                roles,
                role_admins,
                members,
            } => self
                .create_roles(caller, roles, role_admins, members, events)
                .map(|_| CallOutput::Unit),
            Call::AdminGrantRole { role, account } => self
                .admin_grant_role(caller, role, account, events)
                .map(|_| CallOutput::Unit),
            Call::AdminRevokeRole { role, account } => self
                .admin_revoke_role(caller, role, account, events)
                .map(|_| CallOutput::Unit),
            Call::AddActionsRoles { actions, roles } => self
                .add_actions_roles(caller, actions, roles, events)
                .map(|_| CallOutput::Unit),
            Call::RemoveActionsRoles { actions, roles } => self
                .remove_actions_roles(caller, actions, roles, events)
                .map(|_| CallOutput::Unit),
            Call::HasRole { role, account } => Ok(CallOutput::Bool(self.has_role(&role, &account))),
            Call::GetRoleAdmin { role } => Ok(CallOutput::Role(self.get_role_admin(&role))),
            Call::GetActionRoles { action } => {
                Ok(CallOutput::Roles(self.get_action_roles(&action).to_vec()))
            }
            Call::IsRoleAuthorized { action, role } => {
                Ok(CallOutput::Bool(self.is_role_authorized(&action, &role)))
            }
            Call::IsAuthorized { caller: account, action } => {
                Ok(CallOutput::Bool(self.is_authorized(&account, &action)))
            }
            other => Err(ContractError::UnknownFunction {
                target: self.address,
                function: other.signature(),
            }),
        }
    }

    // ── Bootstrap ──────────────────────────────────────────────────────

    /// One-shot bootstrap.
    ///
    /// In order: default-admin to `init.root`, executor role to every
    /// executor, admin and members for every listed role, the registry's own
    /// administrative actions bound to default-admin, then the initial
    /// action table.
    pub fn initialize(
        &mut self,
        caller: &Address,
        init: RegistryInit,
        events: &mut Vec<Event>,
    ) -> Result<(), ContractError> {
        if self.is_initialized() {
            return Err(ContractError::AlreadyInitialized);
        }
        if init.roles.len() != init.role_admins.len() || init.roles.len() != init.members.len() {
            return Err(ContractError::ArraysNotEqual);
        }
        if init.actions.len() != init.action_roles.len() {
            return Err(ContractError::ArraysNotEqual);
        }

        self.root = Some(init.root);
        events.push(Event::RegistryInitialized { root: init.root });
        self.grant_role(Role::DEFAULT_ADMIN, init.root, *caller, events);

        for executor in init.executors {
            self.grant_role(Role::EXECUTOR, executor, *caller, events);
        }

        self.apply_roles(caller, init.roles, init.role_admins, init.members, events);

        for function in SELF_GATED {
            let action = self.admin_action(function);
            self.add_action_role(action, Role::DEFAULT_ADMIN, events);
        }
        for (action, roles) in init.actions.into_iter().zip(init.action_roles) {
            for role in roles {
                self.add_action_role(action.clone(), role, events);
            }
        }

        tracing::debug!(registry = %self.address, root = %init.root, "access registry initialized");
        Ok(())
    }

    // ── Gated mutations ────────────────────────────────────────────────

    /// Batched role upsert: overwrite each role's admin (last write wins) and
    /// grant the listed members. Existing members are never revoked.
    pub fn create_roles(
        &mut self,
        caller: &Address,
        roles: Vec<Role>,
        role_admins: Vec<Role>,
        members: Vec<Vec<Address>>,
        events: &mut Vec<Event>,
    ) -> Result<(), ContractError> {
        self.require_authorized(caller, signatures::CREATE_ROLES)?;
        if roles.len() != role_admins.len() || roles.len() != members.len() {
            return Err(ContractError::ArraysNotEqual);
        }
        self.apply_roles(caller, roles, role_admins, members, events);
        Ok(())
    }

    /// Grant `role` to `account`. Caller must hold `role`'s admin role.
    pub fn admin_grant_role(
        &mut self,
        caller: &Address,
        role: Role,
        account: Address,
        events: &mut Vec<Event>,
    ) -> Result<(), ContractError> {
        self.require_role_admin(caller, &role)?;
        self.grant_role(role, account, *caller, events);
        Ok(())
    }

    /// Revoke `role` from `account`. Caller must hold `role`'s admin role.
    ///
    /// The root principal never loses default-admin.
    pub fn admin_revoke_role(
        &mut self,
        caller: &Address,
        role: Role,
        account: Address,
        events: &mut Vec<Event>,
    ) -> Result<(), ContractError> {
        self.require_role_admin(caller, &role)?;
        if role == Role::DEFAULT_ADMIN && self.root == Some(account) {
            return Err(ContractError::CannotRevokeRoot(account));
        }
        self.revoke_role(&role, &account, *caller, events);
        Ok(())
    }

    /// Authorize each listed role for its action. Already-present roles are skipped.
    pub fn add_actions_roles(
        &mut self,
        caller: &Address,
        actions: Vec<Action>,
        roles: Vec<Vec<Role>>,
        events: &mut Vec<Event>,
    ) -> Result<(), ContractError> {
        self.require_authorized(caller, signatures::ADD_ACTIONS_ROLES)?;
        if actions.len() != roles.len() {
            return Err(ContractError::ArraysNotEqual);
        }
        for (action, action_roles) in actions.into_iter().zip(roles) {
            for role in action_roles {
                self.add_action_role(action.clone(), role, events);
            }
        }
        Ok(())
    }

    /// Deauthorize each listed role for its action. Absent roles are skipped.
    pub fn remove_actions_roles(
        &mut self,
        caller: &Address,
        actions: Vec<Action>,
        roles: Vec<Vec<Role>>,
        events: &mut Vec<Event>,
    ) -> Result<(), ContractError> {
        self.require_authorized(caller, signatures::REMOVE_ACTIONS_ROLES)?;
        if actions.len() != roles.len() {
            return Err(ContractError::ArraysNotEqual);
        }
        for (action, action_roles) in actions.into_iter().zip(roles) {
            for role in action_roles {
                self.remove_action_role(&action, &role, events);
            }
        }
        Ok(())
    }

    // ── Reads ──────────────────────────────────────────────────────────

    pub fn has_role(&self, role: &Role, account: &Address) -> bool {
        self.members
            .get(role)
            .is_some_and(|members| members.contains(account))
    }

    /// Admin role of `role`; default-admin when never set.
    pub fn get_role_admin(&self, role: &Role) -> Role {
        self.admins
            .get(role)
            .cloned()
            .unwrap_or(Role::DEFAULT_ADMIN)
    }

    /// Authorized roles of `action` in insertion order; empty when never set.
    pub fn get_action_roles(&self, action: &Action) -> &[Role] {
        self.actions
            .get(action)
            .map(RoleSet::as_slice)
            .unwrap_or(&[])
    }

    pub fn is_role_authorized(&self, action: &Action, role: &Role) -> bool {
        self.actions
            .get(action)
            .is_some_and(|set| set.contains(role))
    }

    /// The authorization predicate: `caller` holds at least one role
    /// authorized for `action`.
    pub fn is_authorized(&self, caller: &Address, action: &Action) -> bool {
        self.get_action_roles(action)
            .iter()
            .any(|role| self.has_role(role, caller))
    }

    // ── Internals ──────────────────────────────────────────────────────

    fn require_authorized(
        &self,
        caller: &Address,
        function: &'static str,
    ) -> Result<(), ContractError> {
        let action = self.admin_action(function);
        if self.is_authorized(caller, &action) {
            Ok(())
        } else {
            Err(ContractError::denied_action(*caller, action))
        }
    }

    fn require_role_admin(&self, caller: &Address, role: &Role) -> Result<(), ContractError> {
        let admin = self.get_role_admin(role);
        if self.has_role(&admin, caller) {
            Ok(())
        } else {
            Err(ContractError::denied_role(*caller, admin))
        }
    }

    fn apply_roles(
        &mut self,
        caller: &Address,
        roles: Vec<Role>,
        role_admins: Vec<Role>,
        members: Vec<Vec<Address>>,
        events: &mut Vec<Event>,
    ) {
        for ((role, admin), accounts) in roles.into_iter().zip(role_admins).zip(members) {
            self.set_role_admin(role.clone(), admin, events);
            for account in accounts {
                self.grant_role(role.clone(), account, *caller, events);
            }
        }
    }

    fn set_role_admin(&mut self, role: Role, admin: Role, events: &mut Vec<Event>) {
        let previous_admin = self.get_role_admin(&role);
        if previous_admin == admin {
            return;
        }
        self.admins.insert(role.clone(), admin.clone());
        events.push(Event::RoleAdminChanged {
            role,
            previous_admin,
            new_admin: admin,
        });
    }

    fn grant_role(&mut self, role: Role, account: Address, sender: Address, events: &mut Vec<Event>) {
        if !self.members.entry(role.clone()).or_default().insert(account) {
            return;
        }
        tracing::debug!(registry = %self.address, %role, %account, "role granted");
        events.push(Event::RoleGranted {
            role,
            account,
            sender,
        });
    }

    fn revoke_role(&mut self, role: &Role, account: &Address, sender: Address, events: &mut Vec<Event>) {
        let removed = self
            .members
            .get_mut(role)
            .is_some_and(|members| members.remove(account));
        if !removed {
            return;
        }
        tracing::debug!(registry = %self.address, %role, %account, "role revoked");
        events.push(Event::RoleRevoked {
            role: role.clone(),
            account: *account,
            sender,
        });
    }

    fn add_action_role(&mut self, action: Action, role: Role, events: &mut Vec<Event>) {
        if self.actions.entry(action.clone()).or_default().insert(role.clone()) {
            events.push(Event::ActionRoleAdded { action, role });
        }
    }

    fn remove_action_role(&mut self, action: &Action, role: &Role, events: &mut Vec<Event>) {
        let removed = self
            .actions
            .get_mut(action)
            .is_some_and(|set| set.remove(role));
        if removed {
            events.push(Event::ActionRoleRemoved {
                action: action.clone(),
                role: role.clone(),
            });
        }
    }
}
