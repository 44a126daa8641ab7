//! Contract error shared by every contract kind.
//!
//! All variants abort the enclosing top-level call; nothing is recovered locally.

use crate::action::Action;
use crate::address::Address;
use crate::role::Role;
use std::fmt;
use thiserror::Error;

/// What an unauthorized caller was missing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Requirement {
    /// None of the caller's roles is authorized for the action.
    Action(Action),
    /// The caller does not hold the admin role of the role being changed.
    Role(Role),
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Action(action) => write!(f, "action {action}"),
            Self::Role(role) => write!(f, "role {role}"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ContractError {
    #[error("{caller} is not authorized: requires {requirement}")]
    AuthorizationDenied {
        caller: Address,
        requirement: Requirement,
    },

    #[error("parallel array arguments differ in length")]
    ArraysNotEqual,

    #[error("contract is already initialized")]
    AlreadyInitialized,

    #[error("contract is not initialized")]
    NotInitialized,

    #[error("address {0} already has code")]
    AddressCollision(Address),

    #[error("{0} holds default-admin for life and cannot lose it")]
    CannotRevokeRoot(Address),

    #[error("sub-call {index} failed: {source}")]
    SubCallFailed {
        index: usize,
        source: Box<ContractError>,
    },

    #[error("reentrant call rejected")]
    ReentrantCall,

    #[error("{address} is not {expected}")]
    UnexpectedAccount {
        address: Address,
        expected: &'static str,
    },

    #[error("{0} is not a valid implementation")]
    InvalidImplementation(Address),

    #[error("{target} does not expose {function}")]
    UnknownFunction {
        target: Address,
        function: &'static str,
    },

    #[error("invalid calldata: {0}")]
    InvalidCalldata(String),

    #[error("insufficient balance: need {needed}, have {available}")]
    InsufficientBalance { needed: u128, available: u128 },

    #[error("insufficient allowance: need {needed}, have {available}")]
    InsufficientAllowance { needed: u128, available: u128 },

    #[error("{account} does not own token {token_id}")]
    NotTokenOwner { account: Address, token_id: u128 },

    #[error("{spender} is not approved for token {token_id}")]
    NotApproved { spender: Address, token_id: u128 },

    #[error("call depth limit {0} exceeded")]
    CallDepthExceeded(usize),

    #[error("arithmetic overflow")]
    Overflow,

    #[error("salt text must be shorter than 32 bytes")]
    InvalidSalt,
}

impl ContractError {
    /// Convenience constructor for an action-level denial.
    pub fn denied_action(caller: Address, action: Action) -> Self {
        Self::AuthorizationDenied {
            caller,
            requirement: Requirement::Action(action),
        }
    }

    /// Convenience constructor for a role-admin denial.
    pub fn denied_role(caller: Address, role: Role) -> Self {
        Self::AuthorizationDenied {
            caller,
            requirement: Requirement::Role(role),
        }
    }

    /// Whether this error, or the sub-call failure it wraps, is an authorization denial.
    pub fn is_authorization_denied(&self) -> bool {
        match self {
            Self::AuthorizationDenied { .. } => true,
            Self::SubCallFailed { source, .. } => source.is_authorization_denied(),
            _ => false,
        }
    }

    /// Unwrap nested sub-call failures down to the originating error.
    pub fn root_cause(&self) -> &ContractError {
        match self {
            Self::SubCallFailed { source, .. } => source.root_cause(),
            other => other,
        }
    }
}
