//! Fundamental types for Guild.
//!
//! This crate defines the vocabulary shared by every other crate in the workspace:
//! addresses, roles, actions, amounts, the calldata ABI, events, the unified
//! contract error, and the `Host` seam contract logic runs against.

pub mod action;
pub mod address;
pub mod amount;
pub mod call;
pub mod chain;
pub mod error;
pub mod event;
pub mod hash;
pub mod host;
pub mod role;

pub use action::{signatures, Action};
pub use address::Address;
pub use amount::{Amount, TokenId};
pub use call::{Call, CallOutput, CreateOrgParams, RegistryInit};
pub use chain::ChainId;
pub use error::{ContractError, Requirement};
pub use event::{Event, LogEntry};
pub use hash::{Hash256, Salt};
pub use host::Host;
pub use role::Role;
