//! In-process execution environment for Guild contracts.
//!
//! The runtime provides what the contracts assume from their platform:
//!
//! - a trusted immediate-caller for every call
//! - all-or-nothing top-level transactions (snapshot and restore)
//! - nonce-based and salted (`create2`) deployment, with collision detection
//! - proxies that hold instance state and an implementation pointer
//! - an ordered event log
//!
//! Contract logic itself lives in `guild-access`, `guild-org` and
//! `guild-treasury`; this crate routes calls to it through the `Host` seam.

pub mod account;
pub mod asset;
pub mod chain;
pub mod config;
pub mod error;
pub mod world;

pub use account::{Account, Blueprint, Instance, Proxy};
pub use asset::{FungibleLedger, NonFungibleLedger};
pub use chain::{Chain, CoreContracts, Receipt};
pub use config::ChainConfig;
pub use error::RuntimeError;
pub use world::WorldState;
