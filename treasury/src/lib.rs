//! Treasury: an access-gated custodian.
//!
//! The treasury holds native currency and custodies fungible and non-fungible
//! assets on behalf of an org. Every explicit deposit and every withdrawal is
//! an action on the treasury's own address, authorized through the org's
//! access registry. Plain native-currency receipt is always accepted.
//!
//! Treasuries are deployed either directly or through the treasury factory,
//! which announces each one with `TreasuryCreated`.

pub mod factory;
pub mod treasury;

pub use factory::TreasuryHost;
pub use treasury::Treasury;
