//! The organization contract and the factory that creates it.
//!
//! An org is the root principal of its access registry: the registry grants it
//! `DEFAULT_ADMIN_ROLE`, and the org exposes one generic privileged entry
//! point, `execute`, that dispatches authorized batches of sub-calls.
//!
//! The factory brings up an org/registry pair atomically. Both addresses are
//! derived from `(factory, creator, deployer, chain, salt, implementation)`
//! before either contract exists, which is what breaks the circular
//! construction dependency between the two.

pub mod factory;
pub mod guard;
pub mod host;
pub mod interface;
pub mod org;

pub use factory::{create_org, predict_org_addresses, OrgAddresses};
pub use guard::CallGuard;
pub use host::OrgHost;
pub use org::Org;
