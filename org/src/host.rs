use crate::org::Org;
use guild_types::{Address, ContractError, Hash256, Host};

/// Host capabilities the org and the factory need beyond plain calls.
pub trait OrgHost: Host {
    /// State of the org proxy at `address`.
    fn org(&self, address: &Address) -> Result<&Org, ContractError>;

    fn org_mut(&mut self, address: &Address) -> Result<&mut Org, ContractError>;

    /// Deploy a proxy to `implementation` at the salted address derived from
    /// `deployer`, `salt` and the proxy init-code hash.
    ///
    /// Fails with `AddressCollision` when that address already has code and
    /// with `InvalidImplementation` when `implementation` is not a known
    /// org or registry implementation.
    fn deploy_proxy(
        &mut self,
        deployer: &Address,
        salt: &Hash256,
        implementation: &Address,
    ) -> Result<Address, ContractError>;

    /// Point the org proxy at `proxy` to a new org implementation.
    fn set_implementation(
        &mut self,
        proxy: &Address,
        implementation: &Address,
    ) -> Result<(), ContractError>;
}
