//! Contract accounts living in the world state.

use crate::asset::{FungibleLedger, NonFungibleLedger};
use guild_access::AccessRegistry;
use guild_org::Org;
use guild_treasury::Treasury;
use guild_types::{Address, Amount, ContractError, TokenId};

/// Code and state at one address.
#[derive(Clone, Debug)]
pub enum Account {
    /// Stateless org logic that proxies delegate to.
    OrgImplementation { version: u32 },
    /// Stateless registry logic that proxies delegate to.
    RegistryImplementation,
    Proxy(Proxy),
    Factory,
    TreasuryFactory,
    Treasury(Treasury),
    Fungible(FungibleLedger),
    NonFungible(NonFungibleLedger),
}

/// A proxy: an implementation pointer plus the instance state it operates on.
#[derive(Clone, Debug)]
pub struct Proxy {
    pub implementation: Address,
    pub instance: Instance,
}

#[derive(Clone, Debug)]
pub enum Instance {
    Org(Org),
    Registry(AccessRegistry),
}

/// What to stand up with a plain (nonce-based) deployment.
///
/// Proxies are not deployable this way; only the factory creates them.
#[derive(Clone, Debug)]
pub enum Blueprint {
    OrgImplementation { version: u32 },
    RegistryImplementation,
    Factory,
    TreasuryFactory,
    Treasury { access_registry: Address },
    Fungible { holders: Vec<(Address, Amount)> },
    NonFungible { holders: Vec<(Address, TokenId)> },
}

impl Blueprint {
    pub(crate) fn instantiate(self, address: Address) -> Result<Account, ContractError> {
        Ok(match self {
            Blueprint::OrgImplementation { version } => Account::OrgImplementation { version },
            Blueprint::RegistryImplementation => Account::RegistryImplementation,
            Blueprint::Factory => Account::Factory,
            Blueprint::TreasuryFactory => Account::TreasuryFactory,
            Blueprint::Treasury { access_registry } => {
                Account::Treasury(Treasury::new(address, access_registry))
            }
            Blueprint::Fungible { holders } => {
                Account::Fungible(FungibleLedger::new(address, holders)?)
            }
            Blueprint::NonFungible { holders } => {
                Account::NonFungible(NonFungibleLedger::new(address, holders))
            }
        })
    }
}

impl Account {
    /// Short name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Account::OrgImplementation { .. } => "org-implementation",
            Account::RegistryImplementation => "registry-implementation",
            Account::Proxy(Proxy {
                instance: Instance::Org(_),
                ..
            }) => "org",
            Account::Proxy(Proxy {
                instance: Instance::Registry(_),
                ..
            }) => "access-registry",
            Account::Factory => "org-factory",
            Account::TreasuryFactory => "treasury-factory",
            Account::Treasury(_) => "treasury",
            Account::Fungible(_) => "fungible-asset",
            Account::NonFungible(_) => "non-fungible-asset",
        }
    }
}
