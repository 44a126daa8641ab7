//! Deterministic org factory.
//!
//! `createOrg` is a two-phase bring-up. Both proxy addresses are fixed by
//! derivation first, both proxies are deployed, and only then are the two
//! cross-wired through their one-shot initializers. Any failure along the way
//! fails the enclosing call, so no registry ever exists without its org.

use crate::host::OrgHost;
use crate::interface;
use guild_crypto::{create2_address, derive_org_salt, proxy_init_code_hash};
use guild_types::{
    Action, Address, Amount, Call, CallOutput, ChainId, ContractError, CreateOrgParams, Event,
    Hash256, RegistryInit, Role, Salt,
};

/// The two addresses an org creation lands on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OrgAddresses {
    pub org: Address,
    pub access_registry: Address,
}

/// Addresses `createOrg` will produce for these inputs. Pure; usable off-chain
/// before the deployment happens.
#[allow(clippy::too_many_arguments)]
pub fn predict_org_addresses(
    factory: &Address,
    creator: &Address,
    deployer: &Address,
    chain_id: ChainId,
    salt: &Salt,
    org_implementation: &Address,
    registry_implementation: &Address,
) -> OrgAddresses {
    let derived = derive_org_salt(creator, deployer, chain_id, salt);
    OrgAddresses {
        org: proxy_address(factory, &derived, org_implementation),
        access_registry: proxy_address(factory, &derived, registry_implementation),
    }
}

fn proxy_address(factory: &Address, salt: &Hash256, implementation: &Address) -> Address {
    create2_address(factory, salt, &proxy_init_code_hash(implementation, &[]))
}

/// Route a decoded call to the factory at `factory`.
pub fn dispatch<H: OrgHost>(
    host: &mut H,
    factory: &Address,
    caller: &Address,
    call: Call,
) -> Result<CallOutput, ContractError> {
    match call {
        Call::CreateOrg { creator, params } => {
            let created = create_org(host, factory, caller, creator, params)?;
            Ok(CallOutput::OrgCreated {
                org: created.org,
                access_registry: created.access_registry,
            })
        }
        Call::SupportsInterface { interface_id } => {
            Ok(CallOutput::Bool(interface::factory_supports(interface_id)))
        }
        other => Err(ContractError::UnknownFunction {
            target: *factory,
            function: other.signature(),
        }),
    }
}

/// Deploy and wire an org/registry pair. `deployer` is the immediate caller.
pub fn create_org<H: OrgHost>(
    host: &mut H,
    factory: &Address,
    deployer: &Address,
    creator: Address,
    params: CreateOrgParams,
) -> Result<OrgAddresses, ContractError> {
    if params.org_functions.len() != params.org_function_roles.len()
        || params.actions.len() != params.action_roles.len()
    {
        return Err(ContractError::ArraysNotEqual);
    }
    let salt = derive_org_salt(&creator, deployer, host.chain_id(), &params.salt);

    let access_registry = host.deploy_proxy(factory, &salt, &params.registry_implementation)?;
    let org = host.deploy_proxy(factory, &salt, &params.org_implementation)?;

    let (actions, action_roles) = bind_actions(
        org,
        params.org_functions,
        params.org_function_roles,
        params.actions,
        params.action_roles,
    );
    let init = RegistryInit {
        root: org,
        executors: Vec::new(),
        roles: params.roles,
        role_admins: params.role_admins,
        members: params.members,
        actions,
        action_roles,
    };
    host.invoke(factory, &access_registry, Amount::ZERO, &Call::Initialize(init))?;
    host.invoke(
        factory,
        &org,
        Amount::ZERO,
        &Call::InitializeOrg {
            access_registry,
            creator,
            name: params.name.clone(),
        },
    )?;

    tracing::info!(
        org = %org,
        access_registry = %access_registry,
        creator = %creator,
        deployer = %deployer,
        name = %params.name,
        "org created"
    );
    host.emit(
        factory,
        Event::OrgCreated {
            org,
            access_registry,
            creator,
            deployer: *deployer,
        },
    );
    Ok(OrgAddresses {
        org,
        access_registry,
    })
}

/// Org-bound functions first, then module actions, as one parallel pair.
fn bind_actions(
    org: Address,
    org_functions: Vec<String>,
    org_function_roles: Vec<Vec<Role>>,
    module_actions: Vec<Action>,
    module_roles: Vec<Vec<Role>>,
) -> (Vec<Action>, Vec<Vec<Role>>) {
    let actions = org_functions
        .into_iter()
        .map(|function| Action::new(org, function))
        .chain(module_actions)
        .collect();
    let roles = org_function_roles.into_iter().chain(module_roles).collect();
    (actions, roles)
}
