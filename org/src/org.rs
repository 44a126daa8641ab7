//! Org state and entry points.

use crate::guard::CallGuard;
use crate::host::OrgHost;
use crate::interface;
use guild_types::{
    signatures, Action, Address, Amount, Call, CallOutput, ContractError, Event,
};

/// State held by an org proxy.
#[derive(Clone, Debug)]
pub struct Org {
    address: Address,
    access_registry: Option<Address>,
    creator: Address,
    /// Contract that ran `initialize`; the factory for factory-created orgs.
    module_factory: Address,
    name: String,
    guard: CallGuard,
}

impl Org {
    pub fn new(address: Address) -> Self {
        Self {
            address,
            access_registry: None,
            creator: Address::ZERO,
            module_factory: Address::ZERO,
            name: String::new(),
            guard: CallGuard::Idle,
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn is_initialized(&self) -> bool {
        self.access_registry.is_some()
    }

    pub fn access_registry(&self) -> Result<Address, ContractError> {
        self.access_registry.ok_or(ContractError::NotInitialized)
    }

    pub fn creator(&self) -> Address {
        self.creator
    }

    pub fn module_factory(&self) -> Address {
        self.module_factory
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn guard(&self) -> CallGuard {
        self.guard
    }

    pub fn guard_mut(&mut self) -> &mut CallGuard {
        &mut self.guard
    }

    fn bind(
        &mut self,
        access_registry: Address,
        creator: Address,
        module_factory: Address,
        name: String,
    ) -> Result<(), ContractError> {
        if self.is_initialized() {
            return Err(ContractError::AlreadyInitialized);
        }
        self.access_registry = Some(access_registry);
        self.creator = creator;
        self.module_factory = module_factory;
        self.name = name;
        Ok(())
    }
}

/// Route a decoded call to the org at `org`.
pub fn dispatch<H: OrgHost>(
    host: &mut H,
    org: &Address,
    caller: &Address,
    call: Call,
) -> Result<CallOutput, ContractError> {
    match call {
        Call::InitializeOrg {
            access_registry,
            creator,
            name,
        } => initialize(host, org, caller, access_registry, creator, name),
        Call::Execute {
            targets,
            values,
            calldatas,
        } => execute(host, org, caller, targets, values, calldatas),
        Call::UpgradeTo { implementation } => upgrade_to(host, org, caller, implementation),
        Call::AccessRegistry => Ok(CallOutput::Address(host.org(org)?.access_registry()?)),
        Call::Name => Ok(CallOutput::Text(host.org(org)?.name().to_string())),
        Call::Creator => Ok(CallOutput::Address(host.org(org)?.creator())),
        Call::ModuleFactory => Ok(CallOutput::Address(host.org(org)?.module_factory())),
        Call::SupportsInterface { interface_id } => {
            Ok(CallOutput::Bool(interface::org_supports(interface_id)))
        }
        other => Err(ContractError::UnknownFunction {
            target: *org,
            function: other.signature(),
        }),
    }
}

/// One-shot wiring of an org to its registry. The caller is recorded as the
/// module factory.
pub fn initialize<H: OrgHost>(
    host: &mut H,
    org: &Address,
    caller: &Address,
    access_registry: Address,
    creator: Address,
    name: String,
) -> Result<CallOutput, ContractError> {
    host.org_mut(org)?
        .bind(access_registry, creator, *caller, name.clone())?;
    host.emit(
        org,
        Event::OrgInitialized {
            access_registry,
            creator,
            name,
        },
    );
    Ok(CallOutput::Unit)
}

/// Run an authorized batch of sub-calls with the org as caller.
///
/// Any failing sub-call fails the whole batch with its index attached.
pub fn execute<H: OrgHost>(
    host: &mut H,
    org: &Address,
    caller: &Address,
    targets: Vec<Address>,
    values: Vec<Amount>,
    calldatas: Vec<Vec<u8>>,
) -> Result<CallOutput, ContractError> {
    let registry = host.org(org)?.access_registry()?;
    host.require_authorized(&registry, caller, &Action::new(*org, signatures::EXECUTE))?;
    if targets.len() != values.len() || targets.len() != calldatas.len() {
        return Err(ContractError::ArraysNotEqual);
    }

    host.org_mut(org)?.guard.enter(CallGuard::Executing)?;
    let outcome = run_batch(host, org, &targets, &values, &calldatas);
    host.org_mut(org)?.guard.release();
    let outputs = outcome?;

    tracing::debug!(org = %org, caller = %caller, calls = targets.len(), "batch executed");
    host.emit(
        org,
        Event::Executed {
            caller: *caller,
            targets,
            values,
        },
    );
    Ok(CallOutput::Batch(outputs))
}

fn run_batch<H: OrgHost>(
    host: &mut H,
    org: &Address,
    targets: &[Address],
    values: &[Amount],
    calldatas: &[Vec<u8>],
) -> Result<Vec<CallOutput>, ContractError> {
    let mut outputs = Vec::with_capacity(targets.len());
    for (index, ((target, value), calldata)) in targets.iter().zip(values).zip(calldatas).enumerate() {
        let output = host
            .call(org, target, *value, calldata)
            .map_err(|source| ContractError::SubCallFailed {
                index,
                source: Box::new(source),
            })?;
        outputs.push(output);
    }
    Ok(outputs)
}

/// Swap the implementation the org proxy delegates to.
pub fn upgrade_to<H: OrgHost>(
    host: &mut H,
    org: &Address,
    caller: &Address,
    implementation: Address,
) -> Result<CallOutput, ContractError> {
    let registry = host.org(org)?.access_registry()?;
    host.require_authorized(&registry, caller, &Action::new(*org, signatures::UPGRADE_TO))?;

    host.org_mut(org)?.guard.enter(CallGuard::Upgrading)?;
    let outcome = host.set_implementation(org, &implementation);
    host.org_mut(org)?.guard.release();
    outcome?;

    tracing::info!(org = %org, implementation = %implementation, "org upgraded");
    host.emit(org, Event::Upgraded { implementation });
    Ok(CallOutput::Unit)
}
