//! Treasury factory.
//!
//! Stands up a treasury bound to an existing access registry. The treasury
//! address comes from the factory's own deployment nonce.

use guild_types::{Address, Call, CallOutput, ContractError, Event, Host};

/// Host capability the treasury factory needs beyond plain calls.
pub trait TreasuryHost: Host {
    /// Deploy a treasury bound to `access_registry` at the next nonce-based
    /// address of `deployer`.
    fn deploy_treasury(
        &mut self,
        deployer: &Address,
        access_registry: &Address,
    ) -> Result<Address, ContractError>;
}

/// Route a decoded call to the treasury factory at `factory`.
pub fn dispatch<H: TreasuryHost>(
    host: &mut H,
    factory: &Address,
    caller: &Address,
    call: Call,
) -> Result<CallOutput, ContractError> {
    match call {
        Call::CreateTreasury { access_registry } => {
            create_treasury(host, factory, caller, access_registry).map(CallOutput::Address)
        }
        other => Err(ContractError::UnknownFunction {
            target: *factory,
            function: other.signature(),
        }),
    }
}

/// Deploy a treasury gated by `access_registry`. Open to any caller.
pub fn create_treasury<H: TreasuryHost>(
    host: &mut H,
    factory: &Address,
    creator: &Address,
    access_registry: Address,
) -> Result<Address, ContractError> {
    let treasury = host.deploy_treasury(factory, &access_registry)?;
    tracing::info!(
        treasury = %treasury,
        access_registry = %access_registry,
        creator = %creator,
        "treasury created"
    );
    host.emit(
        factory,
        Event::TreasuryCreated {
            treasury,
            access_registry,
            creator: *creator,
        },
    );
    Ok(treasury)
}
