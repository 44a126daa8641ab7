//! The execution-environment seam.
//!
//! Contract logic that lives outside the runtime (org, factory, treasury) only
//! ever talks to the world through this trait. The runtime implements it on top
//! of its snapshot-and-restore world state; tests can implement it directly.

use crate::action::Action;
use crate::address::Address;
use crate::amount::Amount;
use crate::call::{Call, CallOutput};
use crate::chain::ChainId;
use crate::error::ContractError;
use crate::event::Event;

pub trait Host {
    /// Chain the host is executing on.
    fn chain_id(&self) -> ChainId;

    /// Authorization predicate of the access registry at `registry`.
    fn is_authorized(
        &self,
        registry: &Address,
        caller: &Address,
        action: &Action,
    ) -> Result<bool, ContractError>;

    /// Perform a nested call with `caller` as the immediate sender.
    fn call(
        &mut self,
        caller: &Address,
        target: &Address,
        value: Amount,
        calldata: &[u8],
    ) -> Result<CallOutput, ContractError>;

    /// Record an event emitted by the contract at `emitter`.
    fn emit(&mut self, emitter: &Address, event: Event);

    /// Encode `call` and perform it.
    fn invoke(
        &mut self,
        caller: &Address,
        target: &Address,
        value: Amount,
        call: &Call,
    ) -> Result<CallOutput, ContractError> {
        self.call(caller, target, value, &call.encode())
    }

    /// Fail with `AuthorizationDenied` unless `caller` passes the predicate.
    fn require_authorized(
        &self,
        registry: &Address,
        caller: &Address,
        action: &Action,
    ) -> Result<(), ContractError> {
        if self.is_authorized(registry, caller, action)? {
            Ok(())
        } else {
            Err(ContractError::denied_action(*caller, action.clone()))
        }
    }
}
