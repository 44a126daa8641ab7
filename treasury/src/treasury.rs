//! Custody operations of a single treasury.

use guild_types::{
    signatures, Action, Address, Amount, Call, CallOutput, ContractError, Event, Host, TokenId,
};

/// A treasury bound to one access registry.
///
/// Holds no balances itself: native balances live in the host, token balances
/// in the asset contracts. The treasury only moves them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Treasury {
    address: Address,
    access_registry: Address,
}

impl Treasury {
    pub fn new(address: Address, access_registry: Address) -> Self {
        Self {
            address,
            access_registry,
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn access_registry(&self) -> Address {
        self.access_registry
    }

    /// Route a decoded call to this treasury.
    pub fn dispatch<H: Host>(
        &self,
        host: &mut H,
        caller: &Address,
        call: Call,
    ) -> Result<CallOutput, ContractError> {
        match call {
            Call::WithdrawEth {
                recipients,
                amounts,
            } => self.withdraw_eth(host, caller, recipients, amounts),
            Call::DepositFungible {
                assets,
                senders,
                amounts,
            } => self.deposit_fungible(host, caller, assets, senders, amounts),
            Call::WithdrawFungible {
                assets,
                recipients,
                amounts,
            } => self.withdraw_fungible(host, caller, assets, recipients, amounts),
            Call::DepositNonFungible {
                assets,
                senders,
                token_ids,
            } => self.deposit_non_fungible(host, caller, assets, senders, token_ids),
            Call::WithdrawNonFungible {
                assets,
                recipients,
                token_ids,
            } => self.withdraw_non_fungible(host, caller, assets, recipients, token_ids),
            other => Err(ContractError::UnknownFunction {
                target: self.address,
                function: other.signature(),
            }),
        }
    }

    /// Plain native-currency receipt. The value has already been credited by
    /// the host; this only records it.
    pub fn receive<H: Host>(&self, host: &mut H, sender: &Address, amount: Amount) -> CallOutput {
        host.emit(
            &self.address,
            Event::EthDeposited {
                sender: *sender,
                amount,
            },
        );
        CallOutput::Unit
    }

    pub fn withdraw_eth<H: Host>(
        &self,
        host: &mut H,
        caller: &Address,
        recipients: Vec<Address>,
        amounts: Vec<Amount>,
    ) -> Result<CallOutput, ContractError> {
        self.authorize(host, caller, signatures::WITHDRAW_ETH)?;
        if recipients.len() != amounts.len() {
            return Err(ContractError::ArraysNotEqual);
        }
        for (recipient, amount) in recipients.iter().zip(&amounts) {
            host.call(&self.address, recipient, *amount, &[])?;
        }
        tracing::debug!(treasury = %self.address, transfers = recipients.len(), "native currency withdrawn");
        host.emit(
            &self.address,
            Event::EthWithdrawn {
                recipients,
                amounts,
            },
        );
        Ok(CallOutput::Unit)
    }

    /// Pull fungible assets into the treasury. Each sender must have approved
    /// the treasury for at least the amount pulled.
    pub fn deposit_fungible<H: Host>(
        &self,
        host: &mut H,
        caller: &Address,
        assets: Vec<Address>,
        senders: Vec<Address>,
        amounts: Vec<Amount>,
    ) -> Result<CallOutput, ContractError> {
        self.authorize(host, caller, signatures::DEPOSIT_ERC20)?;
        check_lengths(assets.len(), senders.len(), amounts.len())?;
        for ((asset, sender), amount) in assets.iter().zip(&senders).zip(&amounts) {
            let pull = Call::TransferFrom {
                from: *sender,
                to: self.address,
                amount: *amount,
            };
            host.invoke(&self.address, asset, Amount::ZERO, &pull)?;
        }
        tracing::debug!(treasury = %self.address, transfers = assets.len(), "fungible assets deposited");
        host.emit(
            &self.address,
            Event::FungibleDeposited {
                assets,
                senders,
                amounts,
            },
        );
        Ok(CallOutput::Unit)
    }

    pub fn withdraw_fungible<H: Host>(
        &self,
        host: &mut H,
        caller: &Address,
        assets: Vec<Address>,
        recipients: Vec<Address>,
        amounts: Vec<Amount>,
    ) -> Result<CallOutput, ContractError> {
        self.authorize(host, caller, signatures::WITHDRAW_ERC20)?;
        check_lengths(assets.len(), recipients.len(), amounts.len())?;
        for ((asset, recipient), amount) in assets.iter().zip(&recipients).zip(&amounts) {
            let push = Call::Transfer {
                to: *recipient,
                amount: *amount,
            };
            host.invoke(&self.address, asset, Amount::ZERO, &push)?;
        }
        tracing::debug!(treasury = %self.address, transfers = assets.len(), "fungible assets withdrawn");
        host.emit(
            &self.address,
            Event::FungibleWithdrawn {
                assets,
                recipients,
                amounts,
            },
        );
        Ok(CallOutput::Unit)
    }

    /// Pull non-fungible tokens into the treasury. Each token must be approved
    /// to the treasury by its owner.
    pub fn deposit_non_fungible<H: Host>(
        &self,
        host: &mut H,
        caller: &Address,
        assets: Vec<Address>,
        senders: Vec<Address>,
        token_ids: Vec<TokenId>,
    ) -> Result<CallOutput, ContractError> {
        self.authorize(host, caller, signatures::DEPOSIT_ERC721)?;
        check_lengths(assets.len(), senders.len(), token_ids.len())?;
        for ((asset, sender), token_id) in assets.iter().zip(&senders).zip(&token_ids) {
            let pull = Call::TransferToken {
                from: *sender,
                to: self.address,
                token_id: *token_id,
            };
            host.invoke(&self.address, asset, Amount::ZERO, &pull)?;
        }
        tracing::debug!(treasury = %self.address, transfers = assets.len(), "tokens deposited");
        host.emit(
            &self.address,
            Event::NonFungibleDeposited {
                assets,
                senders,
                token_ids,
            },
        );
        Ok(CallOutput::Unit)
    }

    pub fn withdraw_non_fungible<H: Host>(
        &self,
        host: &mut H,
        caller: &Address,
        assets: Vec<Address>,
        recipients: Vec<Address>,
        token_ids: Vec<TokenId>,
    ) -> Result<CallOutput, ContractError> {
        self.authorize(host, caller, signatures::WITHDRAW_ERC721)?;
        check_lengths(assets.len(), recipients.len(), token_ids.len())?;
        for ((asset, recipient), token_id) in assets.iter().zip(&recipients).zip(&token_ids) {
            let push = Call::TransferToken {
                from: self.address,
                to: *recipient,
                token_id: *token_id,
            };
            host.invoke(&self.address, asset, Amount::ZERO, &push)?;
        }
        tracing::debug!(treasury = %self.address, transfers = assets.len(), "tokens withdrawn");
        host.emit(
            &self.address,
            Event::NonFungibleWithdrawn {
                assets,
                recipients,
                token_ids,
            },
        );
        Ok(CallOutput::Unit)
    }

    fn authorize<H: Host>(
        &self,
        host: &H,
        caller: &Address,
        function: &'static str,
    ) -> Result<(), ContractError> {
        host.require_authorized(
            &self.access_registry,
            caller,
            &Action::new(self.address, function),
        )
    }
}

fn check_lengths(a: usize, b: usize, c: usize) -> Result<(), ContractError> {
    if a == b && b == c {
        Ok(())
    } else {
        Err(ContractError::ArraysNotEqual)
    }
}
