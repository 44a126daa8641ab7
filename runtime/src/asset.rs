//! Minimal asset ledgers hosted by the runtime so treasuries have something
//! to custody. They carry just enough token semantics for transfers,
//! approvals and ownership checks.

use guild_types::{Address, Amount, Call, CallOutput, ContractError, Event, TokenId};
use std::collections::HashMap;

/// Balances and allowances of one fungible asset.
#[derive(Clone, Debug)]
pub struct FungibleLedger {
    address: Address,
    balances: HashMap<Address, Amount>,
    /// (owner, spender) → remaining allowance.
    allowances: HashMap<(Address, Address), Amount>,
}

impl FungibleLedger {
    pub fn new(address: Address, holders: Vec<(Address, Amount)>) -> Result<Self, ContractError> {
        let mut ledger = Self {
            address,
            balances: HashMap::new(),
            allowances: HashMap::new(),
        };
        for (holder, amount) in holders {
            ledger.credit(holder, amount)?;
        }
        Ok(ledger)
    }

    pub fn balance_of(&self, holder: &Address) -> Amount {
        self.balances.get(holder).copied().unwrap_or_default()
    }

    pub fn allowance(&self, owner: &Address, spender: &Address) -> Amount {
        self.allowances
            .get(&(*owner, *spender))
            .copied()
            .unwrap_or_default()
    }

    pub fn handle(
        &mut self,
        caller: &Address,
        call: Call,
        events: &mut Vec<Event>,
    ) -> Result<CallOutput, ContractError> {
        match call {
            Call::Transfer { to, amount } => {
                self.move_balance(*caller, to, amount, events)?;
                Ok(CallOutput::Bool(true))
            }
            Call::Approve { spender, amount } => {
                self.allowances.insert((*caller, spender), amount);
                events.push(Event::Approval {
                    owner: *caller,
                    spender,
                    amount,
                });
                Ok(CallOutput::Bool(true))
            }
            Call::TransferFrom { from, to, amount } => {
                if from != *caller {
                    let allowed = self.allowance(&from, caller);
                    let remaining =
                        allowed
                            .checked_sub(amount)
                            .ok_or(ContractError::InsufficientAllowance {
                                needed: amount.raw(),
                                available: allowed.raw(),
                            })?;
                    self.move_balance(from, to, amount, events)?;
                    self.allowances.insert((from, *caller), remaining);
                } else {
                    self.move_balance(from, to, amount, events)?;
                }
                Ok(CallOutput::Bool(true))
            }
            Call::BalanceOf { holder } => Ok(CallOutput::Amount(self.balance_of(&holder))),
            other => Err(ContractError::UnknownFunction {
                target: self.address,
                function: other.signature(),
            }),
        }
    }

    fn move_balance(
        &mut self,
        from: Address,
        to: Address,
        amount: Amount,
        events: &mut Vec<Event>,
    ) -> Result<(), ContractError> {
        let available = self.balance_of(&from);
        let remaining = available
            .checked_sub(amount)
            .ok_or(ContractError::InsufficientBalance {
                needed: amount.raw(),
                available: available.raw(),
            })?;
        self.balances.insert(from, remaining);
        self.credit(to, amount)?;
        events.push(Event::Transfer { from, to, amount });
        Ok(())
    }

    fn credit(&mut self, holder: Address, amount: Amount) -> Result<(), ContractError> {
        let balance = self.balance_of(&holder);
        let updated = balance.checked_add(amount).ok_or(ContractError::Overflow)?;
        self.balances.insert(holder, updated);
        Ok(())
    }
}

/// Ownership and single-token approvals of one non-fungible collection.
#[derive(Clone, Debug)]
pub struct NonFungibleLedger {
    address: Address,
    owners: HashMap<TokenId, Address>,
    approvals: HashMap<TokenId, Address>,
}

impl NonFungibleLedger {
    pub fn new(address: Address, holders: Vec<(Address, TokenId)>) -> Self {
        Self {
            address,
            owners: holders.into_iter().map(|(owner, id)| (id, owner)).collect(),
            approvals: HashMap::new(),
        }
    }

    pub fn owner_of(&self, token_id: &TokenId) -> Option<Address> {
        self.owners.get(token_id).copied()
    }

    pub fn approved(&self, token_id: &TokenId) -> Option<Address> {
        self.approvals.get(token_id).copied()
    }

    pub fn handle(
        &mut self,
        caller: &Address,
        call: Call,
        events: &mut Vec<Event>,
    ) -> Result<CallOutput, ContractError> {
        match call {
            Call::ApproveToken { to, token_id } => {
                self.require_owner(caller, token_id)?;
                self.approvals.insert(token_id, to);
                events.push(Event::TokenApproval {
                    owner: *caller,
                    approved: to,
                    token_id,
                });
                Ok(CallOutput::Unit)
            }
            Call::TransferToken { from, to, token_id } => {
                self.require_owner(&from, token_id)?;
                if *caller != from && self.approved(&token_id) != Some(*caller) {
                    return Err(ContractError::NotApproved {
                        spender: *caller,
                        token_id: token_id.0,
                    });
                }
                self.approvals.remove(&token_id);
                self.owners.insert(token_id, to);
                events.push(Event::TokenTransfer { from, to, token_id });
                Ok(CallOutput::Unit)
            }
            Call::OwnerOf { token_id } => self
                .owner_of(&token_id)
                .map(CallOutput::Address)
                .ok_or(ContractError::NotTokenOwner {
                    account: Address::ZERO,
                    token_id: token_id.0,
                }),
            other => Err(ContractError::UnknownFunction {
                target: self.address,
                function: other.signature(),
            }),
        }
    }

    fn require_owner(&self, account: &Address, token_id: TokenId) -> Result<(), ContractError> {
        if self.owner_of(&token_id) == Some(*account) {
            Ok(())
        } else {
            Err(ContractError::NotTokenOwner {
                account: *account,
                token_id: token_id.0,
            })
        }
    }
}
