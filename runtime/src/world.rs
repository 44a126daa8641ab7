//! World state: every account, native balance, nonce and log entry.
//!
//! `WorldState` is plain data and `Clone`; transaction atomicity is a
//! snapshot taken before the call and restored on failure.

use crate::account::{Account, Instance, Proxy};
use crate::asset::{FungibleLedger, NonFungibleLedger};
use guild_access::AccessRegistry;
use guild_org::Org;
use guild_types::{Address, Amount, ContractError, LogEntry};
use std::collections::HashMap;

#[derive(Clone, Debug, Default)]
pub struct WorldState {
    pub(crate) accounts: HashMap<Address, Account>,
    pub(crate) balances: HashMap<Address, Amount>,
    pub(crate) nonces: HashMap<Address, u64>,
    pub(crate) logs: Vec<LogEntry>,
}

impl WorldState {
    pub fn account(&self, address: &Address) -> Option<&Account> {
        self.accounts.get(address)
    }

    pub fn has_code(&self, address: &Address) -> bool {
        self.accounts.contains_key(address)
    }

    pub fn balance(&self, address: &Address) -> Amount {
        self.balances.get(address).copied().unwrap_or_default()
    }

    pub fn nonce(&self, address: &Address) -> u64 {
        self.nonces.get(address).copied().unwrap_or(0)
    }

    pub fn logs(&self) -> &[LogEntry] {
        &self.logs
    }

    pub(crate) fn insert_account(
        &mut self,
        address: Address,
        account: Account,
    ) -> Result<(), ContractError> {
        if self.has_code(&address) {
            return Err(ContractError::AddressCollision(address));
        }
        self.accounts.insert(address, account);
        Ok(())
    }

    pub(crate) fn bump_nonce(&mut self, address: &Address) {
        *self.nonces.entry(*address).or_insert(0) += 1;
    }

    pub(crate) fn credit(&mut self, address: &Address, amount: Amount) -> Result<(), ContractError> {
        let balance = self.balance(address);
        let updated = balance.checked_add(amount).ok_or(ContractError::Overflow)?;
        self.balances.insert(*address, updated);
        Ok(())
    }

    /// Move native value. A zero transfer is a no-op, even from an empty account.
    pub(crate) fn transfer(
        &mut self,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> Result<(), ContractError> {
        if amount.is_zero() {
            return Ok(());
        }
        let available = self.balance(from);
        let remaining = available
            .checked_sub(amount)
            .ok_or(ContractError::InsufficientBalance {
                needed: amount.raw(),
                available: available.raw(),
            })?;
        self.balances.insert(*from, remaining);
        self.credit(to, amount)
    }

    pub(crate) fn push_log(&mut self, entry: LogEntry) {
        self.logs.push(entry);
    }

    // ── Typed account access ───────────────────────────────────────────

    pub fn proxy(&self, address: &Address) -> Option<&Proxy> {
        match self.accounts.get(address) {
            Some(Account::Proxy(proxy)) => Some(proxy),
            _ => None,
        }
    }

    pub(crate) fn proxy_mut(&mut self, address: &Address) -> Result<&mut Proxy, ContractError> {
        match self.accounts.get_mut(address) {
            Some(Account::Proxy(proxy)) => Ok(proxy),
            _ => Err(unexpected(address, "a proxy")),
        }
    }

    pub fn registry(&self, address: &Address) -> Result<&AccessRegistry, ContractError> {
        match self.proxy(address).map(|p| &p.instance) {
            Some(Instance::Registry(registry)) => Ok(registry),
            _ => Err(unexpected(address, "an access registry")),
        }
    }

    pub(crate) fn registry_mut(
        &mut self,
        address: &Address,
    ) -> Result<&mut AccessRegistry, ContractError> {
        match self.accounts.get_mut(address) {
            Some(Account::Proxy(Proxy {
                instance: Instance::Registry(registry),
                ..
            })) => Ok(registry),
            _ => Err(unexpected(address, "an access registry")),
        }
    }

    pub fn org(&self, address: &Address) -> Result<&Org, ContractError> {
        match self.proxy(address).map(|p| &p.instance) {
            Some(Instance::Org(org)) => Ok(org),
            _ => Err(unexpected(address, "an org")),
        }
    }

    pub(crate) fn org_mut(&mut self, address: &Address) -> Result<&mut Org, ContractError> {
        match self.accounts.get_mut(address) {
            Some(Account::Proxy(Proxy {
                instance: Instance::Org(org),
                ..
            })) => Ok(org),
            _ => Err(unexpected(address, "an org")),
        }
    }

    pub fn fungible(&self, address: &Address) -> Result<&FungibleLedger, ContractError> {
        match self.accounts.get(address) {
            Some(Account::Fungible(ledger)) => Ok(ledger),
            _ => Err(unexpected(address, "a fungible asset")),
        }
    }

    pub(crate) fn fungible_mut(
        &mut self,
        address: &Address,
    ) -> Result<&mut FungibleLedger, ContractError> {
        match self.accounts.get_mut(address) {
            Some(Account::Fungible(ledger)) => Ok(ledger),
            _ => Err(unexpected(address, "a fungible asset")),
        }
    }

    pub fn non_fungible(&self, address: &Address) -> Result<&NonFungibleLedger, ContractError> {
        match self.accounts.get(address) {
            Some(Account::NonFungible(ledger)) => Ok(ledger),
            _ => Err(unexpected(address, "a non-fungible asset")),
        }
    }

    pub(crate) fn non_fungible_mut(
        &mut self,
        address: &Address,
    ) -> Result<&mut NonFungibleLedger, ContractError> {
        match self.accounts.get_mut(address) {
            Some(Account::NonFungible(ledger)) => Ok(ledger),
            _ => Err(unexpected(address, "a non-fungible asset")),
        }
    }
}

fn unexpected(address: &Address, expected: &'static str) -> ContractError {
    ContractError::UnexpectedAccount {
        address: *address,
        expected,
    }
}
