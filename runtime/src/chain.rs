//! The chain: a serialized, atomic executor over a [`WorldState`].
//!
//! Every top-level [`Chain::transact`] either commits all of its effects
//! (nested calls, value movements, events) or none of them. Nested failures
//! always propagate to the top, so restoring the pre-transaction snapshot is
//! the only rollback the runtime needs.

use crate::account::{Account, Blueprint, Instance, Proxy};
use crate::config::ChainConfig;
use crate::world::WorldState;
use crate::RuntimeError;
use guild_access::AccessRegistry;
use guild_crypto::{create2_address, create_address, proxy_init_code_hash};
use guild_org::{Org, OrgAddresses, OrgHost};
use guild_treasury::{Treasury, TreasuryHost};
use guild_types::{
    Action, Address, Amount, Call, CallOutput, ChainId, ContractError, Event, Hash256, Host,
    LogEntry, Salt, TokenId,
};
use serde::Serialize;
use std::path::Path;

/// Result of a committed transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Receipt {
    pub output: CallOutput,
    /// Events emitted during this transaction, in emission order.
    pub logs: Vec<LogEntry>,
}

impl Receipt {
    pub fn events(&self) -> impl Iterator<Item = &Event> {
        self.logs.iter().map(|entry| &entry.event)
    }

    /// Events emitted by the contract at `emitter`.
    pub fn events_from<'a>(&'a self, emitter: &'a Address) -> impl Iterator<Item = &'a Event> {
        self.logs
            .iter()
            .filter(move |entry| entry.emitter == *emitter)
            .map(|entry| &entry.event)
    }

    pub fn to_json(&self) -> Result<String, RuntimeError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Addresses of the shared contracts every org creation uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CoreContracts {
    pub org_implementation: Address,
    pub registry_implementation: Address,
    pub factory: Address,
    pub treasury_factory: Address,
}

pub struct Chain {
    config: ChainConfig,
    world: WorldState,
}

impl Chain {
    pub fn new(config: ChainConfig) -> Self {
        tracing::debug!(chain_id = %config.chain_id, max_call_depth = config.max_call_depth, "chain created");
        Self {
            config,
            world: WorldState::default(),
        }
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, RuntimeError> {
        Ok(Self::new(ChainConfig::from_toml_file(path)?))
    }

    pub fn config(&self) -> &ChainConfig {
        &self.config
    }

    pub fn chain_id(&self) -> ChainId {
        self.config.chain_id
    }

    pub fn world(&self) -> &WorldState {
        &self.world
    }

    /// Mint native currency to `account` outside of any transaction.
    pub fn fund(&mut self, account: &Address, amount: Amount) -> Result<(), ContractError> {
        self.world.credit(account, amount)
    }

    /// Plain deployment at `create_address(deployer, nonce)`.
    pub fn deploy(
        &mut self,
        deployer: &Address,
        blueprint: Blueprint,
    ) -> Result<Address, ContractError> {
        let address = create_address(deployer, self.world.nonce(deployer));
        let account = blueprint.instantiate(address)?;
        let kind = account.kind();
        self.world.insert_account(address, account)?;
        self.world.bump_nonce(deployer);
        tracing::info!(deployer = %deployer, address = %address, kind, "contract deployed");
        Ok(address)
    }

    /// Deploy the org implementation (version 1), the registry
    /// implementation, the org factory and the treasury factory.
    pub fn deploy_core(&mut self, deployer: &Address) -> Result<CoreContracts, ContractError> {
        Ok(CoreContracts {
            org_implementation: self.deploy(deployer, Blueprint::OrgImplementation { version: 1 })?,
            registry_implementation: self.deploy(deployer, Blueprint::RegistryImplementation)?,
            factory: self.deploy(deployer, Blueprint::Factory)?,
            treasury_factory: self.deploy(deployer, Blueprint::TreasuryFactory)?,
        })
    }

    /// Run one atomic transaction.
    pub fn transact(
        &mut self,
        sender: &Address,
        target: &Address,
        value: Amount,
        calldata: &[u8],
    ) -> Result<Receipt, ContractError> {
        let snapshot = self.world.clone();
        let first_log = self.world.logs.len();
        let result = Execution::new(&mut self.world, &self.config).call(sender, target, value, calldata);
        match result {
            Ok(output) => Ok(Receipt {
                output,
                logs: self.world.logs[first_log..].to_vec(),
            }),
            Err(err) => {
                self.world = snapshot;
                tracing::warn!(sender = %sender, target = %target, error = %err, "transaction reverted");
                Err(err)
            }
        }
    }

    /// [`Chain::transact`] with an encoded `call` and no value.
    pub fn submit(
        &mut self,
        sender: &Address,
        target: &Address,
        call: &Call,
    ) -> Result<Receipt, ContractError> {
        self.transact(sender, target, Amount::ZERO, &call.encode())
    }

    /// Run a transaction and discard its effects whatever the outcome.
    pub fn simulate(
        &mut self,
        sender: &Address,
        target: &Address,
        value: Amount,
        calldata: &[u8],
    ) -> Result<Receipt, ContractError> {
        let snapshot = self.world.clone();
        let first_log = self.world.logs.len();
        let result = Execution::new(&mut self.world, &self.config).call(sender, target, value, calldata);
        let logs = self.world.logs[first_log..].to_vec();
        self.world = snapshot;
        result.map(|output| Receipt { output, logs })
    }

    /// Read-only call from the zero address.
    pub fn query(&mut self, target: &Address, call: &Call) -> Result<CallOutput, ContractError> {
        self.simulate(&Address::ZERO, target, Amount::ZERO, &call.encode())
            .map(|receipt| receipt.output)
    }

    /// Addresses `createOrg` on `factory` will produce on this chain.
    pub fn predict_org_addresses(
        &self,
        factory: &Address,
        creator: &Address,
        deployer: &Address,
        salt: &Salt,
        org_implementation: &Address,
        registry_implementation: &Address,
    ) -> OrgAddresses {
        guild_org::predict_org_addresses(
            factory,
            creator,
            deployer,
            self.chain_id(),
            salt,
            org_implementation,
            registry_implementation,
        )
    }

    // ── Reads ──────────────────────────────────────────────────────────

    pub fn native_balance(&self, account: &Address) -> Amount {
        self.world.balance(account)
    }

    pub fn has_code(&self, address: &Address) -> bool {
        self.world.has_code(address)
    }

    pub fn registry(&self, address: &Address) -> Option<&AccessRegistry> {
        self.world.registry(address).ok()
    }

    pub fn org(&self, address: &Address) -> Option<&Org> {
        self.world.org(address).ok()
    }

    pub fn treasury(&self, address: &Address) -> Option<&Treasury> {
        match self.world.account(address) {
            Some(Account::Treasury(treasury)) => Some(treasury),
            _ => None,
        }
    }

    pub fn fungible_balance(&self, asset: &Address, holder: &Address) -> Option<Amount> {
        self.world.fungible(asset).ok().map(|ledger| ledger.balance_of(holder))
    }

    pub fn owner_of(&self, asset: &Address, token_id: TokenId) -> Option<Address> {
        self.world
            .non_fungible(asset)
            .ok()
            .and_then(|ledger| ledger.owner_of(&token_id))
    }

    pub fn implementation_of(&self, proxy: &Address) -> Option<Address> {
        self.world.proxy(proxy).map(|p| p.implementation)
    }

    /// Version of the org implementation `proxy` currently delegates to.
    pub fn implementation_version(&self, proxy: &Address) -> Option<u32> {
        match self.world.account(&self.implementation_of(proxy)?) {
            Some(Account::OrgImplementation { version }) => Some(*version),
            _ => None,
        }
    }

    pub fn logs(&self) -> &[LogEntry] {
        self.world.logs()
    }

    pub fn logs_json(&self) -> Result<String, RuntimeError> {
        Ok(serde_json::to_string_pretty(self.world.logs())?)
    }
}

impl Default for Chain {
    fn default() -> Self {
        Self::new(ChainConfig::default())
    }
}

// ── Execution ──────────────────────────────────────────────────────────

/// Where a call lands, resolved before any mutable borrow of the target.
enum Route {
    NoCode,
    Org,
    Registry,
    Factory,
    TreasuryFactory,
    Treasury(Treasury),
    Fungible,
    NonFungible,
    Implementation,
}

/// One in-flight transaction: the host contract logic runs against.
struct Execution<'a> {
    world: &'a mut WorldState,
    config: &'a ChainConfig,
    depth: usize,
}

impl<'a> Execution<'a> {
    fn new(world: &'a mut WorldState, config: &'a ChainConfig) -> Self {
        Self {
            world,
            config,
            depth: 0,
        }
    }

    fn route(&self, target: &Address) -> Route {
        match self.world.account(target) {
            None => Route::NoCode,
            Some(Account::Proxy(Proxy {
                instance: Instance::Org(_),
                ..
            })) => Route::Org,
            Some(Account::Proxy(Proxy {
                instance: Instance::Registry(_),
                ..
            })) => Route::Registry,
            Some(Account::Factory) => Route::Factory,
            Some(Account::TreasuryFactory) => Route::TreasuryFactory,
            Some(Account::Treasury(treasury)) => Route::Treasury(*treasury),
            Some(Account::Fungible(_)) => Route::Fungible,
            Some(Account::NonFungible(_)) => Route::NonFungible,
            Some(Account::OrgImplementation { .. } | Account::RegistryImplementation) => {
                Route::Implementation
            }
        }
    }

    fn dispatch(
        &mut self,
        caller: &Address,
        target: &Address,
        value: Amount,
        calldata: &[u8],
    ) -> Result<CallOutput, ContractError> {
        self.world.transfer(caller, target, value)?;
        let route = self.route(target);

        if calldata.is_empty() {
            return self.receive(route, caller, target, value);
        }
        if let Route::NoCode = route {
            return Ok(CallOutput::Unit);
        }

        let call = Call::decode(calldata)?;
        tracing::debug!(
            caller = %caller,
            target = %target,
            function = call.signature(),
            depth = self.depth,
            "dispatch"
        );

        match route {
            Route::NoCode => Ok(CallOutput::Unit),
            Route::Org => guild_org::org::dispatch(self, target, caller, call),
            Route::Factory => guild_org::factory::dispatch(self, target, caller, call),
            Route::TreasuryFactory => {
                guild_treasury::factory::dispatch(self, target, caller, call)
            }
            Route::Treasury(treasury) => treasury.dispatch(self, caller, call),
            Route::Registry => {
                let mut events = Vec::new();
                let output = self.world.registry_mut(target)?.handle(caller, call, &mut events)?;
                self.emit_all(target, events);
                Ok(output)
            }
            Route::Fungible => {
                let mut events = Vec::new();
                let output = self.world.fungible_mut(target)?.handle(caller, call, &mut events)?;
                self.emit_all(target, events);
                Ok(output)
            }
            Route::NonFungible => {
                let mut events = Vec::new();
                let output = self
                    .world
                    .non_fungible_mut(target)?
                    .handle(caller, call, &mut events)?;
                self.emit_all(target, events);
                Ok(output)
            }
            Route::Implementation => Err(ContractError::UnknownFunction {
                target: *target,
                function: call.signature(),
            }),
        }
    }

    /// Plain value transfer (empty calldata).
    fn receive(
        &mut self,
        route: Route,
        caller: &Address,
        target: &Address,
        value: Amount,
    ) -> Result<CallOutput, ContractError> {
        match route {
            Route::NoCode | Route::Org => Ok(CallOutput::Unit),
            Route::Treasury(treasury) => Ok(treasury.receive(self, caller, value)),
            _ => Err(ContractError::UnknownFunction {
                target: *target,
                function: "receive()",
            }),
        }
    }

    fn emit_all(&mut self, emitter: &Address, events: Vec<Event>) {
        for event in events {
            self.emit(emitter, event);
        }
    }
}

impl Host for Execution<'_> {
    fn chain_id(&self) -> ChainId {
        self.config.chain_id
    }

    fn is_authorized(
        &self,
        registry: &Address,
        caller: &Address,
        action: &Action,
    ) -> Result<bool, ContractError> {
        Ok(self.world.registry(registry)?.is_authorized(caller, action))
    }

    fn call(
        &mut self,
        caller: &Address,
        target: &Address,
        value: Amount,
        calldata: &[u8],
    ) -> Result<CallOutput, ContractError> {
        if self.depth >= self.config.max_call_depth {
            return Err(ContractError::CallDepthExceeded(self.config.max_call_depth));
        }
        self.depth += 1;
        let result = self.dispatch(caller, target, value, calldata);
        self.depth -= 1;
        result
    }

    fn emit(&mut self, emitter: &Address, event: Event) {
        tracing::trace!(emitter = %emitter, event = ?event, "event");
        self.world.push_log(LogEntry {
            emitter: *emitter,
            event,
        });
    }
}

impl OrgHost for Execution<'_> {
    fn org(&self, address: &Address) -> Result<&Org, ContractError> {
        self.world.org(address)
    }

    fn org_mut(&mut self, address: &Address) -> Result<&mut Org, ContractError> {
        self.world.org_mut(address)
    }

    fn deploy_proxy(
        &mut self,
        deployer: &Address,
        salt: &Hash256,
        implementation: &Address,
    ) -> Result<Address, ContractError> {
        let address = create2_address(deployer, salt, &proxy_init_code_hash(implementation, &[]));
        let instance = match self.world.account(implementation) {
            Some(Account::OrgImplementation { .. }) => Instance::Org(Org::new(address)),
            Some(Account::RegistryImplementation) => {
                Instance::Registry(AccessRegistry::new(address))
            }
            _ => return Err(ContractError::InvalidImplementation(*implementation)),
        };
        self.world.insert_account(
            address,
            Account::Proxy(Proxy {
                implementation: *implementation,
                instance,
            }),
        )?;
        tracing::debug!(deployer = %deployer, proxy = %address, implementation = %implementation, "proxy deployed");
        Ok(address)
    }

    fn set_implementation(
        &mut self,
        proxy: &Address,
        implementation: &Address,
    ) -> Result<(), ContractError> {
        if !matches!(
            self.world.account(implementation),
            Some(Account::OrgImplementation { .. })
        ) {
            return Err(ContractError::InvalidImplementation(*implementation));
        }
        let address = *proxy;
        let proxy = self.world.proxy_mut(proxy)?;
        if !matches!(proxy.instance, Instance::Org(_)) {
            return Err(ContractError::UnexpectedAccount {
                address,
                expected: "an org proxy",
            });
        }
        proxy.implementation = *implementation;
        Ok(())
    }
}

impl TreasuryHost for Execution<'_> {
    fn deploy_treasury(
        &mut self,
        deployer: &Address,
        access_registry: &Address,
    ) -> Result<Address, ContractError> {
        let address = create_address(deployer, self.world.nonce(deployer));
        self.world.insert_account(
            address,
            Account::Treasury(Treasury::new(address, *access_registry)),
        )?;
        self.world.bump_nonce(deployer);
        tracing::debug!(deployer = %deployer, treasury = %address, "treasury deployed");
        Ok(address)
    }
}
