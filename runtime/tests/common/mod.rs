//! Shared fixtures for the runtime integration tests.

#![allow(dead_code)]

use guild_crypto::address_from_label;
use guild_org::OrgAddresses;
use guild_runtime::{Chain, CoreContracts, Receipt};
use guild_types::{
    signatures, Address, Call, CallOutput, CreateOrgParams, Event, Role, Salt,
};

pub fn wallet(label: &str) -> Address {
    address_from_label(label)
}

pub fn upgrade_role() -> Role {
    Role::from("UPGRADE_ROLE")
}

/// A chain with core contracts deployed by `deployer`.
pub struct Fixture {
    pub chain: Chain,
    pub core: CoreContracts,
    pub deployer: Address,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with_chain(Chain::default())
    }

    pub fn with_chain(mut chain: Chain) -> Self {
        let deployer = wallet("deployer");
        let core = chain.deploy_core(&deployer).expect("core contracts deploy");
        Self {
            chain,
            core,
            deployer,
        }
    }

    pub fn predict(&self, creator: &Address, salt: &str) -> OrgAddresses {
        self.chain.predict_org_addresses(
            &self.core.factory,
            creator,
            &self.deployer,
            &salt_of(salt),
            &self.core.org_implementation,
            &self.core.registry_implementation,
        )
    }

    /// Params with no roles and no actions.
    pub fn empty_params(&self, salt: &str) -> CreateOrgParams {
        CreateOrgParams {
            org_implementation: self.core.org_implementation,
            registry_implementation: self.core.registry_implementation,
            name: "TestOrg".into(),
            salt: salt_of(salt),
            roles: Vec::new(),
            role_admins: Vec::new(),
            members: Vec::new(),
            org_functions: Vec::new(),
            org_function_roles: Vec::new(),
            actions: Vec::new(),
            action_roles: Vec::new(),
        }
    }

    /// EXECUTE_ROLE for executor1/executor2, UPGRADE_ROLE for upgrader1;
    /// `execute` bound to EXECUTE_ROLE, `upgradeTo` to both.
    pub fn standard_params(&self, salt: &str) -> CreateOrgParams {
        CreateOrgParams {
            roles: vec![Role::EXECUTOR, upgrade_role()],
            role_admins: vec![Role::DEFAULT_ADMIN, Role::DEFAULT_ADMIN],
            members: vec![
                vec![wallet("executor1"), wallet("executor2")],
                vec![wallet("upgrader1")],
            ],
            org_functions: vec![signatures::EXECUTE.into(), signatures::UPGRADE_TO.into()],
            org_function_roles: vec![vec![Role::EXECUTOR], vec![Role::EXECUTOR, upgrade_role()]],
            ..self.empty_params(salt)
        }
    }

    pub fn create_org(&mut self, params: CreateOrgParams) -> Receipt {
        let call = Call::CreateOrg {
            creator: self.deployer,
            params,
        };
        self.chain
            .submit(&self.deployer, &self.core.factory, &call)
            .expect("org creation succeeds")
    }

    /// Create the standard org under salt "hi".
    pub fn standard_org(&mut self) -> OrgAddresses {
        let receipt = self.create_org(self.standard_params("hi"));
        let (org, access_registry) = receipt.output.as_org_pair().expect("org pair output");
        OrgAddresses {
            org,
            access_registry,
        }
    }

    pub fn has_role(&self, registry: &Address, role: &Role, account: &Address) -> bool {
        self.chain
            .registry(registry)
            .expect("registry exists")
            .has_role(role, account)
    }

    /// `org.execute` with a single zero-value sub-call.
    pub fn execute_one(
        &mut self,
        executor: &Address,
        org: &Address,
        target: &Address,
        call: &Call,
    ) -> Result<Receipt, guild_types::ContractError> {
        let batch = Call::Execute {
            targets: vec![*target],
            values: vec![guild_types::Amount::ZERO],
            calldatas: vec![call.encode()],
        };
        self.chain.submit(executor, org, &batch)
    }
}

pub fn salt_of(text: &str) -> Salt {
    Salt::from_text(text).expect("short salt")
}

pub fn grant(role: Role, account: Address) -> Call {
    Call::AdminGrantRole { role, account }
}

pub fn emitted(receipt: &Receipt, emitter: &Address, event: &Event) -> bool {
    receipt.events_from(emitter).any(|e| e == event)
}

pub fn output_bool(output: CallOutput) -> bool {
    output.as_bool().expect("bool output")
}
