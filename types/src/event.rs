//! Events emitted for off-chain observability.
//!
//! Events never drive internal control flow.

use crate::action::Action;
use crate::address::Address;
use crate::amount::{Amount, TokenId};
use crate::role::Role;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    // Access registry
    RegistryInitialized {
        root: Address,
    },
    RoleGranted {
        role: Role,
        account: Address,
        sender: Address,
    },
    RoleRevoked {
        role: Role,
        account: Address,
        sender: Address,
    },
    RoleAdminChanged {
        role: Role,
        previous_admin: Role,
        new_admin: Role,
    },
    ActionRoleAdded {
        action: Action,
        role: Role,
    },
    ActionRoleRemoved {
        action: Action,
        role: Role,
    },

    // Org
    OrgInitialized {
        access_registry: Address,
        creator: Address,
        name: String,
    },
    Executed {
        caller: Address,
        targets: Vec<Address>,
        values: Vec<Amount>,
    },
    Upgraded {
        implementation: Address,
    },

    // Org factory
    OrgCreated {
        org: Address,
        access_registry: Address,
        creator: Address,
        deployer: Address,
    },

    // Treasury factory
    TreasuryCreated {
        treasury: Address,
        access_registry: Address,
        creator: Address,
    },

    // Treasury
    EthDeposited {
        sender: Address,
        amount: Amount,
    },
    EthWithdrawn {
        recipients: Vec<Address>,
        amounts: Vec<Amount>,
    },
    FungibleDeposited {
        assets: Vec<Address>,
        senders: Vec<Address>,
        amounts: Vec<Amount>,
    },
    FungibleWithdrawn {
        assets: Vec<Address>,
        recipients: Vec<Address>,
        amounts: Vec<Amount>,
    },
    NonFungibleDeposited {
        assets: Vec<Address>,
        senders: Vec<Address>,
        token_ids: Vec<TokenId>,
    },
    NonFungibleWithdrawn {
        assets: Vec<Address>,
        recipients: Vec<Address>,
        token_ids: Vec<TokenId>,
    },

    // Asset ledgers
    Transfer {
        from: Address,
        to: Address,
        amount: Amount,
    },
    Approval {
        owner: Address,
        spender: Address,
        amount: Amount,
    },
    TokenTransfer {
        from: Address,
        to: Address,
        token_id: TokenId,
    },
    TokenApproval {
        owner: Address,
        approved: Address,
        token_id: TokenId,
    },
}

/// An event together with the contract that emitted it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub emitter: Address,
    #[serde(flatten)]
    pub event: Event,
}
