//! Calldata ABI.
//!
//! Every public entry point of every contract kind is one `Call` variant.
//! Calldata on the wire is the bincode encoding of a `Call`; empty calldata is
//! a plain native-value transfer.

use crate::action::{signatures, Action};
use crate::address::Address;
use crate::amount::{Amount, TokenId};
use crate::error::ContractError;
use crate::hash::Salt;
use crate::role::Role;
use serde::{Deserialize, Serialize};

/// One-shot bootstrap parameters for an access registry.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryInit {
    /// Principal that receives the default-admin role (the org).
    pub root: Address,
    /// Addresses granted the executor role before any vote has happened.
    pub executors: Vec<Address>,
    pub roles: Vec<Role>,
    pub role_admins: Vec<Role>,
    pub members: Vec<Vec<Address>>,
    pub actions: Vec<Action>,
    pub action_roles: Vec<Vec<Role>>,
}

/// Parameters for `OrgFactory::createOrg`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateOrgParams {
    pub org_implementation: Address,
    pub registry_implementation: Address,
    pub name: String,
    pub salt: Salt,
    pub roles: Vec<Role>,
    pub role_admins: Vec<Role>,
    pub members: Vec<Vec<Address>>,
    /// Function signatures on the org being created, bound to the org address
    /// once it is known.
    pub org_functions: Vec<String>,
    pub org_function_roles: Vec<Vec<Role>>,
    /// Actions on module contracts (treasuries and the like) whose addresses
    /// the caller already knows.
    pub actions: Vec<Action>,
    pub action_roles: Vec<Vec<Role>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Call {
    // Access registry
    Initialize(RegistryInit),
    CreateRoles {
        roles: Vec<Role>,
        role_admins: Vec<Role>,
        members: Vec<Vec<Address>>,
    },
    AdminGrantRole {
        role: Role,
        account: Address,
    },
    AdminRevokeRole {
        role: Role,
        account: Address,
    },
    AddActionsRoles {
        actions: Vec<Action>,
        roles: Vec<Vec<Role>>,
    },
    RemoveActionsRoles {
        actions: Vec<Action>,
        roles: Vec<Vec<Role>>,
    },
    HasRole {
        role: Role,
        account: Address,
    },
    GetRoleAdmin {
        role: Role,
    },
    GetActionRoles {
        action: Action,
    },
    IsRoleAuthorized {
        action: Action,
        role: Role,
    },
    IsAuthorized {
        caller: Address,
        action: Action,
    },

    // Org
    InitializeOrg {
        access_registry: Address,
        creator: Address,
        name: String,
    },
    Execute {
        targets: Vec<Address>,
        values: Vec<Amount>,
        calldatas: Vec<Vec<u8>>,
    },
    UpgradeTo {
        implementation: Address,
    },
    AccessRegistry,
    Name,
    Creator,
    ModuleFactory,
    SupportsInterface {
        interface_id: [u8; 4],
    },

    // Org factory
    CreateOrg {
        creator: Address,
        params: CreateOrgParams,
    },

    // Treasury factory
    CreateTreasury {
        access_registry: Address,
    },

    // Treasury
    WithdrawEth {
        recipients: Vec<Address>,
        amounts: Vec<Amount>,
    },
    DepositFungible {
        assets: Vec<Address>,
        senders: Vec<Address>,
        amounts: Vec<Amount>,
    },
    WithdrawFungible {
        assets: Vec<Address>,
        recipients: Vec<Address>,
        amounts: Vec<Amount>,
    },
    DepositNonFungible {
        assets: Vec<Address>,
        senders: Vec<Address>,
        token_ids: Vec<TokenId>,
    },
    WithdrawNonFungible {
        assets: Vec<Address>,
        recipients: Vec<Address>,
        token_ids: Vec<TokenId>,
    },

    // Asset ledgers
    Transfer {
        to: Address,
        amount: Amount,
    },
    Approve {
        spender: Address,
        amount: Amount,
    },
    TransferFrom {
        from: Address,
        to: Address,
        amount: Amount,
    },
    BalanceOf {
        holder: Address,
    },
    ApproveToken {
        to: Address,
        token_id: TokenId,
    },
    TransferToken {
        from: Address,
        to: Address,
        token_id: TokenId,
    },
    OwnerOf {
        token_id: TokenId,
    },
}

impl Call {
    /// Canonical function signature, the key actions are bound under.
    pub fn signature(&self) -> &'static str {
        match self {
            Self::Initialize(_) => {
                "initialize(address,address[],string[],string[],address[][],address[],string[],string[][])"
            }
            Self::CreateRoles { .. } => signatures::CREATE_ROLES,
            Self::AdminGrantRole { .. } => "adminGrantRole(string,address)",
            Self::AdminRevokeRole { .. } => "adminRevokeRole(string,address)",
            Self::AddActionsRoles { .. } => signatures::ADD_ACTIONS_ROLES,
            Self::RemoveActionsRoles { .. } => signatures::REMOVE_ACTIONS_ROLES,
            Self::HasRole { .. } => "hasRole(string,address)",
            Self::GetRoleAdmin { .. } => "getRoleAdmin(string)",
            Self::GetActionRoles { .. } => "getActionRoles(address,string)",
            Self::IsRoleAuthorized { .. } => "isRoleAuthorized(address,string,string)",
            Self::IsAuthorized { .. } => "isAuthorized(address,address,string)",
            Self::InitializeOrg { .. } => "initialize(address,address,string)",
            Self::Execute { .. } => signatures::EXECUTE,
            Self::UpgradeTo { .. } => signatures::UPGRADE_TO,
            Self::AccessRegistry => "accessRegistry()",
            Self::Name => "name()",
            Self::Creator => "creator()",
            Self::ModuleFactory => "moduleFactory()",
            Self::SupportsInterface { .. } => "supportsInterface(bytes4)",
            Self::CreateOrg { .. } => signatures::CREATE_ORG,
            Self::CreateTreasury { .. } => signatures::CREATE_TREASURY,
            Self::WithdrawEth { .. } => signatures::WITHDRAW_ETH,
            Self::DepositFungible { .. } => signatures::DEPOSIT_ERC20,
            Self::WithdrawFungible { .. } => signatures::WITHDRAW_ERC20,
            Self::DepositNonFungible { .. } => signatures::DEPOSIT_ERC721,
            Self::WithdrawNonFungible { .. } => signatures::WITHDRAW_ERC721,
            Self::Transfer { .. } => "transfer(address,uint256)",
            Self::Approve { .. } => "approve(address,uint256)",
            Self::TransferFrom { .. } => "transferFrom(address,address,uint256)",
            Self::BalanceOf { .. } => "balanceOf(address)",
            Self::ApproveToken { .. } => "approveToken(address,uint256)",
            Self::TransferToken { .. } => "transferToken(address,address,uint256)",
            Self::OwnerOf { .. } => "ownerOf(uint256)",
        }
    }

    /// Encode as calldata.
    pub fn encode(&self) -> Vec<u8> {
        bincode::serialize(self).expect("Call is always serializable")
    }

    /// Decode calldata produced by [`Call::encode`].
    pub fn decode(calldata: &[u8]) -> Result<Self, ContractError> {
        bincode::deserialize(calldata).map_err(|e| ContractError::InvalidCalldata(e.to_string()))
    }
}

/// Return value of a dispatched call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CallOutput {
    Unit,
    Bool(bool),
    Role(Role),
    Roles(Vec<Role>),
    Address(Address),
    Text(String),
    Amount(Amount),
    OrgCreated {
        org: Address,
        access_registry: Address,
    },
    Batch(Vec<CallOutput>),
}

impl CallOutput {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_address(&self) -> Option<Address> {
        match self {
            Self::Address(a) => Some(*a),
            _ => None,
        }
    }

    /// The `(org, access_registry)` pair returned by `createOrg`.
    pub fn as_org_pair(&self) -> Option<(Address, Address)> {
        match self {
            Self::OrgCreated {
                org,
                access_registry,
            } => Some((*org, *access_registry)),
            _ => None,
        }
    }
}
