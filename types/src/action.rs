//! Protected actions.
//!
//! An action names one function on one contract. Keying on the target address
//! lets a single registry govern the org and any number of module contracts
//! without signature collisions.

use crate::address::Address;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Canonical function signatures of every gated entry point.
pub mod signatures {
    pub const EXECUTE: &str = "execute(address[],uint256[],bytes[])";
    pub const UPGRADE_TO: &str = "upgradeTo(address)";

    pub const CREATE_ORG: &str = "createOrg(address,(address,address,string,bytes32,string[],string[],address[][],string[],string[][],address[],string[],string[][]))";
    pub const CREATE_TREASURY: &str = "createTreasury(address)";

    pub const CREATE_ROLES: &str = "createRoles(string[],string[],address[][])";
    pub const ADD_ACTIONS_ROLES: &str = "addActionsRoles(address[],string[],string[][])";
    pub const REMOVE_ACTIONS_ROLES: &str = "removeActionsRoles(address[],string[],string[][])";

    pub const WITHDRAW_ETH: &str = "withdrawEth(address[],uint256[])";
    pub const DEPOSIT_ERC20: &str = "depositERC20Tokens(address[],address[],uint256[])";
    pub const WITHDRAW_ERC20: &str = "withdrawERC20Tokens(address[],address[],uint256[])";
    pub const DEPOSIT_ERC721: &str = "depositERC721Tokens(address[],address[],uint256[])";
    pub const WITHDRAW_ERC721: &str = "withdrawERC721Tokens(address[],address[],uint256[])";
}

/// A protected operation: `function` on the contract at `target`.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Action {
    pub target: Address,
    pub function: Cow<'static, str>,
}

impl Action {
    pub fn new(target: Address, function: impl Into<Cow<'static, str>>) -> Self {
        Self {
            target,
            function: function.into(),
        }
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Action({:?}::{})", self.target, self.function)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.target, self.function)
    }
}
