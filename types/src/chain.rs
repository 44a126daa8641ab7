//! Chain identifier.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies the chain a deployment lives on.
///
/// Mixed into every factory salt so that the same nominal salt yields different
/// addresses on different chains.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChainId(pub u64);

impl ChainId {
    /// The production network.
    pub const MAINNET: Self = Self(1);
    /// Local development network.
    pub const DEV: Self = Self(31337);

    pub fn to_be_bytes(&self) -> [u8; 8] {
        self.0.to_be_bytes()
    }

    /// Human-readable name for well-known chains.
    pub fn as_str(&self) -> &'static str {
        match *self {
            Self::MAINNET => "mainnet",
            Self::DEV => "dev",
            _ => "custom",
        }
    }
}

impl Default for ChainId {
    fn default() -> Self {
        Self::DEV
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
