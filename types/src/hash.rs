//! 32-byte digests and deployment salts.

use crate::error::ContractError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A 32-byte digest (init-code hashes, derived salts).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hash256([u8; 32]);

impl Hash256 {
    pub const ZERO: Self = Self([0u8; 32]);

    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }
}

impl fmt::Debug for Hash256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash256({})", hex::encode(&self.0[..4]))
    }
}

impl fmt::Display for Hash256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

/// The caller-chosen nominal salt passed to the factory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Salt(pub [u8; 32]);

impl Salt {
    pub const ZERO: Self = Self([0u8; 32]);

    /// Right-pad short UTF-8 text into a salt.
    ///
    /// Fails with [`ContractError::InvalidSalt`] for text of 32 bytes or
    /// more, which leaves no room for the terminating zero byte.
    pub fn from_text(text: &str) -> Result<Self, ContractError> {
        let raw = text.as_bytes();
        if raw.len() > 31 {
            return Err(ContractError::InvalidSalt);
        }
        let mut bytes = [0u8; 32];
        bytes[..raw.len()].copy_from_slice(raw);
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}
