//! Blake2b-256, the one digest every derivation in this crate is built on.

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};
use guild_types::Hash256;

type Blake2b256 = Blake2b<U32>;

/// Hash the concatenation of `parts` without building it.
pub fn blake2b_256_multi(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Blake2b256::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().into()
}

pub fn blake2b_256(data: &[u8]) -> [u8; 32] {
    blake2b_256_multi(&[data])
}

/// [`blake2b_256_multi`] as a [`Hash256`], the form salts and init-code
/// hashes are carried in.
pub fn digest(parts: &[&[u8]]) -> Hash256 {
    Hash256::new(blake2b_256_multi(parts))
}
