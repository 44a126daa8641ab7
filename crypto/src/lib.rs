//! Cryptographic primitives for Guild.
//!
//! - **Blake2b-256** for every digest (salts, init-code hashes, selectors)
//! - Deterministic contract-address derivation: plain (`create`, nonce based)
//!   and salted (`create2`, computable before deployment)
//! - 4-byte function selectors and interface ids

pub mod derive;
pub mod hash;
pub mod interface;

pub use derive::{
    address_from_label, create2_address, create_address, derive_org_salt, proxy_init_code_hash,
    PROXY_CODE,
};
pub use hash::{blake2b_256, blake2b_256_multi, digest};
pub use interface::{interface_id, selector};
