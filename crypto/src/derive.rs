//! Deterministic contract-address derivation.
//!
//! Two schemes, both pure functions of public inputs:
//!
//! - `create`:  `H("create" ‖ deployer ‖ nonce_be)[12..32]`
//! - `create2`: `H(0xff ‖ deployer ‖ salt ‖ init_code_hash)[12..32]`
//!
//! `create2` addresses are what the org factory uses; any caller can compute
//! them off-chain before the deployment happens.

use crate::hash::{blake2b_256, blake2b_256_multi, digest};
use guild_types::{Address, ChainId, Hash256, Salt};

/// Creation code shared by every proxy the factory deploys.
pub const PROXY_CODE: &[u8] = b"guild/erc1967-proxy/v1";

/// Domain prefix for nonce-based deployments.
const CREATE_PREFIX: &[u8] = b"create";

/// Marker byte that separates salted derivation from nonce-based derivation.
const CREATE2_MARKER: [u8; 1] = [0xff];

/// Address of the `nonce`-th plain deployment made by `deployer`.
pub fn create_address(deployer: &Address, nonce: u64) -> Address {
    let digest = blake2b_256_multi(&[CREATE_PREFIX, deployer.as_bytes(), &nonce.to_be_bytes()]);
    Address::from_digest(&digest)
}

/// Salted deployment address: a function of deployer, salt and init-code hash only.
pub fn create2_address(deployer: &Address, salt: &Hash256, init_code_hash: &Hash256) -> Address {
    let digest = blake2b_256_multi(&[
        &CREATE2_MARKER,
        deployer.as_bytes(),
        salt.as_bytes(),
        init_code_hash.as_bytes(),
    ]);
    Address::from_digest(&digest)
}

/// Mix caller, deployer and chain into the nominal salt.
///
/// The same nominal salt from a different creator, deployer or chain therefore
/// lands on a different address.
pub fn derive_org_salt(
    creator: &Address,
    deployer: &Address,
    chain_id: ChainId,
    salt: &Salt,
) -> Hash256 {
    digest(&[
        creator.as_bytes(),
        deployer.as_bytes(),
        &chain_id.to_be_bytes(),
        salt.as_bytes(),
    ])
}

/// Hash of the proxy creation code plus its constructor arguments
/// `(implementation, init_data)`.
pub fn proxy_init_code_hash(implementation: &Address, init_data: &[u8]) -> Hash256 {
    let len = (init_data.len() as u64).to_be_bytes();
    digest(&[PROXY_CODE, implementation.as_bytes(), &len, init_data])
}

/// Stable address for a human label (wallets in tests and tooling).
pub fn address_from_label(label: &str) -> Address {
    Address::from_digest(&blake2b_256(label.as_bytes()))
}
