//! ERC-165 style interface ids of the org and the factory.

use guild_crypto::interface_id;
use guild_types::signatures;

const SUPPORTS_INTERFACE: &str = "supportsInterface(bytes4)";

pub fn erc165() -> [u8; 4] {
    interface_id(&[SUPPORTS_INTERFACE])
}

/// Functions every factory-created module exposes.
pub fn module_base() -> [u8; 4] {
    interface_id(&["moduleFactory()", "name()", signatures::UPGRADE_TO])
}

pub fn org() -> [u8; 4] {
    interface_id(&[
        "initialize(address,address,string)",
        signatures::EXECUTE,
        "accessRegistry()",
        "creator()",
    ])
}

pub fn org_factory() -> [u8; 4] {
    interface_id(&[signatures::CREATE_ORG])
}

pub fn org_supports(id: [u8; 4]) -> bool {
    id == org() || id == module_base() || id == erc165()
}

pub fn factory_supports(id: [u8; 4]) -> bool {
    id == org_factory() || id == erc165()
}
