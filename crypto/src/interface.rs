//! Function selectors and interface identifiers.
//!
//! A selector is the first four bytes of the Blake2b digest of a canonical
//! function signature; an interface id is the XOR of its functions' selectors.

use crate::hash::blake2b_256;

/// 4-byte selector of a function signature.
pub fn selector(signature: &str) -> [u8; 4] {
    let digest = blake2b_256(signature.as_bytes());
    [digest[0], digest[1], digest[2], digest[3]]
}

/// Interface id of a set of function signatures.
pub fn interface_id(signatures: &[&str]) -> [u8; 4] {
    signatures.iter().fold([0u8; 4], |mut acc, sig| {
        let sel = selector(sig);
        for (a, s) in acc.iter_mut().zip(sel) {
            *a ^= s;
        }
        acc
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_function_interface_is_its_selector() {
        let sig = "supportsInterface(bytes4)";
        assert_eq!(interface_id(&[sig]), selector(sig));
    }

    #[test]
    fn interface_id_is_order_independent() {
        let a = interface_id(&["a()", "b()", "c()"]);
        let b = interface_id(&["c()", "a()", "b()"]);
        assert_eq!(a, b);
    }

    #[test]
    fn empty_interface_is_zero() {
        assert_eq!(interface_id(&[]), [0u8; 4]);
    }
}
