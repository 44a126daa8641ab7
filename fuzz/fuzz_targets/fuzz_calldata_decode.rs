#![no_main]

use libfuzzer_sys::fuzz_target;

use guild_types::Call;

// Decoding arbitrary calldata must never panic, and anything that decodes
// must re-encode to calldata that decodes to the same call.
fuzz_target!(|data: &[u8]| {
    let Ok(call) = Call::decode(data) else {
        return;
    };
    let _ = call.signature();
    let encoded = call.encode();
    let decoded = Call::decode(&encoded);
    assert_eq!(decoded.as_ref(), Ok(&call), "re-encoded calldata must decode");
});
