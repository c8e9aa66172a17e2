#![no_main]

use codec::{decode_user_info, encode_user_info, DecodeLimits};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let limits = DecodeLimits::for_testing();
    let Ok(packet) = decode_user_info(data, &limits) else {
        return;
    };

    // A fully decoded packet with only known components must re-encode to
    // something that decodes to the same components.
    if packet.completeness.is_complete() {
        if let Ok(bytes) = encode_user_info(&packet) {
            let again = decode_user_info(&bytes, &limits).expect("re-encoded packet decodes");
            assert_eq!(again.components, packet.components);
        }
    }
});
