#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Invalid input is fine, panics are bugs.
        let valid = gstkit::gstin::validate_gstin(s);
        let state = gstkit::gstin::state_code_from_gstin(s);
        assert_eq!(valid, state.is_some());
        let _ = gstkit::gstin::verify_gstin_checksum(s);
        if let Ok(gstin) = gstkit::gstin::Gstin::parse(s) {
            assert_eq!(Some(gstin.state_code().to_string()), state);
        }
    }
});
