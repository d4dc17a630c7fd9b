//! Fuzz target for the decrypt path
//!
//! This fuzzer feeds arbitrary strings into `decrypt` to exercise:
//! - Malformed base64 input
//! - Structurally valid envelopes with garbage fields
//! - Version bytes this build does not recognize
//! - Truncated and oversized buffers
//!
//! The target should NEVER panic. All invalid inputs must return one of the
//! documented errors. Structural validation happens before key derivation,
//! so almost all inputs are rejected before any expensive work.

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(encoded) = std::str::from_utf8(data) else {
        return;
    };

    // Errors are expected; panics are bugs
    let _ = sealgram::decrypt(encoded, "fuzz-chat");
});
