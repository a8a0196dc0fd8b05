//! Fuzz target for CVV checks.
//!
//! Tests that CVV functions never panic on arbitrary input.

#![no_main]

use cardcheck::{cvv, CardNetwork};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: (&str, &str)| {
    let (network, code) = data;

    // These should never panic
    let required = cvv::required_length(network);
    assert!(required == 3 || required == 4);
    assert_eq!(cvv::matches(network, code), code.len() == required);

    for network in CardNetwork::ALL {
        let _ = cvv::matches(network.name(), code);
    }
});
