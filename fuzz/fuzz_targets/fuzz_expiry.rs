//! Fuzz target for expiry date parsing.
//!
//! Tests that expiry parsing never panics on arbitrary input.

#![no_main]

use cardcheck::expiry;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let Ok((month, year)) = expiry::parse_expiry(data) else {
        return;
    };

    // These should never panic
    let _ = expiry::first_of_month(month, year);
    let expired = expiry::is_expired(month, year);

    if !expiry::is_valid_month(month) || !expiry::is_valid_year(year) {
        assert!(expired, "Invalid dates count as expired");
    }
});
