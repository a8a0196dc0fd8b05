//! Fuzz target for Luhn algorithm.
//!
//! Tests that luhn functions never panic and maintain invariants.

#![no_main]

use cardcheck::luhn;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Clamp values to valid digit range
    let digits: String = data.iter().map(|&b| (b'0' + b % 10) as char).collect();

    let _ = luhn::validate_luhn(&digits);

    if digits.len() < luhn::MIN_LUHN_LENGTH || digits.len() > luhn::MAX_LUHN_LENGTH {
        assert!(!luhn::validate_luhn(&digits), "Out of range length should fail");
    }

    // Test check digit generation
    if digits.len() >= luhn::MIN_LUHN_LENGTH - 1 && digits.len() < luhn::MAX_LUHN_LENGTH {
        let check = luhn::check_digit(&digits);
        assert!(check <= 9, "Check digit should be 0-9");

        let with_check = format!("{digits}{check}");
        assert!(luhn::validate_luhn(&with_check), "Adding check digit should make valid");
    }
});
