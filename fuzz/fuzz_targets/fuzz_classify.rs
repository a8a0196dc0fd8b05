//! Fuzz target for network classification.
//!
//! Tests that classification never panics and reports the first matching rule.

#![no_main]

use cardcheck::detect::{self, Digits};
use cardcheck::{classify, ValidationError};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let digits = Digits::new(data);

    match (classify(data), detect::classify_rule(data)) {
        (Ok(network), Some((index, rule))) => {
            assert_eq!(network, rule.network);
            assert!(detect::rules()[..index].iter().all(|r| !r.matches(&digits)));
        }
        (Err(e), None) => {
            assert_eq!(e, ValidationError::UnknownCardType);
            assert!(detect::rules().iter().all(|r| !r.matches(&digits)));
        }
        _ => panic!("classify and classify_rule disagree"),
    }
});
