//! Fuzz target for card validation.
//!
//! Tests that validate() never panics and keeps flags and messages in step.

#![no_main]

use arbitrary::Arbitrary;
use cardcheck::{Card, ValidationError, Validator};
use chrono::{TimeZone, Utc};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    number: String,
    month: i32,
    year: i32,
    cvv: String,
    network: Option<String>,
    timestamp: i64,
}

fuzz_target!(|input: Input| {
    let Some(now) = Utc.timestamp_opt(input.timestamp, 0).single() else {
        return;
    };

    let mut card = Card::new(input.number, input.month, input.year, input.cvv);
    card.network = input.network;

    let validation = Validator::at(now).validate(card);

    assert_eq!(validation.has_error(&ValidationError::CvvMismatch), validation.valid_cvv());
    assert_eq!(
        validation.has_error(&ValidationError::InvalidNumber),
        validation.valid_card_number()
    );
    assert_eq!(validation.has_error(&ValidationError::Expired), validation.is_expired());
    if !validation.valid_expiry_month() || !validation.valid_expiry_year() {
        assert!(validation.is_expired());
    }

    // Revalidating the returned card must give the same messages
    let again = Validator::at(now).validate(validation.clone().into_card());
    assert_eq!(validation.errors(), again.errors());
});
