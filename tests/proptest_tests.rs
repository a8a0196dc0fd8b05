//! Property-based tests using proptest.
//!
//! These tests verify invariants that should hold for all inputs,
//! helping discover edge cases that manual tests might miss.

use cardcheck::{
    classify, cvv, detect, expiry, generate, luhn, validate_luhn, Card, CardNetwork,
    ValidationError, Validator,
};
use chrono::{TimeZone, Utc};
use proptest::prelude::*;

// =============================================================================
// STRATEGIES
// =============================================================================

fn validator() -> Validator {
    Validator::at(Utc.with_ymd_and_hms(2019, 6, 15, 12, 0, 0).unwrap())
}

/// Any network the classifier can return.
fn network_strategy() -> impl Strategy<Value = CardNetwork> {
    prop::sample::select(CardNetwork::ALL.to_vec())
}

/// Generates a random digit string of a given length.
fn digit_string(len: usize) -> impl Strategy<Value = String> {
    proptest::collection::vec(prop::char::range('0', '9'), len)
        .prop_map(|chars| chars.into_iter().collect())
}

/// Generates a random digit string of a length within range.
fn digit_string_range(range: std::ops::RangeInclusive<usize>) -> impl Strategy<Value = String> {
    range.prop_flat_map(digit_string)
}

/// A Luhn-valid number for the network with random digits after the
/// six digit prefix.
fn network_number() -> impl Strategy<Value = (CardNetwork, String)> {
    network_strategy().prop_flat_map(|network| {
        let prefix = generate::padded_prefix(network).unwrap();
        let (_, length) = generate::representative(network).unwrap();
        digit_string(length - prefix.len() - 1).prop_map(move |middle| {
            let partial = format!("{prefix}{middle}");
            let check = luhn::check_digit(&partial);
            (network, format!("{partial}{check}"))
        })
    })
}

/// Cards with arbitrary field values, including out-of-range dates.
fn card_strategy() -> impl Strategy<Value = Card> {
    (
        digit_string_range(0..=20),
        -5i32..20,
        1850i32..2250,
        digit_string_range(0..=5),
        prop::option::of(prop_oneof![
            Just(String::new()),
            Just("Visa".to_string()),
            Just("American Express".to_string()),
            Just("Something".to_string()),
            network_strategy().prop_map(|n| n.name().to_string()),
        ]),
    )
        .prop_map(|(number, month, year, cvv, network)| {
            let mut card = Card::new(number, month, year, cvv);
            card.network = network;
            card
        })
}

// =============================================================================
// LUHN PROPERTIES
// =============================================================================

proptest! {
    /// Appending the check digit always yields a Luhn-valid number.
    #[test]
    fn check_digit_completes_luhn(partial in digit_string_range(12..=18)) {
        let check = luhn::check_digit(&partial);
        let number = format!("{partial}{check}");
        prop_assert!(validate_luhn(&number), "{}", number);
    }

    /// Exactly one check digit works.
    #[test]
    fn check_digit_is_unique(partial in digit_string_range(12..=18), other in 0u8..10) {
        let check = luhn::check_digit(&partial);
        prop_assume!(other != check);
        let number = format!("{partial}{other}");
        prop_assert!(!validate_luhn(&number));
    }

    /// Changing any single digit of a valid number breaks the checksum.
    #[test]
    fn single_digit_change_fails_luhn(
        (_, number) in network_number(),
        position in 0usize..19,
        delta in 1u8..10,
    ) {
        let position = position % number.len();
        let mut bytes = number.into_bytes();
        bytes[position] = b'0' + (bytes[position] - b'0' + delta) % 10;
        let changed = String::from_utf8(bytes).unwrap();
        prop_assert!(!validate_luhn(&changed), "{}", changed);
    }

    /// Lengths outside 13-19 never pass.
    #[test]
    fn short_and_long_numbers_fail_luhn(
        short in digit_string_range(0..=12),
        long in digit_string_range(20..=30),
    ) {
        prop_assert!(!validate_luhn(&short));
        prop_assert!(!validate_luhn(&long));
    }

    /// Luhn never panics on arbitrary input.
    #[test]
    fn luhn_never_panics(s in ".*") {
        let _ = validate_luhn(&s);
        let _ = luhn::check_digit(&s);
    }
}

// =============================================================================
// CLASSIFICATION PROPERTIES
// =============================================================================

proptest! {
    /// Numbers built from a network's prefix classify back to that network.
    #[test]
    fn generated_numbers_classify((network, number) in network_number()) {
        prop_assert_eq!(classify(&number), Ok(network), "{}", number);
    }

    /// Classification never panics and agrees with the rule table.
    #[test]
    fn classify_never_panics(s in ".*") {
        match classify(&s) {
            Ok(network) => {
                let (_, rule) = detect::classify_rule(&s).unwrap();
                prop_assert_eq!(rule.network, network);
                prop_assert_ne!(network, CardNetwork::Unknown);
            }
            Err(e) => {
                prop_assert_eq!(e, ValidationError::UnknownCardType);
                prop_assert!(detect::classify_rule(&s).is_none());
            }
        }
    }

    /// Numbers starting with 1, 7, 8 or 9 match no rule.
    #[test]
    fn unassigned_leading_digits_are_unknown(
        lead in prop::sample::select(vec!['1', '7', '8', '9']),
        rest in digit_string_range(0..=18),
    ) {
        let number = format!("{lead}{rest}");
        prop_assert_eq!(classify(&number), Err(ValidationError::UnknownCardType));
    }
}

// =============================================================================
// VALIDATION PROPERTIES
// =============================================================================

proptest! {
    /// Every flag is mirrored by its message.
    #[test]
    fn errors_mirror_flags(card in card_strategy()) {
        let month = card.expiry_month;
        let year = card.expiry_year;
        let v = validator().validate(card);

        prop_assert_eq!(v.has_error(&ValidationError::InvalidMonth(month)), !v.valid_expiry_month());
        prop_assert_eq!(v.has_error(&ValidationError::InvalidYear(year)), !v.valid_expiry_year());
        prop_assert_eq!(v.has_error(&ValidationError::Expired), v.is_expired());
        prop_assert_eq!(v.has_error(&ValidationError::CvvMismatch), v.valid_cvv());
        prop_assert_eq!(v.has_error(&ValidationError::InvalidNumber), v.valid_card_number());
        prop_assert_eq!(v.messages().len(), v.errors().len());
    }

    /// An invalid month or year always counts as expired.
    #[test]
    fn invalid_dates_are_expired(card in card_strategy()) {
        let v = validator().validate(card);
        if !v.valid_expiry_month() || !v.valid_expiry_year() {
            prop_assert!(v.is_expired());
        }
    }

    /// A network is never written unless the number classifies to it.
    #[test]
    fn backfill_uses_classified_name(card in card_strategy()) {
        let declared = card.declared_network().map(str::to_string);
        let v = validator().validate(card);

        match declared {
            Some(name) => prop_assert_eq!(v.card().network.as_deref(), Some(name.as_str())),
            None => match classify(&v.card().number) {
                Ok(network) => {
                    prop_assert_eq!(v.card().network.as_deref(), Some(network.name()))
                }
                Err(_) => prop_assert!(v.card().declared_network().is_none()),
            },
        }
    }

    /// Validating the returned card again gives the same outcome.
    #[test]
    fn revalidation_is_stable(card in card_strategy()) {
        let first = validator().validate(card);
        let second = validator().validate(first.clone().into_card());

        prop_assert_eq!(first.errors(), second.errors());
        prop_assert_eq!(first.valid_cvv(), second.valid_cvv());
        prop_assert_eq!(first.valid_card_number(), second.valid_card_number());
        prop_assert_eq!(first.card().network.clone(), second.card().network.clone());
    }

    /// The CVV flag is raised exactly when the length differs from the network's.
    #[test]
    fn cvv_length_rule((network, number) in network_number(), code in digit_string_range(0..=6)) {
        let v = validator().validate(Card::new(number, 11, 2020, code.clone()));
        let mismatch = code.len() != network.cvv_length();
        prop_assert_eq!(v.valid_cvv(), mismatch);
        prop_assert_eq!(cvv::matches(network.name(), &code), !mismatch);
    }

    /// Valid numbers of the right network raise only the number flag.
    #[test]
    fn matching_valid_numbers_report_only_luhn_pass((network, number) in network_number()) {
        let code = "0".repeat(network.cvv_length());
        let v = validator().validate(Card::new(number, 11, 2020, code));
        prop_assert_eq!(v.errors(), &[ValidationError::InvalidNumber]);
        prop_assert!(v.valid_card_number());
    }
}

// =============================================================================
// EXPIRY PROPERTIES
// =============================================================================

proptest! {
    /// Valid dates expire exactly when their month has started.
    #[test]
    fn expiry_follows_first_of_month(month in 1i32..=12, year in 2000i32..=2100) {
        let start = expiry::first_of_month(month, year).unwrap();
        prop_assert!(!expiry::is_expired_at(month, year, start));
        prop_assert!(expiry::is_expired_at(month, year, start + chrono::Duration::seconds(1)));
        prop_assert!(!expiry::is_expired_at(month, year, start - chrono::Duration::days(1)));
    }

    /// Parsing never panics on arbitrary input.
    #[test]
    fn parse_expiry_never_panics(s in ".{0,12}") {
        let _ = expiry::parse_expiry(&s);
    }

    /// Separated dates parse to their digits, with no month range check.
    #[test]
    fn parse_expiry_reads_separated_dates(
        month in 0i32..=99,
        pad_month in any::<bool>(),
        separator in prop::sample::select(vec!['/', '-']),
        year in 0i32..=9999,
        short_year in any::<bool>(),
    ) {
        let month_text = if pad_month { format!("{month:02}") } else { month.to_string() };
        let (year_text, expected_year) = if short_year {
            (format!("{:02}", year % 100), 2000 + year % 100)
        } else {
            (format!("{year:04}"), year)
        };
        let input = format!("{month_text}{separator}{year_text}");

        prop_assert_eq!(expiry::parse_expiry(&input), Ok((month, expected_year)), "{}", input);
    }
}
