//! Card network detection using BIN/IIN prefix rules.
//!
//! The Bank Identification Number (BIN), also known as Issuer Identification
//! Number (IIN), is the leading part of a card number. This module reads the
//! first one to six digits as integers and evaluates an ordered table of
//! [`BinRule`]s against them.
//!
//! # Ordering
//!
//! Several networks claim overlapping ranges. Elo, for example, owns
//! `4011` and `509000-509999` which would otherwise be read as Visa and Aura.
//! The table is evaluated top to bottom and the first matching rule wins, so
//! more specific rules sit above general ones.

use crate::error::ValidationError;
use crate::CardNetwork;

/// Number of leading digits available to prefix tests.
pub const MAX_PREFIX_DIGITS: usize = 6;

/// The leading-digit view of a card number used by predicates.
///
/// `prefix(n)` is the integer value of the first `n` characters. It is
/// unavailable when the number is shorter than `n` or any of those
/// characters is not an ASCII digit.
#[derive(Debug, Clone, Copy)]
pub struct Digits<'a> {
    number: &'a str,
    prefixes: [Option<u32>; MAX_PREFIX_DIGITS],
}

impl<'a> Digits<'a> {
    /// Extracts the prefixes of `number`.
    pub fn new(number: &'a str) -> Self {
        let mut prefixes = [None; MAX_PREFIX_DIGITS];
        let mut value = 0u32;

        for (slot, &b) in prefixes.iter_mut().zip(number.as_bytes()) {
            if !b.is_ascii_digit() {
                break;
            }
            value = value * 10 + (b - b'0') as u32;
            *slot = Some(value);
        }

        Self { number, prefixes }
    }

    /// Returns the integer value of the first `len` digits, if available.
    #[inline]
    pub fn prefix(&self, len: u8) -> Option<u32> {
        match len as usize {
            0 => None,
            n if n <= MAX_PREFIX_DIGITS => self.prefixes[n - 1],
            _ => None,
        }
    }

    /// Total length of the number.
    #[inline]
    pub fn len(&self) -> usize {
        self.number.len()
    }

    /// Returns true if the number is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.number.is_empty()
    }

    /// Returns true if the raw number text starts with `text`.
    #[inline]
    pub fn starts_with(&self, text: &str) -> bool {
        self.number.starts_with(text)
    }
}

/// A boolean combination of prefix and length tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predicate {
    /// The `len`-digit prefix lies in `min..=max`.
    ///
    /// Exact matches use `min == max`. A range with `min > max` never matches.
    Prefix {
        /// Prefix length in digits (1-6).
        len: u8,
        /// Inclusive lower bound.
        min: u32,
        /// Inclusive upper bound.
        max: u32,
    },
    /// The `len`-digit prefix is one of `values`.
    OneOf {
        /// Prefix length in digits (1-6).
        len: u8,
        /// Accepted prefix values.
        values: &'static [u32],
    },
    /// The raw number text starts with this string.
    Leading(&'static str),
    /// The total length lies in `min..=max`.
    Length {
        /// Inclusive lower bound.
        min: usize,
        /// Inclusive upper bound.
        max: usize,
    },
    /// At least one of the inner predicates holds.
    Any(&'static [Predicate]),
    /// Every inner predicate holds.
    All(&'static [Predicate]),
}

impl Predicate {
    /// Evaluates the predicate against a number.
    pub fn matches(&self, digits: &Digits<'_>) -> bool {
        match *self {
            Self::Prefix { len, min, max } => digits
                .prefix(len)
                .is_some_and(|p| min <= p && p <= max),
            Self::OneOf { len, values } => {
                digits.prefix(len).is_some_and(|p| values.contains(&p))
            }
            Self::Leading(text) => digits.starts_with(text),
            Self::Length { min, max } => (min..=max).contains(&digits.len()),
            Self::Any(inner) => inner.iter().any(|p| p.matches(digits)),
            Self::All(inner) => inner.iter().all(|p| p.matches(digits)),
        }
    }
}

const fn eq(len: u8, value: u32) -> Predicate {
    Predicate::Prefix {
        len,
        min: value,
        max: value,
    }
}

const fn range(len: u8, min: u32, max: u32) -> Predicate {
    Predicate::Prefix { len, min, max }
}

const fn one_of(len: u8, values: &'static [u32]) -> Predicate {
    Predicate::OneOf { len, values }
}

const fn length(min: usize, max: usize) -> Predicate {
    Predicate::Length { min, max }
}

/// One entry of the classification table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinRule {
    /// Network reported when the predicate matches.
    pub network: CardNetwork,
    /// Condition over the number's prefixes and length.
    pub predicate: Predicate,
}

impl BinRule {
    /// Returns true if this rule claims the number.
    #[inline]
    pub fn matches(&self, digits: &Digits<'_>) -> bool {
        self.predicate.matches(digits)
    }
}

/// The classification table, evaluated in order.
static RULES: [BinRule; 19] = [
    BinRule {
        network: CardNetwork::Elo,
        predicate: Predicate::Any(&[
            one_of(4, &[4011, 4576]),
            one_of(
                6,
                &[
                    431274, 438935, 451416, 457393, 457631, 457632, 504175, 627780, 636297,
                    636368, 636369,
                ],
            ),
            range(6, 506699, 506778),
            range(6, 509000, 509999),
            range(6, 650031, 650051),
            // Inverted bounds: never matches
            range(6, 650035, 650033),
            range(6, 650405, 650439),
            range(6, 650485, 650538),
            range(6, 650541, 650598),
            range(6, 650700, 650718),
            range(6, 650720, 650727),
            range(6, 650901, 650920),
            range(6, 651652, 651679),
            range(6, 655000, 655019),
            range(6, 655021, 655021),
        ]),
    },
    BinRule {
        network: CardNetwork::Cabal,
        predicate: range(6, 604201, 604219),
    },
    BinRule {
        network: CardNetwork::Hipercard,
        predicate: Predicate::Any(&[
            one_of(6, &[384100, 384140, 384160, 606282, 637095]),
            // Six digit values tested against the 4-digit prefix: never matches
            one_of(4, &[637568, 637599, 637609, 637612]),
        ]),
    },
    BinRule {
        network: CardNetwork::AmericanExpress,
        predicate: one_of(2, &[34, 37]),
    },
    BinRule {
        network: CardNetwork::Bankcard,
        predicate: Predicate::Any(&[eq(4, 5610), range(6, 560221, 560225)]),
    },
    BinRule {
        network: CardNetwork::ChinaUnionPay,
        predicate: eq(2, 62),
    },
    BinRule {
        network: CardNetwork::DinersClubCarteBlanche,
        predicate: Predicate::All(&[range(3, 300, 305), length(15, 15)]),
    },
    BinRule {
        network: CardNetwork::DinersClubEnroute,
        predicate: one_of(4, &[2014, 2149]),
    },
    BinRule {
        network: CardNetwork::DinersClubInternational,
        predicate: Predicate::All(&[
            Predicate::Any(&[range(3, 300, 305), eq(3, 309), one_of(2, &[36, 38, 39])]),
            length(0, 14),
        ]),
    },
    BinRule {
        network: CardNetwork::Discover,
        predicate: Predicate::Any(&[
            eq(4, 6011),
            range(6, 622126, 622925),
            range(3, 644, 649),
            eq(2, 65),
        ]),
    },
    BinRule {
        network: CardNetwork::InterPayment,
        predicate: Predicate::All(&[eq(3, 636), length(16, 19)]),
    },
    BinRule {
        network: CardNetwork::InstaPayment,
        predicate: Predicate::All(&[range(3, 637, 639), length(16, 16)]),
    },
    BinRule {
        network: CardNetwork::Maestro,
        predicate: Predicate::Any(&[
            one_of(
                4,
                &[5018, 5020, 5038, 5612, 5893, 6304, 6759, 6761, 6762, 6763, 6390],
            ),
            Predicate::Leading("0604"),
        ]),
    },
    BinRule {
        network: CardNetwork::Dankort,
        predicate: eq(4, 5019),
    },
    BinRule {
        network: CardNetwork::Mastercard,
        predicate: range(2, 51, 55),
    },
    BinRule {
        network: CardNetwork::Jcb,
        predicate: eq(2, 35),
    },
    BinRule {
        network: CardNetwork::Aura,
        predicate: eq(2, 50),
    },
    BinRule {
        network: CardNetwork::VisaElectron,
        predicate: Predicate::Any(&[
            one_of(4, &[4026, 4405, 4508, 4844, 4913, 4917]),
            eq(6, 417500),
        ]),
    },
    BinRule {
        network: CardNetwork::Visa,
        predicate: eq(1, 4),
    },
];

/// Returns the classification table in evaluation order.
#[inline]
pub fn rules() -> &'static [BinRule] {
    &RULES
}

/// Finds the first rule that claims `number`, with its position in [`rules()`].
///
/// # Example
///
/// ```
/// use cardcheck::detect::classify_rule;
/// use cardcheck::CardNetwork;
///
/// // 4011 is an Elo prefix listed above the generic Visa rule
/// let (index, rule) = classify_rule("4011780000000000").unwrap();
/// assert_eq!(index, 0);
/// assert_eq!(rule.network, CardNetwork::Elo);
/// ```
pub fn classify_rule(number: &str) -> Option<(usize, &'static BinRule)> {
    let digits = Digits::new(number);
    RULES
        .iter()
        .enumerate()
        .find(|(_, rule)| rule.matches(&digits))
}

/// Determines the card network from the number's prefix and length.
///
/// # Errors
///
/// Returns [`ValidationError::UnknownCardType`] when no rule matches.
///
/// # Example
///
/// ```
/// use cardcheck::detect::classify;
/// use cardcheck::{CardNetwork, ValidationError};
///
/// assert_eq!(classify("378282246310005"), Ok(CardNetwork::AmericanExpress));
/// assert_eq!(classify("5019717010103742"), Ok(CardNetwork::Dankort));
/// assert_eq!(classify("0000000000"), Err(ValidationError::UnknownCardType));
/// ```
pub fn classify(number: &str) -> Result<CardNetwork, ValidationError> {
    match classify_rule(number) {
        Some((index, rule)) => {
            tracing::debug!(
                number = %crate::mask::mask_string(number),
                rule = index,
                network = rule.network.name(),
                "classified card number"
            );
            Ok(rule.network)
        }
        None => {
            tracing::debug!(
                number = %crate::mask::mask_string(number),
                "no BIN rule matched card number"
            );
            Err(ValidationError::UnknownCardType)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn network(number: &str) -> Option<CardNetwork> {
        classify(number).ok()
    }

    #[test]
    fn test_representative_numbers() {
        let cases = [
            ("378282246310005", CardNetwork::AmericanExpress),
            ("655021246310005", CardNetwork::Elo),
            ("604201246310005", CardNetwork::Cabal),
            ("384140246310005", CardNetwork::Hipercard),
            ("560221246310005", CardNetwork::Bankcard),
            ("620221246310005", CardNetwork::ChinaUnionPay),
            ("300221246310005", CardNetwork::DinersClubCarteBlanche),
            ("201421246310005", CardNetwork::DinersClubEnroute),
            ("39022124631000", CardNetwork::DinersClubInternational),
            ("601121246310005", CardNetwork::Discover),
            ("63612124631000500", CardNetwork::InterPayment),
            ("6371212463100050", CardNetwork::InstaPayment),
            ("501821246310005", CardNetwork::Maestro),
            ("5019717010103742", CardNetwork::Dankort),
            ("511821246310005", CardNetwork::Mastercard),
            ("351821246310005", CardNetwork::Jcb),
            ("508821246310005", CardNetwork::Aura),
            ("402621246310005", CardNetwork::VisaElectron),
            ("409921246310005", CardNetwork::Visa),
        ];

        for (number, expected) in cases {
            assert_eq!(network(number), Some(expected), "{number}");
        }
    }

    #[test]
    fn test_elo_wins_over_later_rules() {
        // Would otherwise be Visa
        assert_eq!(network("4011780000000000"), Some(CardNetwork::Elo));
        assert_eq!(network("4576000000000000"), Some(CardNetwork::Elo));
        assert_eq!(network("4312740000000000"), Some(CardNetwork::Elo));
        // Would otherwise be Aura
        assert_eq!(network("5066990000000000"), Some(CardNetwork::Elo));
        assert_eq!(network("5099990000000000"), Some(CardNetwork::Elo));
        // Would otherwise be Discover
        assert_eq!(network("6500310000000000"), Some(CardNetwork::Elo));
        assert_eq!(network("6550210000000000"), Some(CardNetwork::Elo));
        // Would otherwise be InterPayment
        assert_eq!(network("6363680000000000"), Some(CardNetwork::Elo));
    }

    #[test]
    fn test_range_edges() {
        assert_eq!(network("6500520000000000"), Some(CardNetwork::Discover));
        assert_eq!(network("6550200000000000"), Some(CardNetwork::Discover));
        assert_eq!(network("5066980000000000"), Some(CardNetwork::Aura));
        assert_eq!(network("6042190000000000"), Some(CardNetwork::Cabal));
        assert_eq!(network("6042200000000000"), None);
        assert_eq!(network("5602250000000000"), Some(CardNetwork::Bankcard));
        assert_eq!(network("5602260000000000"), None);
        assert_eq!(network("5610000000000000"), Some(CardNetwork::Bankcard));
    }

    #[test]
    fn test_inverted_elo_range_never_matches() {
        let dead = range(6, 650035, 650033);
        for prefix in 650030..=650040u32 {
            let number = format!("{prefix}0000000000");
            assert!(!dead.matches(&Digits::new(&number)), "{number}");
        }
    }

    #[test]
    fn test_hipercard_four_digit_entries_never_match() {
        // The 4-digit rule lists 6-digit values, so these fall through to InstaPayment
        assert_eq!(network("6375680000000000"), Some(CardNetwork::InstaPayment));
        assert_eq!(network("6376120000000000"), Some(CardNetwork::InstaPayment));
        // The 6-digit Hipercard entry still wins
        assert_eq!(network("6370950000000000"), Some(CardNetwork::Hipercard));
    }

    #[test]
    fn test_diners_length_rules() {
        assert_eq!(network("300000000000000"), Some(CardNetwork::DinersClubCarteBlanche));
        assert_eq!(network("30000000000000"), Some(CardNetwork::DinersClubInternational));
        assert_eq!(network("30900000000000"), Some(CardNetwork::DinersClubInternational));
        assert_eq!(network("36000000000000"), Some(CardNetwork::DinersClubInternational));
        assert_eq!(network("38000000000000"), Some(CardNetwork::DinersClubInternational));
        // Too long for International, wrong length for Carte Blanche
        assert_eq!(network("3000000000000000"), None);
        assert_eq!(network("3600000000000000"), None);
    }

    #[test]
    fn test_interpayment_and_instapayment_lengths() {
        assert_eq!(network("6361000000000000"), Some(CardNetwork::InterPayment));
        assert_eq!(network("6361000000000000000"), Some(CardNetwork::InterPayment));
        assert_eq!(network("636100000000000"), None);
        assert_eq!(network("6361000000000000000000"), None);
        assert_eq!(network("6391000000000000"), Some(CardNetwork::InstaPayment));
        assert_eq!(network("63910000000000000"), None);
    }

    #[test]
    fn test_maestro_prefixes() {
        for prefix in [5018, 5020, 5038, 5612, 5893, 6304, 6759, 6761, 6762, 6763, 6390] {
            // 15 digits, so 6390 is not read as InstaPayment
            let number = format!("{prefix}00000000000");
            assert_eq!(network(&number), Some(CardNetwork::Maestro), "{number}");
        }
        assert_eq!(network("0604000000000000"), Some(CardNetwork::Maestro));
        assert_eq!(network("6390000000000000"), Some(CardNetwork::InstaPayment));
    }

    #[test]
    fn test_visa_electron_prefixes() {
        for prefix in ["4026", "4405", "4508", "4844", "4913", "4917", "417500"] {
            let number = format!("{prefix:0<16}");
            assert_eq!(network(&number), Some(CardNetwork::VisaElectron), "{number}");
        }
        assert_eq!(network("4175010000000000"), Some(CardNetwork::Visa));
    }

    #[test]
    fn test_short_numbers_use_available_prefixes() {
        assert_eq!(network("4"), Some(CardNetwork::Visa));
        assert_eq!(network("62"), Some(CardNetwork::ChinaUnionPay));
        assert_eq!(network("5019"), Some(CardNetwork::Dankort));
        // 6-digit Cabal range needs six digits; 60420 is nothing
        assert_eq!(network("60420"), None);
    }

    #[test]
    fn test_unknown_numbers() {
        assert_eq!(classify("0000000000"), Err(ValidationError::UnknownCardType));
        assert_eq!(classify(""), Err(ValidationError::UnknownCardType));
        assert_eq!(classify("1234567890123456"), Err(ValidationError::UnknownCardType));
        assert_eq!(classify("9000000000000000"), Err(ValidationError::UnknownCardType));
    }

    #[test]
    fn test_non_digits_make_prefixes_unavailable() {
        let digits = Digits::new("4x11");
        assert_eq!(digits.prefix(1), Some(4));
        assert_eq!(digits.prefix(2), None);
        assert_eq!(digits.prefix(4), None);
        assert_eq!(network("4x11111111111111"), Some(CardNetwork::Visa));
        assert_eq!(network("x411111111111111"), None);
    }

    #[test]
    fn test_prefix_lengths_out_of_range() {
        let digits = Digits::new("4111111111111111");
        assert_eq!(digits.prefix(0), None);
        assert_eq!(digits.prefix(6), Some(411111));
        assert_eq!(digits.prefix(7), None);
    }

    #[test]
    fn test_classify_rule_reports_table_position() {
        let (index, rule) = classify_rule("4111111111111111").unwrap();
        assert_eq!(index, rules().len() - 1);
        assert_eq!(rule.network, CardNetwork::Visa);

        let (index, _) = classify_rule("378282246310005").unwrap();
        assert_eq!(rules()[index].network, CardNetwork::AmericanExpress);
    }

    #[test]
    fn test_every_network_has_a_rule() {
        for network in CardNetwork::ALL {
            assert!(
                rules().iter().any(|rule| rule.network == network),
                "{network} has no rule"
            );
        }
    }
}
