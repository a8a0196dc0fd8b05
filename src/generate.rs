//! Card number generation for testing purposes.
//!
//! Generated numbers pass Luhn and classify to the requested network, but
//! are not connected to real accounts. They should only be used for testing.
//!
//! # Example
//!
//! ```
//! use cardcheck::generate::generate_number;
//! use cardcheck::{classify, validate_luhn, CardNetwork};
//!
//! let number = generate_number(CardNetwork::Dankort).unwrap();
//! assert!(number.starts_with("5019"));
//! assert!(validate_luhn(&number));
//! assert_eq!(classify(&number), Ok(CardNetwork::Dankort));
//! ```

use crate::detect::MAX_PREFIX_DIGITS;
use crate::luhn;
use crate::CardNetwork;

#[cfg(feature = "generate")]
use rand::Rng;

/// Returns a prefix and total length that the network's rule accepts.
///
/// Returns `None` for [`CardNetwork::Unknown`].
pub const fn representative(network: CardNetwork) -> Option<(&'static str, usize)> {
    let entry = match network {
        CardNetwork::Unknown => return None,
        CardNetwork::AmericanExpress => ("37", 15),
        CardNetwork::Aura => ("50", 16),
        CardNetwork::Bankcard => ("5610", 16),
        CardNetwork::Cabal => ("604201", 16),
        CardNetwork::ChinaUnionPay => ("62", 16),
        CardNetwork::Dankort => ("5019", 16),
        CardNetwork::DinersClubCarteBlanche => ("300", 15),
        CardNetwork::DinersClubEnroute => ("2014", 15),
        CardNetwork::DinersClubInternational => ("36", 14),
        CardNetwork::Discover => ("6011", 16),
        CardNetwork::Elo => ("509000", 16),
        CardNetwork::Hipercard => ("606282", 16),
        CardNetwork::InstaPayment => ("637", 16),
        CardNetwork::InterPayment => ("636", 16),
        CardNetwork::Jcb => ("35", 16),
        CardNetwork::Maestro => ("6759", 16),
        CardNetwork::Mastercard => ("51", 16),
        CardNetwork::Visa => ("4", 16),
        CardNetwork::VisaElectron => ("4026", 16),
    };
    Some(entry)
}

/// Returns the representative prefix for a network.
#[inline]
pub const fn representative_prefix(network: CardNetwork) -> Option<&'static str> {
    match representative(network) {
        Some((prefix, _)) => Some(prefix),
        None => None,
    }
}

/// Generates a Luhn-valid number deterministically (no randomness).
///
/// Middle digits are zeros, so the same network always yields the same
/// number. Returns `None` for [`CardNetwork::Unknown`].
pub fn generate_number(network: CardNetwork) -> Option<String> {
    let (prefix, length) = representative(network)?;
    generate_with_prefix(prefix, length)
}

/// Generates a Luhn-valid number of `length` starting with `prefix`.
///
/// Returns `None` if the prefix contains non-digits or leaves no room for
/// the check digit.
///
/// # Example
///
/// ```
/// use cardcheck::generate::generate_with_prefix;
///
/// let number = generate_with_prefix("411111", 16).unwrap();
/// assert_eq!(number, "4111110000000005");
/// assert!(generate_with_prefix("4111", 4).is_none());
/// ```
pub fn generate_with_prefix(prefix: &str, length: usize) -> Option<String> {
    if prefix.len() >= length || !prefix.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let mut number = String::with_capacity(length);
    number.push_str(prefix);
    while number.len() < length - 1 {
        number.push('0');
    }
    let check = luhn::check_digit(&number);
    number.push((b'0' + check) as char);
    Some(number)
}

/// Generates a Luhn-valid number for the network with random middle digits.
///
/// The first six digits are the zero-padded representative prefix, so the
/// random part never changes how the number classifies.
///
/// Requires the `generate` feature (which enables the `rand` dependency).
#[cfg(feature = "generate")]
pub fn generate_random(network: CardNetwork) -> Option<String> {
    let mut rng = rand::thread_rng();
    generate_random_with_rng(network, &mut rng)
}

/// Like [`generate_random`], using a provided RNG.
///
/// This is useful for reproducible test generation with seeded RNGs.
#[cfg(feature = "generate")]
pub fn generate_random_with_rng<R: Rng>(network: CardNetwork, rng: &mut R) -> Option<String> {
    let (prefix, length) = representative(network)?;

    let mut number = String::with_capacity(length);
    number.push_str(prefix);
    while number.len() < MAX_PREFIX_DIGITS {
        number.push('0');
    }
    while number.len() < length - 1 {
        number.push((b'0' + rng.gen_range(0..10u8)) as char);
    }
    let check = luhn::check_digit(&number);
    number.push((b'0' + check) as char);
    Some(number)
}

/// Returns the zero-padded six digit prefix used by random generation.
pub fn padded_prefix(network: CardNetwork) -> Option<String> {
    let prefix = representative_prefix(network)?;
    Some(format!("{prefix:0<width$}", width = MAX_PREFIX_DIGITS))
}
