//! CVV length rules.
//!
//! - American Express: 4 digits (printed on front)
//! - All other networks, including unknown ones: 3 digits (printed on back)
//!
//! The network is given as a display name because validation compares
//! against whatever the caller put in [`crate::Card::network`].
//!
//! # Example
//!
//! ```
//! use cardcheck::cvv::{matches, required_length};
//!
//! assert_eq!(required_length("American Express"), 4);
//! assert_eq!(required_length("Visa"), 3);
//! assert_eq!(required_length("Something"), 3);
//!
//! assert!(matches("American Express", "1234"));
//! assert!(!matches("Dankort", "1234"));
//! ```

use crate::CardNetwork;

/// Returns the CVV length required for a network display name.
#[inline]
pub fn required_length(network: &str) -> usize {
    if network == CardNetwork::AmericanExpress.name() {
        CardNetwork::AmericanExpress.cvv_length()
    } else {
        CardNetwork::Unknown.cvv_length()
    }
}

/// Returns true if the CVV has the length the network requires.
///
/// Only the length is checked; the characters themselves are not.
#[inline]
pub fn matches(network: &str, cvv: &str) -> bool {
    cvv.len() == required_length(network)
}
