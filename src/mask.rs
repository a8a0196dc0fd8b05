//! Masking utilities for logs and debug output.
//!
//! Card numbers only leave this crate through tracing events and `Debug`
//! output in masked form. PCI-DSS allows displaying the last 4 digits.

/// Masks a card number showing only the last 4 digits.
///
/// Non-digit characters are dropped before masking. Inputs with 4 digits or
/// fewer are fully masked.
///
/// # Example
///
/// ```
/// use cardcheck::mask::mask_string;
///
/// assert_eq!(mask_string("4111111111111111"), "****-****-****-1111");
/// assert_eq!(mask_string("378282246310005"), "****-****-***0005");
/// assert_eq!(mask_string("123"), "***");
/// ```
pub fn mask_string(input: &str) -> String {
    let digits: Vec<char> = input.chars().filter(|c| c.is_ascii_digit()).collect();
    let len = digits.len();

    if len <= 4 {
        return "*".repeat(len);
    }

    let masked_count = len - 4;
    let mut result = String::with_capacity(len + (len / 4));

    for i in 0..masked_count {
        if i > 0 && i % 4 == 0 {
            result.push('-');
        }
        result.push('*');
    }

    if masked_count % 4 == 0 {
        result.push('-');
    }

    result.extend(&digits[len - 4..]);
    result
}
