//! Luhn algorithm implementation for credit card validation.
//!
//! The Luhn algorithm (also known as the "modulus 10" algorithm) is a checksum
//! formula used to validate credit card numbers and other identification numbers.
//!
//! Numbers are checked as strings. Only lengths 13 through 19 are accepted,
//! and characters that are not ASCII digits count as zero.

/// Shortest number the Luhn check accepts.
pub const MIN_LUHN_LENGTH: usize = 13;

/// Longest number the Luhn check accepts.
pub const MAX_LUHN_LENGTH: usize = 19;

/// Lookup table for doubled digits: double the value, then `(d % 10) + 1` if above 9.
/// Index is the digit (0-9), value is the transformed result.
const DOUBLE_TABLE: [u32; 10] = [0, 2, 4, 6, 8, 1, 3, 5, 7, 9];

/// Validates a card number string using the Luhn algorithm.
///
/// # Returns
///
/// `false` if the length is outside 13-19, otherwise whether the checksum is
/// a multiple of 10.
///
/// # Algorithm
///
/// 1. Starting from the rightmost digit (check digit), moving left
/// 2. Double every second digit
/// 3. If doubling results in a number > 9, replace it with `(d % 10) + 1`
/// 4. Sum all digits
/// 5. If the sum is divisible by 10, the number is valid
///
/// # Example
///
/// ```
/// use cardcheck::luhn::validate_luhn;
///
/// assert!(validate_luhn("4111111111111111"));
/// assert!(!validate_luhn("4111111111111112"));
///
/// // Too short, even though the checksum is zero
/// assert!(!validate_luhn("0000000000"));
/// ```
#[inline]
pub fn validate_luhn(number: &str) -> bool {
    let len = number.len();
    if !(MIN_LUHN_LENGTH..=MAX_LUHN_LENGTH).contains(&len) {
        return false;
    }

    compute_checksum(number.as_bytes()) % 10 == 0
}

/// Computes the Luhn sum (not modulo 10) of ASCII bytes.
///
/// Bytes that are not ASCII digits contribute zero.
#[inline]
pub fn compute_checksum(bytes: &[u8]) -> u32 {
    bytes
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &b)| {
            let digit = digit_value(b);
            if i % 2 == 1 {
                DOUBLE_TABLE[digit as usize]
            } else {
                digit
            }
        })
        .sum()
}

/// Computes the check digit to append to `partial` so the result passes Luhn.
///
/// # Example
///
/// ```
/// use cardcheck::luhn::check_digit;
///
/// assert_eq!(check_digit("411111111111111"), 1);
/// assert_eq!(check_digit("37828224631000"), 5);
/// ```
#[inline]
pub fn check_digit(partial: &str) -> u8 {
    // Every digit shifts one position left once the check digit is appended,
    // so the rightmost digit of the partial number is doubled.
    let sum: u32 = partial
        .as_bytes()
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &b)| {
            let digit = digit_value(b);
            if i % 2 == 0 {
                DOUBLE_TABLE[digit as usize]
            } else {
                digit
            }
        })
        .sum();

    ((10 - (sum % 10)) % 10) as u8
}

#[inline]
fn digit_value(b: u8) -> u32 {
    if b.is_ascii_digit() {
        (b - b'0') as u32
    } else {
        0
    }
}
