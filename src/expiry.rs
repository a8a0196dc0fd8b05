//! Credit card expiry checks.
//!
//! A card is treated as expired once the first instant of its expiry month
//! (UTC midnight on day 1) is in the past. Cards with an out-of-range month or
//! year are always reported expired.
//!
//! # Supported Formats
//!
//! [`parse_expiry`] accepts the usual printed forms:
//!
//! - `MM/YY` - e.g., "12/25"
//! - `MM/YYYY` - e.g., "12/2025"
//! - `MMYY` - e.g., "1225"
//! - `MMYYYY` - e.g., "122025"
//! - `MM-YY` - e.g., "12-25"
//! - `MM-YYYY` - e.g., "12-2025"
//!
//! # Example
//!
//! ```
//! use cardcheck::expiry::{is_expired_at, parse_expiry};
//! use chrono::{TimeZone, Utc};
//!
//! let (month, year) = parse_expiry("11/20").unwrap();
//! assert_eq!((month, year), (11, 2020));
//!
//! let now = Utc.with_ymd_and_hms(2020, 10, 15, 0, 0, 0).unwrap();
//! assert!(!is_expired_at(month, year, now));
//! ```

use chrono::{DateTime, NaiveDate, Utc};

/// Lowest accepted expiry year.
pub const MIN_YEAR: i32 = 1900;

/// Highest accepted expiry year.
pub const MAX_YEAR: i32 = 2200;

/// Returns true if `month` is within 1-12.
#[inline]
pub const fn is_valid_month(month: i32) -> bool {
    1 <= month && month <= 12
}

/// Returns true if `year` is within 1900-2200.
#[inline]
pub const fn is_valid_year(year: i32) -> bool {
    MIN_YEAR <= year && year <= MAX_YEAR
}

/// Returns the first instant of the expiry month, if month and year are valid.
pub fn first_of_month(month: i32, year: i32) -> Option<DateTime<Utc>> {
    if !is_valid_month(month) || !is_valid_year(year) {
        return None;
    }
    let date = NaiveDate::from_ymd_opt(year, month as u32, 1)?;
    Some(date.and_hms_opt(0, 0, 0)?.and_utc())
}

/// Returns true if the card counts as expired at `now`.
///
/// Invalid months or years are always expired.
pub fn is_expired_at(month: i32, year: i32, now: DateTime<Utc>) -> bool {
    match first_of_month(month, year) {
        Some(start) => start < now,
        None => true,
    }
}

/// Returns true if the card counts as expired right now.
pub fn is_expired(month: i32, year: i32) -> bool {
    is_expired_at(month, year, Utc::now())
}

/// Errors that can occur while parsing a printed expiry date.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExpiryError {
    /// The input string is empty.
    #[error("expiry date is empty")]
    Empty,
    /// Invalid format - couldn't parse month/year.
    #[error("invalid expiry format (expected MM/YY or MM/YYYY)")]
    InvalidFormat,
}

/// Parses a printed expiry date into `(month, year)`.
///
/// Two digit years are read as 20YY. The month is not range checked here;
/// out-of-range values are reported by validation.
///
/// # Example
///
/// ```
/// use cardcheck::expiry::parse_expiry;
///
/// assert_eq!(parse_expiry("12/25"), Ok((12, 2025)));
/// assert_eq!(parse_expiry("01-2030"), Ok((1, 2030)));
/// assert_eq!(parse_expiry("1130"), Ok((11, 2030)));
/// ```
pub fn parse_expiry(input: &str) -> Result<(i32, i32), ExpiryError> {
    let input = input.trim();

    if input.is_empty() {
        return Err(ExpiryError::Empty);
    }

    if let Some((month, year)) = input.split_once('/').or_else(|| input.split_once('-')) {
        return parse_month_year(month.trim(), year.trim());
    }

    match input.len() {
        4 | 6 if input.is_ascii() => parse_month_year(&input[..2], &input[2..]),
        _ => Err(ExpiryError::InvalidFormat),
    }
}

fn parse_month_year(month: &str, year: &str) -> Result<(i32, i32), ExpiryError> {
    if month.is_empty() || month.len() > 2 || !month.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ExpiryError::InvalidFormat);
    }
    if !year.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ExpiryError::InvalidFormat);
    }

    let month: i32 = month.parse().map_err(|_| ExpiryError::InvalidFormat)?;
    let year = match year.len() {
        2 => 2000 + year.parse::<i32>().map_err(|_| ExpiryError::InvalidFormat)?,
        4 => year.parse().map_err(|_| ExpiryError::InvalidFormat)?,
        _ => return Err(ExpiryError::InvalidFormat),
    };

    Ok((month, year))
}
