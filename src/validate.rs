//! Main validation orchestration.
//!
//! [`validate`] runs five independent checks against a [`Card`] and collects
//! the outcome into a [`Validation`]:
//!
//! 1. expiry month is within 1-12
//! 2. expiry year is within 1900-2200
//! 3. the card is not expired
//! 4. the CVV has the length the network requires
//! 5. the number belongs to the declared network and passes Luhn
//!
//! When the card carries no network, the classified network's display name is
//! written into it before the CVV and number checks. The card is returned
//! inside the `Validation`, so the caller sees that backfill.
//!
//! # Flag polarity
//!
//! Two flags keep a long-standing inverted meaning, matching the messages
//! they trigger:
//!
//! - `valid_cvv` is `true` when the CVV length does **not** match, and then
//!   "cvv doesn't match" is reported.
//! - `valid_card_number` is `true` when the Luhn check **passed**, and then
//!   "card number is not valid" is reported.

use chrono::{DateTime, Utc};

use crate::card::Card;
use crate::detect::classify;
use crate::error::ValidationError;
use crate::{cvv, expiry, luhn};

/// Source of the current time used by the expiration check.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Clock {
    /// Read the wall clock on every validation.
    #[default]
    System,
    /// Always report this instant.
    Fixed(DateTime<Utc>),
}

impl Clock {
    /// Returns the current instant according to this clock.
    #[inline]
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Self::System => Utc::now(),
            Self::Fixed(now) => *now,
        }
    }
}

/// Runs card validations with a configurable clock.
///
/// # Example
///
/// ```
/// use cardcheck::{Card, Validator};
/// use chrono::{TimeZone, Utc};
///
/// let now = Utc.with_ymd_and_hms(2019, 6, 1, 0, 0, 0).unwrap();
/// let validation = Validator::at(now).validate(Card::new("5019717010103742", 11, 2020, "123"));
///
/// assert_eq!(validation.card().network.as_deref(), Some("Dankort"));
/// assert!(!validation.is_expired());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Validator {
    clock: Clock,
}

impl Validator {
    /// Creates a validator reading the wall clock.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a validator that evaluates expiration at `now`.
    #[inline]
    pub fn at(now: DateTime<Utc>) -> Self {
        Self::with_clock(Clock::Fixed(now))
    }

    /// Creates a validator using the given clock.
    #[inline]
    pub fn with_clock(clock: Clock) -> Self {
        Self { clock }
    }

    /// Returns the clock used for expiration.
    #[inline]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    /// Validates a card and returns the result together with the card.
    pub fn validate(&self, mut card: Card) -> Validation {
        let mut errors = Vec::new();

        let valid_expiry_month = expiry::is_valid_month(card.expiry_month);
        if !valid_expiry_month {
            errors.push(ValidationError::InvalidMonth(card.expiry_month));
        }

        let valid_expiry_year = expiry::is_valid_year(card.expiry_year);
        if !valid_expiry_year {
            errors.push(ValidationError::InvalidYear(card.expiry_year));
        }

        let is_expired =
            expiry::is_expired_at(card.expiry_month, card.expiry_year, self.clock.now());
        if is_expired {
            errors.push(ValidationError::Expired);
        }

        if card.declared_network().is_none() {
            match classify(&card.number) {
                Ok(network) => card.network = Some(network.name().to_string()),
                Err(e) => errors.push(e),
            }
        }

        let network = card.network.as_deref().unwrap_or_default();
        let valid_cvv = !cvv::matches(network, &card.cvv);
        if valid_cvv {
            errors.push(ValidationError::CvvMismatch);
        }

        let valid_card_number = match check_number(&card) {
            Ok(passed_luhn) => {
                if passed_luhn {
                    errors.push(ValidationError::InvalidNumber);
                }
                passed_luhn
            }
            Err(e) => {
                errors.push(e);
                false
            }
        };

        tracing::trace!(
            number = %crate::mask::mask_string(&card.number),
            network = card.network.as_deref().unwrap_or_default(),
            valid_expiry_month,
            valid_expiry_year,
            is_expired,
            valid_cvv,
            valid_card_number,
            errors = errors.len(),
            "validated card"
        );

        Validation {
            card,
            valid_card_number,
            valid_expiry_month,
            valid_expiry_year,
            valid_cvv,
            is_expired,
            errors,
        }
    }
}

/// Checks the number against the card's network, then runs Luhn.
fn check_number(card: &Card) -> Result<bool, ValidationError> {
    let determined = classify(&card.number)?;

    if card.network.as_deref() != Some(determined.name()) {
        return Err(ValidationError::CardTypeMismatch);
    }

    Ok(luhn::validate_luhn(&card.number))
}

/// Validates a card against the wall clock.
///
/// Validation never fails as a whole: every failing check is recorded in the
/// returned [`Validation`]. See the [module docs](self) for the check order and
/// the polarity of the CVV and number flags.
///
/// # Example
///
/// ```
/// use cardcheck::{validate, Card, ValidationError};
///
/// let validation = validate(Card::new("5019717010103742", 111, 2019, "123").with_network("Something"));
///
/// assert!(validation.has_error(&ValidationError::InvalidMonth(111)));
/// assert!(validation.has_error(&ValidationError::CardTypeMismatch));
/// assert!(validation.is_expired());
/// ```
pub fn validate(card: Card) -> Validation {
    Validator::new().validate(card)
}

/// The outcome of validating a [`Card`].
///
/// Holds the card (with any backfilled network), five flags and the messages
/// of every failing check in the order the checks ran.
///
/// With the `serde` feature this serializes including the unmasked card.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Validation {
    card: Card,
    valid_card_number: bool,
    valid_expiry_month: bool,
    valid_expiry_year: bool,
    valid_cvv: bool,
    is_expired: bool,
    errors: Vec<ValidationError>,
}

impl Validation {
    /// Returns the validated card.
    #[inline]
    pub fn card(&self) -> &Card {
        &self.card
    }

    /// Returns ownership of the validated card.
    #[inline]
    pub fn into_card(self) -> Card {
        self.card
    }

    /// `true` when the number matched the network and **passed** Luhn.
    ///
    /// Despite the name, a `true` value comes with a "card number is not
    /// valid" message.
    #[inline]
    pub const fn valid_card_number(&self) -> bool {
        self.valid_card_number
    }

    /// `true` when the month is within 1-12.
    #[inline]
    pub const fn valid_expiry_month(&self) -> bool {
        self.valid_expiry_month
    }

    /// `true` when the year is within 1900-2200.
    #[inline]
    pub const fn valid_expiry_year(&self) -> bool {
        self.valid_expiry_year
    }

    /// `true` when the CVV length does **not** match the network.
    #[inline]
    pub const fn valid_cvv(&self) -> bool {
        self.valid_cvv
    }

    /// `true` when the card is expired or its expiry date is invalid.
    #[inline]
    pub const fn is_expired(&self) -> bool {
        self.is_expired
    }

    /// Returns every failing check, in check order.
    #[inline]
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Returns the human-readable messages of [`errors`](Self::errors).
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    /// Returns true if `error` was reported.
    #[inline]
    pub fn has_error(&self, error: &ValidationError) -> bool {
        self.errors.contains(error)
    }

    /// Returns true if no check reported an error.
    #[inline]
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}
