//! Error types for credit card validation.
//!
//! Validation never fails as a whole. Each failing check is recorded as one
//! `ValidationError` in the returned [`crate::Validation`], and its
//! `Display` text is the human-readable message callers show to users.

/// A single failed check.
#[derive(Debug, Clone, PartialEq, Eq, Hash, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ValidationError {
    /// The expiry month is outside 1-12.
    #[error("month '{0}' is not a valid month")]
    InvalidMonth(i32),

    /// The expiry year is outside 1900-2200.
    #[error("year '{0}' is not a valid year")]
    InvalidYear(i32),

    /// The card's expiry month has begun, or the expiry date is unusable.
    #[error("creditcard is expired")]
    Expired,

    /// No rule in the BIN table matched the number.
    #[error("unknown creditcard type")]
    UnknownCardType,

    /// Raised when the CVV check flag is set.
    #[error("cvv doesn't match")]
    CvvMismatch,

    /// The declared network differs from the one determined from the number.
    #[error("given card type doesn't match determined card type")]
    CardTypeMismatch,

    /// Raised when the card number check flag is set.
    #[error("card number is not valid")]
    InvalidNumber,
}
