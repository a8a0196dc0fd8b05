//! Batch validation of many cards.
//!
//! Every card is validated independently with the same [`Validator`], so a
//! batch shares one clock. With the `parallel` feature, batches can be spread
//! over a rayon thread pool; each card is owned by exactly one task, so the
//! network backfill never races.
//!
//! # Example
//!
//! ```
//! use cardcheck::batch::{count_clean, validate_all};
//! use cardcheck::{Card, Validator};
//!
//! let cards = vec![
//!     Card::new("4111111111111112", 12, 2200, "123"),
//!     Card::new("0000000000", 12, 2200, "123"),
//! ];
//! let results = validate_all(&Validator::new(), cards);
//! assert_eq!(results.len(), 2);
//! assert_eq!(count_clean(&results), 1);
//! ```
//!
//! With the `csv` feature, [`read_cards`] loads a batch from
//! `number,month,year,cvv[,network]` rows.

use crate::{Card, Validation, Validator};

/// Validates each card in order.
pub fn validate_all<I>(validator: &Validator, cards: I) -> Vec<Validation>
where
    I: IntoIterator<Item = Card>,
{
    cards.into_iter().map(|card| validator.validate(card)).collect()
}

/// Validates cards in parallel using rayon, preserving input order.
///
/// # Feature
///
/// Requires the `parallel` feature to be enabled.
#[cfg(feature = "parallel")]
pub fn validate_all_parallel(validator: &Validator, cards: Vec<Card>) -> Vec<Validation> {
    use rayon::prelude::*;
    cards
        .into_par_iter()
        .map(|card| validator.validate(card))
        .collect()
}

/// Counts validations that reported no errors.
#[inline]
pub fn count_clean(results: &[Validation]) -> usize {
    results.iter().filter(|v| v.is_clean()).count()
}

/// Error returned when a card batch cannot be read.
#[cfg(feature = "csv")]
#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    /// A row could not be read or has fields of the wrong type.
    #[error("cannot read card record: {0}")]
    Csv(#[from] csv::Error),
}

/// One `number,month,year,cvv[,network]` row.
#[cfg(feature = "csv")]
#[derive(serde::Deserialize)]
struct CardRecord {
    number: String,
    expiry_month: i32,
    expiry_year: i32,
    cvv: String,
    #[serde(default)]
    network: Option<String>,
}

/// Reads cards from headerless CSV rows of `number,month,year,cvv[,network]`.
///
/// Fields are trimmed and may be quoted. Lines starting with `#` and blank
/// lines are skipped. An empty or missing network leaves it to be classified.
///
/// # Feature
///
/// Requires the `csv` feature to be enabled.
///
/// # Example
///
/// ```
/// use cardcheck::batch::read_cards;
///
/// let data = "# number,month,year,cvv,network\n4111111111111112, 12, 2030, 123,\"Visa\"\n";
/// let cards = read_cards(data.as_bytes()).unwrap();
/// assert_eq!(cards[0].network.as_deref(), Some("Visa"));
/// ```
#[cfg(feature = "csv")]
pub fn read_cards<R: std::io::Read>(reader: R) -> Result<Vec<Card>, BatchError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_reader(reader);

    csv_reader
        .deserialize::<CardRecord>()
        .map(|record| {
            let record = record?;
            let mut card = Card::new(
                record.number,
                record.expiry_month,
                record.expiry_year,
                record.cvv,
            );
            card.network = record.network;
            Ok(card)
        })
        .collect()
}
