//! # cardcheck
//!
//! Credit card validation for Rust: network detection from BIN prefix rules,
//! Luhn checksum, CVV length and expiry checks.
//!
//! ## Quick Start
//!
//! ```rust
//! use cardcheck::{validate, Card, ValidationError};
//!
//! // Network omitted: it is determined from the number and written back
//! let validation = validate(Card::new("5019717010103742", 11, 2200, "123"));
//! assert_eq!(validation.card().network.as_deref(), Some("Dankort"));
//! assert!(!validation.is_expired());
//!
//! // Declared network must match the number
//! let validation = validate(
//!     Card::new("5019717010103742", 11, 2200, "123").with_network("Visa"),
//! );
//! assert!(validation.has_error(&ValidationError::CardTypeMismatch));
//! ```
//!
//! ## Flag Polarity
//!
//! `Validation::valid_cvv()` is `true` when the CVV length does **not**
//! match, and `Validation::valid_card_number()` is `true` when the number
//! **passed** Luhn. Each `true` comes with the message "cvv doesn't match"
//! or "card number is not valid" respectively. See [`validate`](mod@validate).
//!
//! ## Classification
//!
//! ```rust
//! use cardcheck::{classify, CardNetwork};
//!
//! assert_eq!(classify("4011780000000000"), Ok(CardNetwork::Elo));
//! assert_eq!(classify("4111111111111111"), Ok(CardNetwork::Visa));
//! assert!(classify("9999").is_err());
//! ```
//!
//! ## Supported Card Networks
//!
//! | Network | Prefix | Length | CVV |
//! |---------|--------|--------|-----|
//! | Elo | 4011, 4576, 509000-509999, 650031-655021 (subranges), ... | any | 3 |
//! | Cabal | 604201-604219 | any | 3 |
//! | Hipercard | 384100, 384140, 384160, 606282, 637095 | any | 3 |
//! | American Express | 34, 37 | any | 4 |
//! | Bankcard | 5610, 560221-560225 | any | 3 |
//! | China UnionPay | 62 | any | 3 |
//! | Diners Club Carte Blanche | 300-305 | 15 | 3 |
//! | Diners Club Enroute | 2014, 2149 | any | 3 |
//! | Diners Club International | 300-305, 309, 36, 38, 39 | up to 14 | 3 |
//! | Discover | 6011, 622126-622925, 644-649, 65 | any | 3 |
//! | InterPayment | 636 | 16-19 | 3 |
//! | InstaPayment | 637-639 | 16 | 3 |
//! | Maestro | 5018, 5020, 5038, 5612, 5893, 6304, 6390, 6759, 6761-6763 | any | 3 |
//! | Dankort | 5019 | any | 3 |
//! | Mastercard | 51-55 | any | 3 |
//! | JCB | 35 | any | 3 |
//! | Aura | 50 | any | 3 |
//! | Visa Electron | 4026, 417500, 4405, 4508, 4844, 4913, 4917 | any | 3 |
//! | Visa | 4 | any | 3 |
//!
//! Rules are checked top to bottom; the first match wins.
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `serde` | Serialize cards, networks, errors and validation results |
//! | `csv` | Read card batches from CSV with `batch::read_cards` |
//! | `parallel` | Rayon-based batch validation |
//! | `generate` | Random test number generation |
//! | `cli` | Command-line tool |
//!
//! ## Security
//!
//! - `Card` zeroizes its fields when dropped
//! - `Debug` masks the number and hides the CVV
//! - Tracing events only carry masked numbers
//! - No unsafe code (`#![deny(unsafe_code)]`)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod batch;
pub mod card;
pub mod cvv;
pub mod detect;
pub mod error;
pub mod expiry;
pub mod generate;
pub mod luhn;
pub mod mask;
pub mod validate;

// Re-export main types at crate root
pub use card::{Card, CardNetwork, UnknownNetworkName};
pub use detect::{classify, BinRule};
pub use error::ValidationError;
pub use luhn::validate_luhn;
pub use validate::{validate, Clock, Validation, Validator};
