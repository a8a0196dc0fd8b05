//! Core card types.
//!
//! This module provides the `CardNetwork` enum for identifying card networks
//! and the `Card` struct holding the caller-supplied card data.

use std::fmt;
use std::str::FromStr;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Card networks known to the classifier.
///
/// `Unknown` is a placeholder and is never the result of a successful
/// classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CardNetwork {
    /// Placeholder for numbers that match no rule.
    Unknown,
    /// American Express - Prefix 34, 37
    AmericanExpress,
    /// Aura - Prefix 50
    Aura,
    /// Bankcard - Prefix 5610, 560221-560225
    Bankcard,
    /// Cabal - Prefix 604201-604219
    Cabal,
    /// China UnionPay - Prefix 62
    ChinaUnionPay,
    /// Dankort - Prefix 5019
    Dankort,
    /// Diners Club Carte Blanche - Prefix 300-305, length 15
    DinersClubCarteBlanche,
    /// Diners Club Enroute - Prefix 2014, 2149
    DinersClubEnroute,
    /// Diners Club International - Prefix 300-305, 309, 36, 38, 39, length up to 14
    DinersClubInternational,
    /// Discover - Prefix 6011, 622126-622925, 644-649, 65
    Discover,
    /// Elo - Brazilian network, many scattered prefixes
    Elo,
    /// Hipercard - Brazilian network, Prefix 384100, 384140, 384160, 606282, 637095
    Hipercard,
    /// InstaPayment - Prefix 637-639, length 16
    InstaPayment,
    /// InterPayment - Prefix 636, length 16-19
    InterPayment,
    /// JCB - Prefix 35
    Jcb,
    /// Maestro - Prefix 5018, 5020, 5038, 5612, 5893, 6304, 6390, 6759, 6761-6763
    Maestro,
    /// Mastercard - Prefix 51-55
    Mastercard,
    /// Visa - Prefix 4
    Visa,
    /// Visa Electron - Prefix 4026, 417500, 4405, 4508, 4844, 4913, 4917
    VisaElectron,
}

impl CardNetwork {
    /// Every network the classifier can return, in declaration order.
    pub const ALL: [CardNetwork; 19] = [
        Self::AmericanExpress,
        Self::Aura,
        Self::Bankcard,
        Self::Cabal,
        Self::ChinaUnionPay,
        Self::Dankort,
        Self::DinersClubCarteBlanche,
        Self::DinersClubEnroute,
        Self::DinersClubInternational,
        Self::Discover,
        Self::Elo,
        Self::Hipercard,
        Self::InstaPayment,
        Self::InterPayment,
        Self::Jcb,
        Self::Maestro,
        Self::Mastercard,
        Self::Visa,
        Self::VisaElectron,
    ];

    /// Returns the canonical display name for the network.
    ///
    /// This is the string written back into [`Card::network`] and compared
    /// against it during validation.
    #[inline]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Unknown => "Unknown Card",
            Self::AmericanExpress => "American Express",
            Self::Aura => "Aura",
            Self::Bankcard => "Bankcard",
            Self::Cabal => "Cabal",
            Self::ChinaUnionPay => "China UnionPay",
            Self::Dankort => "Dankort",
            Self::DinersClubCarteBlanche => "Diners Club Carte Blanche",
            Self::DinersClubEnroute => "Diners Club Enroute",
            Self::DinersClubInternational => "Diners Club International",
            Self::Discover => "Discover",
            Self::Elo => "Elo",
            Self::Hipercard => "Hipercard",
            Self::InstaPayment => "InstaPayment",
            Self::InterPayment => "InterPayment",
            Self::Jcb => "JCB",
            Self::Maestro => "Maestro",
            Self::Mastercard => "Mastercard",
            Self::Visa => "Visa",
            Self::VisaElectron => "Visa Electron",
        }
    }

    /// Returns the CVV length this network requires.
    ///
    /// American Express uses a 4 digit code; everything else uses 3.
    #[inline]
    pub const fn cvv_length(&self) -> usize {
        match self {
            Self::AmericanExpress => 4,
            _ => 3,
        }
    }
}

impl fmt::Display for CardNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Error returned when a string is not a network display name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{0}' is not a known card network")]
pub struct UnknownNetworkName(
    /// The rejected name.
    pub String,
);

impl FromStr for CardNetwork {
    type Err = UnknownNetworkName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == Self::Unknown.name() {
            return Ok(Self::Unknown);
        }
        Self::ALL
            .iter()
            .copied()
            .find(|network| network.name() == s)
            .ok_or_else(|| UnknownNetworkName(s.to_string()))
    }
}

/// Card data supplied for validation.
///
/// The network is optional. When it is empty, validation fills it in with
/// the display name of the classified network; when it is given, it must
/// match the network determined from the number.
///
/// # Security
///
/// - Debug output masks the number and hides the CVV
/// - Number and CVV are zeroed on drop using the `zeroize` crate
#[derive(Clone, Default, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Card {
    /// Declared network display name, e.g. "Visa".
    pub network: Option<String>,
    /// The account number as a digit string.
    pub number: String,
    /// Expiry month, expected 1-12.
    pub expiry_month: i32,
    /// Four digit expiry year.
    pub expiry_year: i32,
    /// Card verification code as a digit string.
    pub cvv: String,
}

impl Card {
    /// Creates a card without a declared network.
    pub fn new(
        number: impl Into<String>,
        expiry_month: i32,
        expiry_year: i32,
        cvv: impl Into<String>,
    ) -> Self {
        Self {
            network: None,
            number: number.into(),
            expiry_month,
            expiry_year,
            cvv: cvv.into(),
        }
    }

    /// Sets the declared network.
    pub fn with_network(mut self, network: impl Into<String>) -> Self {
        self.network = Some(network.into());
        self
    }

    /// Returns the declared network, treating an empty string as absent.
    #[inline]
    pub fn declared_network(&self) -> Option<&str> {
        self.network.as_deref().filter(|n| !n.is_empty())
    }

    /// Runs every check against this card. See [`crate::validate()`].
    pub fn validate(self) -> crate::Validation {
        crate::validate(self)
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Card")
            .field("network", &self.network)
            .field("number", &crate::mask::mask_string(&self.number))
            .field("expiry_month", &self.expiry_month)
            .field("expiry_year", &self.expiry_year)
            .field("cvv", &"***")
            .finish()
    }
}
