//! Payment targets handed to the wallet provider.
//!
//! A [`PayToAddress`] describes one transaction output: where the value
//! goes, how much of which assets, and optionally a datum for script
//! addresses. The lifecycle never looks inside these; it passes them to
//! the provider in the order the caller supplied them.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::datum::PlutusData;

// ---------------------------------------------------------------------------
// AddressType
// ---------------------------------------------------------------------------

/// Kind of destination address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AddressType {
    /// Payment + staking credential.
    Base,
    /// Payment credential only.
    Enterprise,
    /// Script address, usually a DEX order or pool contract.
    Contract,
}

// ---------------------------------------------------------------------------
// Asset
// ---------------------------------------------------------------------------

/// A native asset or ADA itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Asset {
    /// The chain's base currency, counted in lovelace.
    Lovelace,
    /// A native token.
    Token {
        /// Hex-encoded minting policy id.
        policy_id: String,
        /// Hex-encoded asset name.
        name_hex: String,
    },
}

impl Asset {
    /// Creates a native token reference.
    pub fn token(policy_id: impl Into<String>, name_hex: impl Into<String>) -> Self {
        Self::Token {
            policy_id: policy_id.into(),
            name_hex: name_hex.into(),
        }
    }

    /// Concatenated `policy_id + name_hex`, or `"lovelace"`.
    pub fn identifier(&self) -> String {
        match self {
            Self::Lovelace => "lovelace".to_string(),
            Self::Token {
                policy_id,
                name_hex,
            } => format!("{}{}", policy_id, name_hex),
        }
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.identifier())
    }
}

/// An amount of a single asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetBalance {
    /// Which asset.
    pub asset: Asset,
    /// Quantity in the asset's smallest unit.
    pub quantity: u64,
}

impl AssetBalance {
    /// Creates a new balance.
    pub fn new(asset: Asset, quantity: u64) -> Self {
        Self { asset, quantity }
    }
}

// ---------------------------------------------------------------------------
// PayToAddress
// ---------------------------------------------------------------------------

/// One payment output requested from the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayToAddress {
    /// Bech32 destination address.
    pub address: String,
    /// What kind of address `address` is.
    pub address_type: AddressType,
    /// Value sent to the address. May hold several assets.
    pub asset_balances: Vec<AssetBalance>,
    /// Datum attached to the output, typically an order datum.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datum: Option<PlutusData>,
    /// Whether `datum` is inlined in the output rather than hashed.
    #[serde(default)]
    pub is_inline_datum: bool,
    /// Free-form transaction metadata for this payment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

impl PayToAddress {
    /// Starts a payment with no value attached.
    pub fn new(address: impl Into<String>, address_type: AddressType) -> Self {
        Self {
            address: address.into(),
            address_type,
            asset_balances: Vec::new(),
            datum: None,
            is_inline_datum: false,
            metadata: None,
        }
    }

    /// Adds an asset amount to the payment.
    pub fn with_asset(mut self, asset: Asset, quantity: u64) -> Self {
        self.asset_balances.push(AssetBalance::new(asset, quantity));
        self
    }

    /// Shorthand for `with_asset(Asset::Lovelace, quantity)`.
    pub fn with_lovelace(self, quantity: u64) -> Self {
        self.with_asset(Asset::Lovelace, quantity)
    }

    /// Attaches a datum (hashed unless [`inline`](Self::inline) is also called).
    pub fn with_datum(mut self, datum: PlutusData) -> Self {
        self.datum = Some(datum);
        self
    }

    /// Marks the datum as inline.
    pub fn inline(mut self) -> Self {
        self.is_inline_datum = true;
        self
    }

    /// Attaches transaction metadata.
    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Total lovelace sent by this payment.
    pub fn lovelace(&self) -> u64 {
        self.asset_balances
            .iter()
            .filter(|b| b.asset == Asset::Lovelace)
            .map(|b| b.quantity)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lovelace_sums_only_base_currency() {
        let payment = PayToAddress::new("addr1qxy", AddressType::Base)
            .with_lovelace(2_000_000)
            .with_asset(Asset::token("abcd", "4d494e"), 500)
            .with_lovelace(1_500_000);

        assert_eq!(payment.lovelace(), 3_500_000);
        assert_eq!(payment.asset_balances.len(), 3);
    }

    #[test]
    fn asset_identifier_concatenates_policy_and_name() {
        assert_eq!(Asset::token("abcd", "4d494e").identifier(), "abcd4d494e");
        assert_eq!(Asset::Lovelace.identifier(), "lovelace");
    }

    #[test]
    fn optional_fields_are_omitted_from_json() {
        let payment = PayToAddress::new("addr1qxy", AddressType::Enterprise).with_lovelace(1);
        let json = serde_json::to_value(&payment).unwrap();

        assert!(json.get("datum").is_none());
        assert!(json.get("metadata").is_none());
        assert_eq!(json["is_inline_datum"], false);
    }

    #[test]
    fn inline_datum_payment() {
        let payment = PayToAddress::new("addr1wxyz", AddressType::Contract)
            .with_lovelace(4_000_000)
            .with_datum(PlutusData::Int { int: 7 })
            .inline();

        assert!(payment.is_inline_datum);
        assert_eq!(payment.datum, Some(PlutusData::Int { int: 7 }));
    }
}
