//! Datum definitions: the declarative shape of an on-chain datum.
//!
//! A definition is a tree whose leaves name the parameter that fills them.
//! The JSON form is part of the external protocol:
//!
//! ```text
//! { "constructor": 0, "fields": [
//!     { "bytes": "SenderPubKeyHash" },
//!     { "constructor": "Action", "fields": [ { "int": "MinReceive" } ] }
//! ] }
//! ```
//!
//! Field order and fixed constructor tags must never be reordered or
//! renumbered; the on-chain validator matches on structural position.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// DatumParameterKey
// ---------------------------------------------------------------------------

/// Name of a value that fills a slot in a datum definition.
///
/// Serialized by variant name, which is also the name decoders expect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DatumParameterKey {
    SenderPubKeyHash,
    SenderStakingKeyHash,
    ReceiverPubKeyHash,
    ReceiverStakingKeyHash,
    /// Constructor index of the requested order action.
    Action,
    /// Minimum amount the order must receive for the swap to execute.
    MinReceive,
    SwapInAmount,
    SwapInTokenPolicyId,
    SwapInTokenAssetName,
    SwapOutTokenPolicyId,
    SwapOutTokenAssetName,
    BatcherFee,
    DepositFee,
}

impl fmt::Display for DatumParameterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

// ---------------------------------------------------------------------------
// ConstructorTag
// ---------------------------------------------------------------------------

/// Tag of a constructor node.
///
/// Most tags are fixed by the protocol. Some, like the VyFinance order
/// action, are chosen per order and supplied as a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConstructorTag {
    /// Fixed tag value.
    Fixed(u64),
    /// Tag taken from an integer parameter at build time.
    Parameter(DatumParameterKey),
}

// ---------------------------------------------------------------------------
// DatumField
// ---------------------------------------------------------------------------

/// One node of a datum definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DatumField {
    /// Constructor with an ordered list of child fields.
    Constructor {
        /// The constructor tag.
        constructor: ConstructorTag,
        /// Child fields, in wire order.
        fields: Vec<DatumField>,
    },
    /// Integer leaf.
    Int {
        /// Parameter filling this leaf.
        int: DatumParameterKey,
    },
    /// Raw byte-string leaf.
    Bytes {
        /// Parameter filling this leaf.
        bytes: DatumParameterKey,
    },
}

impl DatumField {
    /// Constructor node with a fixed tag.
    pub fn constr(tag: u64, fields: Vec<DatumField>) -> Self {
        Self::Constructor {
            constructor: ConstructorTag::Fixed(tag),
            fields,
        }
    }

    /// Constructor node whose tag is read from `key` at build time.
    pub fn constr_param(key: DatumParameterKey, fields: Vec<DatumField>) -> Self {
        Self::Constructor {
            constructor: ConstructorTag::Parameter(key),
            fields,
        }
    }

    /// Integer leaf.
    pub fn int(key: DatumParameterKey) -> Self {
        Self::Int { int: key }
    }

    /// Byte-string leaf.
    pub fn bytes(key: DatumParameterKey) -> Self {
        Self::Bytes { bytes: key }
    }

    /// Every parameter the definition consumes, in depth-first wire order.
    pub fn parameter_keys(&self) -> Vec<DatumParameterKey> {
        let mut keys = Vec::new();
        self.collect_keys(&mut keys);
        keys
    }

    fn collect_keys(&self, out: &mut Vec<DatumParameterKey>) {
        match self {
            Self::Constructor {
                constructor,
                fields,
            } => {
                if let ConstructorTag::Parameter(key) = constructor {
                    out.push(*key);
                }
                for field in fields {
                    field.collect_keys(out);
                }
            }
            Self::Int { int } => out.push(*int),
            Self::Bytes { bytes } => out.push(*bytes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn leaf_wire_shape() {
        let field = DatumField::bytes(DatumParameterKey::SenderPubKeyHash);
        assert_eq!(
            serde_json::to_value(&field).unwrap(),
            json!({ "bytes": "SenderPubKeyHash" })
        );

        let field = DatumField::int(DatumParameterKey::MinReceive);
        assert_eq!(
            serde_json::to_value(&field).unwrap(),
            json!({ "int": "MinReceive" })
        );
    }

    #[test]
    fn parameter_tag_parses_back() {
        let value = json!({ "constructor": "Action", "fields": [ { "int": "MinReceive" } ] });
        let field: DatumField = serde_json::from_value(value).unwrap();

        assert_eq!(
            field,
            DatumField::constr_param(
                DatumParameterKey::Action,
                vec![DatumField::int(DatumParameterKey::MinReceive)]
            )
        );
    }

    #[test]
    fn parameter_keys_in_wire_order() {
        let field = DatumField::constr(
            0,
            vec![
                DatumField::bytes(DatumParameterKey::SenderPubKeyHash),
                DatumField::constr_param(
                    DatumParameterKey::Action,
                    vec![DatumField::int(DatumParameterKey::MinReceive)],
                ),
            ],
        );

        assert_eq!(
            field.parameter_keys(),
            vec![
                DatumParameterKey::SenderPubKeyHash,
                DatumParameterKey::Action,
                DatumParameterKey::MinReceive,
            ]
        );
    }
}
