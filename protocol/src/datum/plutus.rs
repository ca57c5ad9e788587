//! Concrete datum values.
//!
//! [`PlutusData`] is what a definition turns into once every parameter is
//! known. Its JSON form mirrors the definition shape with values in place
//! of parameter names; byte strings are hex-encoded.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A concrete, fully-populated datum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PlutusData {
    /// Tagged constructor.
    Constr {
        /// Constructor index.
        constructor: u64,
        /// Fields in wire order.
        fields: Vec<PlutusData>,
    },
    /// Signed integer.
    Int {
        /// The value.
        int: i64,
    },
    /// Raw bytes, hex-encoded on the wire.
    Bytes {
        /// The value.
        #[serde(serialize_with = "to_hex", deserialize_with = "from_hex")]
        bytes: Vec<u8>,
    },
}

impl PlutusData {
    /// Short name of the node kind, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Constr { .. } => "constructor",
            Self::Int { .. } => "int",
            Self::Bytes { .. } => "bytes",
        }
    }
}

fn to_hex<S: Serializer>(bytes: &[u8], s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&hex::encode(bytes))
}

fn from_hex<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<u8>, D::Error> {
    let s = String::deserialize(d)?;
    hex::decode(&s).map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bytes_serialize_as_hex() {
        let data = PlutusData::Bytes {
            bytes: vec![0xde, 0xad, 0xbe, 0xef],
        };
        assert_eq!(
            serde_json::to_value(&data).unwrap(),
            json!({ "bytes": "deadbeef" })
        );
    }

    #[test]
    fn nested_datum_parses() {
        let value = json!({
            "constructor": 0,
            "fields": [
                { "bytes": "00ff" },
                { "constructor": 3, "fields": [ { "int": 1500 } ] }
            ]
        });
        let data: PlutusData = serde_json::from_value(value).unwrap();

        assert_eq!(
            data,
            PlutusData::Constr {
                constructor: 0,
                fields: vec![
                    PlutusData::Bytes {
                        bytes: vec![0x00, 0xff]
                    },
                    PlutusData::Constr {
                        constructor: 3,
                        fields: vec![PlutusData::Int { int: 1500 }],
                    },
                ],
            }
        );
    }

    #[test]
    fn invalid_hex_rejected() {
        let value = json!({ "bytes": "not-hex" });
        assert!(serde_json::from_value::<PlutusData>(value).is_err());
    }
}
