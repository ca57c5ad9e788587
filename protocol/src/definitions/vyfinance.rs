//! VyFinance datum definitions.
//!
//! Order datum layout:
//!
//! ```text
//! Constr 0
//!   [0] bytes  SenderPubKeyHash
//!   [1] Constr <Action>
//!         [0] int MinReceive
//! ```
//!
//! The action constructor index selects the order type and is supplied
//! with the other parameters.

use crate::config::VYFINANCE_ORDER_CONSTRUCTOR;
use crate::datum::{DatumField, DatumParameterKey};

/// The VyFinance swap order datum.
pub fn order() -> DatumField {
    DatumField::constr(
        VYFINANCE_ORDER_CONSTRUCTOR,
        vec![
            DatumField::bytes(DatumParameterKey::SenderPubKeyHash),
            DatumField::constr_param(
                DatumParameterKey::Action,
                vec![DatumField::int(DatumParameterKey::MinReceive)],
            ),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn order_wire_shape_is_exact() {
        let expected = json!({
            "constructor": 0,
            "fields": [
                { "bytes": "SenderPubKeyHash" },
                {
                    "constructor": "Action",
                    "fields": [ { "int": "MinReceive" } ]
                }
            ]
        });

        assert_eq!(serde_json::to_value(order()).unwrap(), expected);
    }

    #[test]
    fn order_parses_from_wire_shape() {
        let text = r#"{"constructor":0,"fields":[{"bytes":"SenderPubKeyHash"},{"constructor":"Action","fields":[{"int":"MinReceive"}]}]}"#;
        let parsed: DatumField = serde_json::from_str(text).unwrap();
        assert_eq!(parsed, order());
    }
}
