//! # Bundled DEX Definitions
//!
//! Datum definitions for the exchanges this crate knows how to talk to.
//! Each exchange gets its own file; lookups go through [`definition`].

pub mod vyfinance;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::datum::DatumField;

/// Supported exchanges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dex {
    /// VyFinance order-book style batcher.
    VyFinance,
}

impl fmt::Display for Dex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::VyFinance => write!(f, "VyFinance"),
        }
    }
}

/// Which datum of an exchange to look up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DefinitionKind {
    /// Datum attached to a swap order sent to the order contract.
    Order,
}

/// Returns the definition for `dex`/`kind`, or `None` if the exchange
/// doesn't use that datum.
pub fn definition(dex: Dex, kind: DefinitionKind) -> Option<DatumField> {
    match (dex, kind) {
        (Dex::VyFinance, DefinitionKind::Order) => Some(vyfinance::order()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_returns_vyfinance_order() {
        assert_eq!(
            definition(Dex::VyFinance, DefinitionKind::Order),
            Some(vyfinance::order())
        );
    }
}
