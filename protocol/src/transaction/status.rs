//! Lifecycle status of a DEX transaction.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a [`DexTransaction`](super::DexTransaction) is in its lifecycle.
///
/// The success path is `Building -> Signing -> Submitting -> Submitted`.
/// `Errored` can be reached from any non-terminal state, but only through a
/// captured provider failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionStatus {
    /// Payments are being attached to the transaction.
    Building,
    /// The transaction is being signed.
    Signing,
    /// The signed transaction is being handed to the network.
    Submitting,
    /// Terminal: the network accepted the transaction.
    Submitted,
    /// Terminal: one of the three steps failed.
    Errored,
}

impl TransactionStatus {
    /// Returns `true` for `Submitted` and `Errored`.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Submitted | Self::Errored)
    }

    /// The next status on the success path, if any.
    pub fn next(&self) -> Option<Self> {
        match self {
            Self::Building => Some(Self::Signing),
            Self::Signing => Some(Self::Submitting),
            Self::Submitting => Some(Self::Submitted),
            Self::Submitted | Self::Errored => None,
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Building => write!(f, "Building"),
            Self::Signing => write!(f, "Signing"),
            Self::Submitting => write!(f, "Submitting"),
            Self::Submitted => write!(f, "Submitted"),
            Self::Errored => write!(f, "Errored"),
        }
    }
}
