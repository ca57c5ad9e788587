//! # Wallet Provider Contract
//!
//! The lifecycle doesn't build, sign or broadcast anything itself. It
//! delegates each step to a [`WalletProvider`] bound at construction.
//! Providers get the lifecycle's [`ProviderData`] slot and nothing else,
//! so they cannot touch the status or the error record; reporting failure
//! is done by returning `Err`.
//!
//! ```text
//! attach_payments ──► add_payments(data, targets)
//! sign            ──► sign(data)
//! submit          ──► submit(data) ──► tx hash
//! ```
//!
//! Input selection, fee calculation, serialization and network I/O all
//! live behind this trait.

pub mod mock;

use async_trait::async_trait;
use thiserror::Error;

use crate::transaction::{PayToAddress, ProviderData};

pub use mock::MockWalletProvider;

// ---------------------------------------------------------------------------
// ProviderError
// ---------------------------------------------------------------------------

/// Failure reported by a wallet provider.
///
/// Preserved unmodified as the `cause` of the lifecycle's error record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// Free-form failure message.
    #[error("{0}")]
    Message(String),

    /// The wallet cannot cover the requested outputs.
    #[error("insufficient funds: required {required}, available {available}")]
    InsufficientFunds {
        /// Lovelace required.
        required: u64,
        /// Lovelace available.
        available: u64,
    },

    /// The network or node could not be reached.
    #[error("network error: {0}")]
    Network(String),

    /// The user or the node rejected the transaction.
    #[error("rejected: {0}")]
    Rejected(String),
}

impl From<&str> for ProviderError {
    fn from(message: &str) -> Self {
        Self::Message(message.to_string())
    }
}

impl From<String> for ProviderError {
    fn from(message: String) -> Self {
        Self::Message(message)
    }
}

// ---------------------------------------------------------------------------
// WalletProvider
// ---------------------------------------------------------------------------

/// Capability that builds, signs and submits transactions for a wallet.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Adds the payment outputs to the transaction held in `data`.
    async fn add_payments(
        &self,
        data: &mut ProviderData,
        targets: &[PayToAddress],
    ) -> Result<(), ProviderError>;

    /// Signs the transaction held in `data`.
    async fn sign(&self, data: &mut ProviderData) -> Result<(), ProviderError>;

    /// Submits the signed transaction and returns its network id.
    async fn submit(&self, data: &mut ProviderData) -> Result<String, ProviderError>;
}
