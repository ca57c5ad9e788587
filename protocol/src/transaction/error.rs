//! Error types for the transaction lifecycle.
//!
//! Two families, kept deliberately apart:
//!
//! - [`ContractViolation`] — the caller used the lifecycle out of order.
//!   Returned as `Err` before the provider is ever touched.
//! - [`TransactionError`] — the provider failed one of the three steps.
//!   Never returned as `Err`; recorded on the lifecycle instead.

use serde::Serialize;
use thiserror::Error;

use super::status::TransactionStatus;
use crate::wallet::ProviderError;

// ---------------------------------------------------------------------------
// ContractViolation
// ---------------------------------------------------------------------------

/// Caller-side misuse of a [`DexTransaction`](super::DexTransaction).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContractViolation {
    /// `sign()` was called on a transaction that is already signed.
    #[error("transaction was already signed")]
    AlreadySigned,

    /// `submit()` was called before a successful `sign()`.
    #[error("must sign transaction before submitting")]
    NotSigned,

    /// `submit()` was called on a transaction that already has a hash.
    #[error("transaction was already submitted")]
    AlreadySubmitted,

    /// `attach_payments()` was called a second time on the same lifecycle.
    #[error("payments were already attached to this transaction")]
    PaymentsAlreadyAttached,

    /// The lifecycle already reached a terminal status.
    #[error("transaction is finalized with status {status}")]
    Finalized {
        /// The terminal status.
        status: TransactionStatus,
    },

    /// An external status write that the state machine does not allow.
    #[error("invalid status transition: {from} -> {to}")]
    InvalidTransition {
        /// Status at the time of the call.
        from: TransactionStatus,
        /// Requested status.
        to: TransactionStatus,
    },
}

// ---------------------------------------------------------------------------
// TransactionError
// ---------------------------------------------------------------------------

/// Structured record of an operational failure.
///
/// `step` is the status the lifecycle was working towards when the provider
/// failed, `reason` is one of the fixed messages in [`crate::config`], and
/// `cause` is the provider's error as it was returned.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionError {
    /// The step that failed: `Building`, `Signing` or `Submitting`.
    pub step: TransactionStatus,
    /// Fixed, human-readable reason for the step.
    pub reason: &'static str,
    /// Raw provider failure.
    #[serde(serialize_with = "serialize_cause")]
    pub cause: ProviderError,
}

impl std::fmt::Display for TransactionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.reason, self.cause)
    }
}

fn serialize_cause<S: serde::Serializer>(cause: &ProviderError, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(cause)
}
