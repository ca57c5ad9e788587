//! # Protocol Configuration & Constants
//!
//! Every fixed string and default the lifecycle depends on lives here.
//! The failure reasons are surfaced to end users and matched on by
//! downstream tooling, so treat them as part of the public contract.

// ---------------------------------------------------------------------------
// Failure Reasons
// ---------------------------------------------------------------------------

/// Reason recorded when the provider fails to attach payments.
pub const BUILD_FAILURE_REASON: &str = "Failed to build transaction.";

/// Reason recorded when the provider fails to sign.
pub const SIGN_FAILURE_REASON: &str = "Failed to sign transaction.";

/// Reason recorded when the provider fails to submit.
pub const SUBMIT_FAILURE_REASON: &str = "Failed to submit transaction.";

// ---------------------------------------------------------------------------
// Datum Definitions
// ---------------------------------------------------------------------------

/// Version of the bundled datum definitions.
///
/// Bump whenever a definition changes shape. External decoders pattern-match
/// on field order and constructor tags, so any change here is breaking.
pub const DEFINITION_VERSION: u16 = 1;

/// Constructor tag wrapping every VyFinance order datum.
pub const VYFINANCE_ORDER_CONSTRUCTOR: u64 = 0;

// ---------------------------------------------------------------------------
// Mock Provider
// ---------------------------------------------------------------------------

/// Length of a transaction id in bytes (hex-encoded it is twice that).
pub const TX_HASH_LENGTH: usize = 32;
