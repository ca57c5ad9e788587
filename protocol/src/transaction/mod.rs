//! # Transaction Module
//!
//! The lifecycle of a single DEX transaction: attach payments, sign,
//! submit, with every step delegated to a wallet provider and every
//! status write broadcast to registered listeners.
//!
//! ## Architecture
//!
//! ```text
//! status.rs        — TransactionStatus and the success-path ordering
//! lifecycle.rs     — DexTransaction: the three steps, transitions, observers
//! listener.rs      — Listener registration and fault-isolated replay
//! error.rs         — ContractViolation (misuse) and TransactionError (provider failure)
//! types.rs         — PayToAddress and asset value types
//! provider_data.rs — Opaque per-transaction slot owned by the provider
//! ```
//!
//! ## Lifecycle
//!
//! ```text
//!  Building ──► Signing ──► Submitting ──► Submitted
//!     │            │            │
//!     └────────────┴────────────┴──────► Errored
//! ```
//!
//! 1. **Build** — [`DexTransaction::attach_payments`] hands the outputs to
//!    the provider.
//! 2. **Sign** — [`DexTransaction::sign`] marks the transaction signed.
//! 3. **Submit** — [`DexTransaction::submit`] stores the network id.
//!
//! The steps only write status on failure. Callers move along the success
//! path with [`DexTransaction::transition`] (or `advance`), which is also
//! what triggers `on_signing`, `on_submitting` and `on_submitted`.
//!
//! ## Design Decisions
//!
//! - Steps take `&mut self`, so two steps can never run concurrently on
//!   the same lifecycle. Sequential reuse is blocked by the guards: one
//!   `attach_payments`, one `sign`, one `submit`.
//! - A single provider failure is terminal. Retrying means a new lifecycle.
//! - A panicking listener is logged and skipped; the others still run.

pub mod error;
pub mod lifecycle;
pub mod listener;
pub mod provider_data;
pub mod status;
pub mod types;

pub use error::{ContractViolation, TransactionError};
pub use lifecycle::{DexTransaction, TransactionSummary};
pub use listener::{ReplayReport, StatusCallback, StatusPredicate};
pub use provider_data::ProviderData;
pub use status::TransactionStatus;
pub use types::{AddressType, Asset, AssetBalance, PayToAddress};
