//! The DEX transaction lifecycle.
//!
//! A [`DexTransaction`] is bound to one [`WalletProvider`] and drives one
//! transaction through three steps: attach payments, sign, submit. Each
//! step is delegated to the provider.
//!
//! Two rules shape the API:
//!
//! 1. Operational failures are data. If the provider fails, the lifecycle
//!    records a [`TransactionError`], moves to `Errored`, and the call still
//!    returns `Ok(&mut self)`.
//! 2. Success is silent with respect to status. A successful step only sets
//!    its own field (`is_signed`, `hash`); advancing `Building -> Signing ->
//!    Submitting -> Submitted` is the caller's job via [`transition`].
//!
//! Calling the steps out of order is a [`ContractViolation`], returned as
//! `Err` before the provider is invoked.
//!
//! [`transition`]: DexTransaction::transition

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::error::{ContractViolation, TransactionError};
use super::listener::{self, Listener, ReplayReport};
use super::provider_data::ProviderData;
use super::status::TransactionStatus;
use super::types::PayToAddress;
use crate::config;
use crate::wallet::{ProviderError, WalletProvider};

// ---------------------------------------------------------------------------
// DexTransaction
// ---------------------------------------------------------------------------

/// One in-flight transaction and its observers.
pub struct DexTransaction {
    id: Uuid,
    status: TransactionStatus,
    hash: Option<String>,
    is_signed: bool,
    payments_attached: bool,
    error: Option<TransactionError>,
    provider_data: ProviderData,
    provider: Arc<dyn WalletProvider>,
    listeners: Vec<Listener>,
}

impl DexTransaction {
    /// Creates a lifecycle in `Building`, bound to `provider` for good.
    pub fn new(provider: Arc<dyn WalletProvider>) -> Self {
        let id = Uuid::new_v4();
        debug!(tx_id = %id, "transaction lifecycle created");

        Self {
            id,
            status: TransactionStatus::Building,
            hash: None,
            is_signed: false,
            payments_attached: false,
            error: None,
            provider_data: ProviderData::new(),
            provider,
            listeners: Vec::new(),
        }
    }

    // -- Accessors ----------------------------------------------------------

    /// Lifecycle id, used to correlate log lines.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Current status.
    pub fn status(&self) -> TransactionStatus {
        self.status
    }

    /// Network transaction id, once `submit` succeeded.
    pub fn hash(&self) -> Option<&str> {
        self.hash.as_deref()
    }

    /// `true` once `sign` succeeded.
    pub fn is_signed(&self) -> bool {
        self.is_signed
    }

    /// The failure record, present iff the status is `Errored`.
    pub fn error(&self) -> Option<&TransactionError> {
        self.error.as_ref()
    }

    /// The provider's scratch slot, read-only. Only the bound provider
    /// writes to it, through the step calls.
    ///
    /// ```compile_fail
    /// # use std::sync::Arc;
    /// # use dexkit_protocol::transaction::DexTransaction;
    /// # use dexkit_protocol::wallet::MockWalletProvider;
    /// let mut tx = DexTransaction::new(Arc::new(MockWalletProvider::succeed_all()));
    /// tx.provider_data_mut().insert(42u32);
    /// ```
    pub fn provider_data(&self) -> &ProviderData {
        &self.provider_data
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Serializable snapshot of the observable state.
    pub fn summary(&self) -> TransactionSummary {
        TransactionSummary {
            id: self.id,
            status: self.status,
            hash: self.hash.clone(),
            is_signed: self.is_signed,
            error: self.error.clone(),
        }
    }

    // -- Steps --------------------------------------------------------------

    /// Hands `targets` to the provider to be added as transaction outputs.
    ///
    /// Can be called once per lifecycle. On provider failure the lifecycle
    /// moves to `Errored` with step `Building`.
    pub async fn attach_payments(
        &mut self,
        targets: &[PayToAddress],
    ) -> Result<&mut Self, ContractViolation> {
        self.ensure_active()?;
        if self.payments_attached {
            return Err(ContractViolation::PaymentsAlreadyAttached);
        }
        if self.is_signed {
            return Err(ContractViolation::AlreadySigned);
        }
        self.payments_attached = true;

        debug!(tx_id = %self.id, targets = targets.len(), "attaching payments");
        let provider = Arc::clone(&self.provider);
        match provider.add_payments(&mut self.provider_data, targets).await {
            Ok(()) => info!(tx_id = %self.id, targets = targets.len(), "payments attached"),
            Err(cause) => {
                self.fail(TransactionStatus::Building, config::BUILD_FAILURE_REASON, cause);
            }
        }

        Ok(self)
    }

    /// Asks the provider to sign.
    ///
    /// Signing twice is rejected regardless of status. On provider failure
    /// the lifecycle moves to `Errored` with step `Signing`.
    pub async fn sign(&mut self) -> Result<&mut Self, ContractViolation> {
        if self.is_signed {
            return Err(ContractViolation::AlreadySigned);
        }
        self.ensure_active()?;

        debug!(tx_id = %self.id, "signing transaction");
        let provider = Arc::clone(&self.provider);
        match provider.sign(&mut self.provider_data).await {
            Ok(()) => {
                self.is_signed = true;
                info!(tx_id = %self.id, "transaction signed");
            }
            Err(cause) => {
                self.fail(TransactionStatus::Signing, config::SIGN_FAILURE_REASON, cause);
            }
        }

        Ok(self)
    }

    /// Asks the provider to submit and stores the returned id as `hash`.
    ///
    /// Requires a prior successful `sign` and no existing hash. On provider
    /// failure the lifecycle moves to `Errored` with step `Submitting`.
    pub async fn submit(&mut self) -> Result<&mut Self, ContractViolation> {
        if !self.is_signed {
            return Err(ContractViolation::NotSigned);
        }
        if self.hash.is_some() {
            return Err(ContractViolation::AlreadySubmitted);
        }
        self.ensure_active()?;

        debug!(tx_id = %self.id, "submitting transaction");
        let provider = Arc::clone(&self.provider);
        match provider.submit(&mut self.provider_data).await {
            Ok(hash) => {
                info!(tx_id = %self.id, hash = %hash, "transaction submitted");
                self.hash = Some(hash);
            }
            Err(cause) => {
                self.fail(TransactionStatus::Submitting, config::SUBMIT_FAILURE_REASON, cause);
            }
        }

        Ok(self)
    }

    // -- Status -------------------------------------------------------------

    /// Writes a new status and replays the listeners.
    ///
    /// Allowed writes: `Building -> Signing`, `Signing -> Submitting` once
    /// signed, `Submitting -> Submitted` once a hash is set, and re-writing
    /// the current non-terminal status. `Errored` is only ever entered
    /// through a captured provider failure.
    pub fn transition(
        &mut self,
        to: TransactionStatus,
    ) -> Result<ReplayReport, ContractViolation> {
        use TransactionStatus::*;

        let from = self.status;
        if from.is_terminal() {
            return Err(ContractViolation::Finalized { status: from });
        }

        let allowed = match (from, to) {
            (_, Errored) => false,
            (a, b) if a == b => true,
            (Building, Signing) => true,
            (Signing, Submitting) => self.is_signed,
            (Submitting, Submitted) => self.hash.is_some(),
            _ => false,
        };
        if !allowed {
            return Err(ContractViolation::InvalidTransition { from, to });
        }

        Ok(self.write_status(to))
    }

    /// Moves to the next status on the success path.
    pub fn advance(&mut self) -> Result<ReplayReport, ContractViolation> {
        match self.status.next() {
            Some(next) => self.transition(next),
            None => Err(ContractViolation::Finalized {
                status: self.status,
            }),
        }
    }

    // -- Listeners ----------------------------------------------------------

    /// Registers `callback` for every status write where `predicate` holds.
    ///
    /// Listeners only see writes that happen after registration.
    pub fn on_status<P, F>(&mut self, predicate: P, callback: F) -> &mut Self
    where
        P: Fn(TransactionStatus) -> bool + Send + Sync + 'static,
        F: Fn(&DexTransaction) + Send + Sync + 'static,
    {
        self.listeners
            .push(Listener::new(Box::new(predicate), Box::new(callback)));
        self
    }

    /// Registers `callback` for every status write.
    pub fn on_status_change<F>(&mut self, callback: F) -> &mut Self
    where
        F: Fn(&DexTransaction) + Send + Sync + 'static,
    {
        self.on_status(|_| true, callback)
    }

    /// Fires on writes of `Building`.
    pub fn on_building<F>(&mut self, callback: F) -> &mut Self
    where
        F: Fn(&DexTransaction) + Send + Sync + 'static,
    {
        self.on_status(|s| s == TransactionStatus::Building, callback)
    }

    /// Fires on writes of `Signing`.
    pub fn on_signing<F>(&mut self, callback: F) -> &mut Self
    where
        F: Fn(&DexTransaction) + Send + Sync + 'static,
    {
        self.on_status(|s| s == TransactionStatus::Signing, callback)
    }

    /// Fires on writes of `Submitting`.
    pub fn on_submitting<F>(&mut self, callback: F) -> &mut Self
    where
        F: Fn(&DexTransaction) + Send + Sync + 'static,
    {
        self.on_status(|s| s == TransactionStatus::Submitting, callback)
    }

    /// Fires on writes of `Submitted`.
    pub fn on_submitted<F>(&mut self, callback: F) -> &mut Self
    where
        F: Fn(&DexTransaction) + Send + Sync + 'static,
    {
        self.on_status(|s| s == TransactionStatus::Submitted, callback)
    }

    /// Fires on writes of `Errored`.
    pub fn on_error<F>(&mut self, callback: F) -> &mut Self
    where
        F: Fn(&DexTransaction) + Send + Sync + 'static,
    {
        self.on_status(|s| s == TransactionStatus::Errored, callback)
    }

    /// Fires on writes of either terminal status.
    pub fn on_finally<F>(&mut self, callback: F) -> &mut Self
    where
        F: Fn(&DexTransaction) + Send + Sync + 'static,
    {
        self.on_status(|s| s.is_terminal(), callback)
    }

    // -- Internals ----------------------------------------------------------

    fn ensure_active(&self) -> Result<(), ContractViolation> {
        if self.status.is_terminal() {
            Err(ContractViolation::Finalized {
                status: self.status,
            })
        } else {
            Ok(())
        }
    }

    // The error record is written before the status so that `Errored`
    // listeners always observe it.
    fn fail(&mut self, step: TransactionStatus, reason: &'static str, cause: ProviderError) {
        warn!(tx_id = %self.id, step = %step, cause = %cause, "{}", reason);
        self.error = Some(TransactionError {
            step,
            reason,
            cause,
        });
        self.write_status(TransactionStatus::Errored);
    }

    fn write_status(&mut self, status: TransactionStatus) -> ReplayReport {
        debug!(tx_id = %self.id, from = %self.status, to = %status, "status change");
        self.status = status;
        listener::replay(self, &self.listeners)
    }
}

impl fmt::Debug for DexTransaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DexTransaction")
            .field("id", &self.id)
            .field("status", &self.status)
            .field("hash", &self.hash)
            .field("is_signed", &self.is_signed)
            .field("error", &self.error)
            .field("provider_data", &self.provider_data)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// TransactionSummary
// ---------------------------------------------------------------------------

/// Point-in-time view of a lifecycle, for logs and API responses.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionSummary {
    /// Lifecycle id.
    pub id: Uuid,
    /// Status at snapshot time.
    pub status: TransactionStatus,
    /// Network id, if submitted.
    pub hash: Option<String>,
    /// Whether signing succeeded.
    pub is_signed: bool,
    /// Failure record, if errored.
    pub error: Option<TransactionError>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
