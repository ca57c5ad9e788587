//! Scripted in-memory wallet provider.
//!
//! Useful for tests and dry runs: each step either succeeds or returns a
//! preconfigured error, and every call is recorded so tests can assert on
//! exactly what the lifecycle delegated.

use async_trait::async_trait;
use parking_lot::Mutex;
use sha2::{Digest, Sha256};
use tracing::debug;

use super::{ProviderError, WalletProvider};
use crate::transaction::{PayToAddress, ProviderData};

/// The in-progress transaction the mock keeps in [`ProviderData`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MockDraft {
    /// Every payment added so far, in order.
    pub outputs: Vec<PayToAddress>,
    /// Set once `sign` succeeded.
    pub signed: bool,
}

/// A call the mock received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    /// `add_payments` with this many targets.
    AddPayments(usize),
    /// `sign`.
    Sign,
    /// `submit`.
    Submit,
}

/// Provider whose outcome per step is fixed up front.
#[derive(Debug, Default)]
pub struct MockWalletProvider {
    add_payments_error: Option<ProviderError>,
    sign_error: Option<ProviderError>,
    submit_error: Option<ProviderError>,
    tx_hash: Option<String>,
    calls: Mutex<Vec<MockCall>>,
}

impl MockWalletProvider {
    /// A provider where every step succeeds.
    pub fn succeed_all() -> Self {
        Self::default()
    }

    /// Fails `add_payments` with `error`.
    pub fn fail_building(mut self, error: impl Into<ProviderError>) -> Self {
        self.add_payments_error = Some(error.into());
        self
    }

    /// Fails `sign` with `error`.
    pub fn fail_signing(mut self, error: impl Into<ProviderError>) -> Self {
        self.sign_error = Some(error.into());
        self
    }

    /// Fails `submit` with `error`.
    pub fn fail_submitting(mut self, error: impl Into<ProviderError>) -> Self {
        self.submit_error = Some(error.into());
        self
    }

    /// Returns `hash` from `submit` instead of deriving one.
    pub fn with_tx_hash(mut self, hash: impl Into<String>) -> Self {
        self.tx_hash = Some(hash.into());
        self
    }

    /// Calls received so far, in order.
    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().clone()
    }

    fn record(&self, call: MockCall) {
        self.calls.lock().push(call);
    }
}

#[async_trait]
impl WalletProvider for MockWalletProvider {
    async fn add_payments(
        &self,
        data: &mut ProviderData,
        targets: &[PayToAddress],
    ) -> Result<(), ProviderError> {
        self.record(MockCall::AddPayments(targets.len()));
        if let Some(error) = &self.add_payments_error {
            return Err(error.clone());
        }

        if data.is_empty() {
            data.insert(MockDraft::default());
        }
        let draft = data
            .get_mut::<MockDraft>()
            .ok_or_else(|| ProviderError::from("provider data holds a foreign draft"))?;
        draft.outputs.extend_from_slice(targets);

        debug!(outputs = draft.outputs.len(), "mock draft updated");
        Ok(())
    }

    async fn sign(&self, data: &mut ProviderData) -> Result<(), ProviderError> {
        self.record(MockCall::Sign);
        if let Some(error) = &self.sign_error {
            return Err(error.clone());
        }

        let draft = data
            .get_mut::<MockDraft>()
            .ok_or_else(|| ProviderError::from("no transaction to sign"))?;
        draft.signed = true;
        Ok(())
    }

    async fn submit(&self, data: &mut ProviderData) -> Result<String, ProviderError> {
        self.record(MockCall::Submit);
        if let Some(error) = &self.submit_error {
            return Err(error.clone());
        }

        let draft = data
            .get::<MockDraft>()
            .ok_or_else(|| ProviderError::from("no transaction to submit"))?;
        if !draft.signed {
            return Err(ProviderError::Rejected("transaction is not signed".into()));
        }

        match &self.tx_hash {
            Some(hash) => Ok(hash.clone()),
            None => derive_tx_hash(&draft.outputs),
        }
    }
}

/// Hex SHA-256 over the JSON encoding of the outputs.
fn derive_tx_hash(outputs: &[PayToAddress]) -> Result<String, ProviderError> {
    let body = serde_json::to_vec(outputs)
        .map_err(|e| ProviderError::Message(format!("failed to encode draft: {}", e)))?;
    Ok(hex::encode(Sha256::digest(&body)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TX_HASH_LENGTH;
    use crate::transaction::AddressType;

    fn payment() -> PayToAddress {
        PayToAddress::new("addr_test1qz", AddressType::Base).with_lovelace(5_000_000)
    }

    #[tokio::test]
    async fn full_flow_derives_hash() {
        let provider = MockWalletProvider::succeed_all();
        let mut data = ProviderData::new();

        provider.add_payments(&mut data, &[payment()]).await.unwrap();
        provider.sign(&mut data).await.unwrap();
        let hash = provider.submit(&mut data).await.unwrap();

        assert_eq!(hash.len(), TX_HASH_LENGTH * 2);
        assert_eq!(
            provider.calls(),
            vec![MockCall::AddPayments(1), MockCall::Sign, MockCall::Submit]
        );
        assert!(data.get::<MockDraft>().unwrap().signed);
    }

    #[test]
    fn derived_hash_is_deterministic() {
        let a = derive_tx_hash(&[payment()]).unwrap();
        let b = derive_tx_hash(&[payment()]).unwrap();
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn scripted_failure_is_returned_verbatim() {
        let provider = MockWalletProvider::succeed_all().fail_signing("user declined");
        let mut data = ProviderData::new();

        provider.add_payments(&mut data, &[payment()]).await.unwrap();
        let err = provider.sign(&mut data).await.unwrap_err();

        assert_eq!(err, ProviderError::Message("user declined".into()));
        assert!(!data.get::<MockDraft>().unwrap().signed);
    }

    #[tokio::test]
    async fn submit_without_signature_is_rejected() {
        let provider = MockWalletProvider::succeed_all();
        let mut data = ProviderData::new();

        provider.add_payments(&mut data, &[payment()]).await.unwrap();
        let err = provider.submit(&mut data).await.unwrap_err();

        assert!(matches!(err, ProviderError::Rejected(_)));
    }

    #[tokio::test]
    async fn foreign_slot_contents_are_not_overwritten() {
        let provider = MockWalletProvider::succeed_all();
        let mut data = ProviderData::new();
        data.insert(42u32);

        let err = provider.add_payments(&mut data, &[payment()]).await.unwrap_err();

        assert_eq!(err, ProviderError::from("provider data holds a foreign draft"));
        assert_eq!(data.get::<u32>(), Some(&42));
    }

    #[tokio::test]
    async fn sign_without_draft_fails() {
        let provider = MockWalletProvider::succeed_all();
        let mut data = ProviderData::new();

        assert!(provider.sign(&mut data).await.is_err());
    }
}
