//! Fixture-backed provider for tests and offline operation.

use async_trait::async_trait;
use dashmap::DashMap;

use crate::errors::ChainDataError;
use crate::models::RawTransfer;
use crate::provider::ChainDataProvider;

const PROVIDER_ID: &str = "FIXTURE";

/// In-memory transfer source keyed by address.
///
/// Serves whatever transfers were registered for an address, and an empty
/// history for everything else. Useful as the provider in integration tests
/// and when the server runs without API credentials.
#[derive(Default)]
pub struct FixtureChainProvider {
    transfers: DashMap<String, Vec<RawTransfer>>,
}

impl FixtureChainProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the transfer history served for `address`, replacing any
    /// previously registered history.
    pub fn set_transfers(&self, address: impl Into<String>, transfers: Vec<RawTransfer>) {
        self.transfers.insert(address.into(), transfers);
    }
}

#[async_trait]
impl ChainDataProvider for FixtureChainProvider {
    fn provider_id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn fetch_transfers(&self, address: &str) -> Result<Vec<RawTransfer>, ChainDataError> {
        Ok(self
            .transfers
            .get(address)
            .map(|entry| entry.value().clone())
            .unwrap_or_default())
    }
}
