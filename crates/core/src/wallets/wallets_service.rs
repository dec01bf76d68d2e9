use dashmap::DashMap;
use log::debug;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::wallets_model::WalletRecord;
use super::wallets_traits::{WalletAnalysisServiceTrait, WalletRepositoryTrait};
use crate::costbasis::{CostBasisEngine, PositionSummary};
use crate::errors::Result;
use crate::ledger::normalize;
use walletlens_chain_data::{ChainFamily, ProviderRegistry};

/// Service running the wallet analysis pipeline.
///
/// Each call is stateless apart from the persisted wallet record. The only
/// suspension point is the provider fetch; merge, recompute and persist run
/// as one committed-or-not unit inside the store.
pub struct WalletAnalysisService {
    repository: Arc<dyn WalletRepositoryTrait>,
    providers: Arc<ProviderRegistry>,
    engine: CostBasisEngine,
    /// Serializes merge+recompute+persist per address. Entries are tiny and
    /// wallets are long-lived, so the map is never pruned.
    address_locks: DashMap<String, Arc<Mutex<()>>>,
}

impl WalletAnalysisService {
    pub fn new(repository: Arc<dyn WalletRepositoryTrait>, providers: Arc<ProviderRegistry>) -> Self {
        Self {
            repository,
            providers,
            engine: CostBasisEngine::new(),
            address_locks: DashMap::new(),
        }
    }

    fn lock_for(&self, address: &str) -> Arc<Mutex<()>> {
        self.address_locks
            .entry(address.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}

#[async_trait::async_trait]
impl WalletAnalysisServiceTrait for WalletAnalysisService {
    async fn analyze(
        &self,
        address: &str,
        chain_family: ChainFamily,
    ) -> Result<PositionSummary> {
        let provider = self.providers.provider_for(chain_family)?;
        debug!(
            "Analyzing wallet {} ({}) via provider {}",
            address,
            chain_family,
            provider.provider_id()
        );

        // Provider failures propagate untouched; retry policy lives with the
        // provider, not here.
        let raw_transfers = provider.fetch_transfers(address).await?;
        let new_entries = normalize(&raw_transfers, address, chain_family)?;

        // Concurrent analyses of one address serialize here, so each merge
        // sees the previous one's entries before recomputing.
        let lock = self.lock_for(address);
        let _guard = lock.lock().await;

        let engine = self.engine;
        let record = self
            .repository
            .upsert_merge_with_summary(
                address,
                chain_family,
                new_entries,
                Box::new(move |ledger| engine.compute(ledger)),
            )
            .await?;

        record.last_summary.ok_or_else(|| {
            crate::Error::Unexpected(format!(
                "Merge for wallet {} committed without a summary",
                address
            ))
        })
    }

    fn get_wallet(&self, address: &str) -> Result<WalletRecord> {
        self.repository.get_by_address(address)
    }

    fn list_wallets(&self) -> Result<Vec<WalletRecord>> {
        self.repository.list()
    }
}
