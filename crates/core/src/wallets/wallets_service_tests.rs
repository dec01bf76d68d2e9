use chrono::{DateTime, TimeZone, Utc};
use rust_decimal_macros::dec;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::errors::{Error, Result};
use crate::ledger::{LedgerEntry, LedgerError};
use crate::wallets::{
    RecomputeFn, WalletAnalysisService, WalletAnalysisServiceTrait, WalletRecord,
    WalletRepositoryTrait,
};
use walletlens_chain_data::{
    ChainDataError, ChainDataProvider, ChainFamily, FixtureChainProvider, ProviderRegistry,
    RawTransfer,
};

const WALLET: &str = "0x1234567890abcdef1234567890abcdef12345678";
const OTHER: &str = "0x9876543210abcdef9876543210abcdef98765432";

fn ts(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0).unwrap()
}

fn transfer(hash: &str, secs: i64, value: &str, from: &str, to: &str) -> RawTransfer {
    RawTransfer {
        hash: Some(hash.to_string()),
        timestamp: Some(ts(secs)),
        value: Some(value.to_string()),
        from: from.to_string(),
        to: to.to_string(),
    }
}

// --- Mock WalletRepository ---
//
// In-memory merge with the same contract as the real store: union by hash
// (existing wins), chain family fixed at creation, recompute failures leave
// the stored state untouched.
#[derive(Default)]
struct MockWalletRepository {
    records: Mutex<HashMap<String, WalletRecord>>,
}

impl MockWalletRepository {
    fn merged(
        &self,
        address: &str,
        chain_family: ChainFamily,
        new_entries: Vec<LedgerEntry>,
    ) -> Result<WalletRecord> {
        let records = self.records.lock().unwrap();
        let mut record = match records.get(address) {
            Some(existing) => {
                if existing.chain_family != chain_family {
                    return Err(Error::ChainFamilyMismatch {
                        address: address.to_string(),
                        stored: existing.chain_family,
                        requested: chain_family,
                    });
                }
                existing.clone()
            }
            None => WalletRecord {
                address: address.to_string(),
                chain_family,
                ledger: Vec::new(),
                last_summary: None,
                created_at: ts(0),
                updated_at: ts(0),
            },
        };

        for entry in new_entries {
            if !record.ledger.iter().any(|e| e.tx_hash == entry.tx_hash) {
                record.ledger.push(entry);
            }
        }
        record.ledger.sort_by(LedgerEntry::ledger_ordering);
        Ok(record)
    }
}

#[async_trait::async_trait]
impl WalletRepositoryTrait for MockWalletRepository {
    fn get_by_address(&self, address: &str) -> Result<WalletRecord> {
        self.records
            .lock()
            .unwrap()
            .get(address)
            .cloned()
            .ok_or_else(|| Error::Repository(format!("Wallet not found: {}", address)))
    }

    fn list(&self) -> Result<Vec<WalletRecord>> {
        Ok(self.records.lock().unwrap().values().cloned().collect())
    }

    async fn upsert_merge(
        &self,
        address: &str,
        chain_family: ChainFamily,
        new_entries: Vec<LedgerEntry>,
    ) -> Result<WalletRecord> {
        let record = self.merged(address, chain_family, new_entries)?;
        self.records
            .lock()
            .unwrap()
            .insert(address.to_string(), record.clone());
        Ok(record)
    }

    async fn upsert_merge_with_summary(
        &self,
        address: &str,
        chain_family: ChainFamily,
        new_entries: Vec<LedgerEntry>,
        recompute: RecomputeFn,
    ) -> Result<WalletRecord> {
        let mut record = self.merged(address, chain_family, new_entries)?;
        // Commit only after the recompute succeeds.
        record.last_summary = Some(recompute(&record.ledger)?);
        self.records
            .lock()
            .unwrap()
            .insert(address.to_string(), record.clone());
        Ok(record)
    }
}

// --- Mock failing provider ---
struct UnavailableProvider;

#[async_trait::async_trait]
impl ChainDataProvider for UnavailableProvider {
    fn provider_id(&self) -> &'static str {
        "UNAVAILABLE"
    }

    async fn fetch_transfers(&self, _address: &str) -> std::result::Result<Vec<RawTransfer>, ChainDataError> {
        Err(ChainDataError::Unavailable {
            provider: "UNAVAILABLE".to_string(),
            message: "connection refused".to_string(),
        })
    }
}

fn service_with_fixture(
    transfers: Vec<RawTransfer>,
) -> (WalletAnalysisService, Arc<MockWalletRepository>) {
    let fixture = Arc::new(FixtureChainProvider::new());
    fixture.set_transfers(WALLET, transfers);
    let repository = Arc::new(MockWalletRepository::default());
    let service = WalletAnalysisService::new(
        repository.clone(),
        Arc::new(ProviderRegistry::fixture(fixture)),
    );
    (service, repository)
}

#[tokio::test]
async fn analyze_runs_the_full_pipeline() {
    let (service, repository) = service_with_fixture(vec![
        transfer("0xa", 100, "10", OTHER, WALLET),
        transfer("0xb", 200, "5", OTHER, WALLET),
        transfer("0xc", 300, "12", WALLET, OTHER),
    ]);

    let summary = service.analyze(WALLET, ChainFamily::Evm).await.unwrap();
    assert_eq!(summary.current_balance, dec!(3));
    assert_eq!(summary.total_invested, dec!(15));
    assert_eq!(summary.realized_pnl, dec!(0));

    let record = repository.get_by_address(WALLET).unwrap();
    assert_eq!(record.ledger.len(), 3);
    assert_eq!(record.last_summary.unwrap(), summary);
}

#[tokio::test]
async fn analyze_twice_is_idempotent() {
    let (service, repository) = service_with_fixture(vec![
        transfer("0xa", 100, "2", OTHER, WALLET),
        transfer("0xb", 200, "1", WALLET, OTHER),
    ]);

    let first = service.analyze(WALLET, ChainFamily::Evm).await.unwrap();
    let second = service.analyze(WALLET, ChainFamily::Evm).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(repository.get_by_address(WALLET).unwrap().ledger.len(), 2);
}

#[tokio::test]
async fn provider_failure_propagates_and_stores_nothing() {
    let repository = Arc::new(MockWalletRepository::default());
    let service = WalletAnalysisService::new(
        repository.clone(),
        Arc::new(ProviderRegistry::new(Some(Arc::new(UnavailableProvider)), None)),
    );

    let result = service.analyze(WALLET, ChainFamily::Evm).await;
    assert!(matches!(
        result,
        Err(Error::ChainData(ChainDataError::Unavailable { .. }))
    ));
    assert!(repository.get_by_address(WALLET).is_err());
}

#[tokio::test]
async fn unsupported_chain_family_is_rejected() {
    let repository = Arc::new(MockWalletRepository::default());
    let service = WalletAnalysisService::new(
        repository,
        Arc::new(ProviderRegistry::new(None, None)),
    );

    assert!(matches!(
        service.analyze(WALLET, ChainFamily::Solana).await,
        Err(Error::ChainData(ChainDataError::UnsupportedChain(
            ChainFamily::Solana
        )))
    ));
}

#[tokio::test]
async fn malformed_transfer_aborts_before_the_store() {
    let (service, repository) = service_with_fixture(vec![transfer(
        "0xa", 100, "not-a-number", OTHER, WALLET,
    )]);

    assert!(matches!(
        service.analyze(WALLET, ChainFamily::Evm).await,
        Err(Error::Ledger(LedgerError::MalformedTransfer(_)))
    ));
    assert!(repository.get_by_address(WALLET).is_err());
}

#[tokio::test]
async fn overdraft_surfaces_and_leaves_no_summary() {
    let (service, repository) = service_with_fixture(vec![
        transfer("0xa", 100, "1", OTHER, WALLET),
        transfer("0xb", 200, "5", WALLET, OTHER),
    ]);

    assert!(matches!(
        service.analyze(WALLET, ChainFamily::Evm).await,
        Err(Error::Calculation(_))
    ));
    // The failed unit must not have committed anything.
    assert!(repository.get_by_address(WALLET).is_err());
}

#[tokio::test]
async fn chain_family_is_fixed_at_creation() {
    let fixture = Arc::new(FixtureChainProvider::new());
    fixture.set_transfers(WALLET, vec![transfer("0xa", 100, "1", OTHER, WALLET)]);

    let repository = Arc::new(MockWalletRepository::default());
    let service = WalletAnalysisService::new(
        repository,
        Arc::new(ProviderRegistry::fixture(fixture)),
    );

    service.analyze(WALLET, ChainFamily::Evm).await.unwrap();
    assert!(matches!(
        service.analyze(WALLET, ChainFamily::Solana).await,
        Err(Error::ChainFamilyMismatch { .. })
    ));
}
