//! Wallet repository and service traits.
//!
//! These traits define the contract for wallet persistence and analysis
//! without any database-specific types, allowing for different storage
//! implementations.

use async_trait::async_trait;

use super::wallets_model::WalletRecord;
use crate::costbasis::PositionSummary;
use crate::errors::Result;
use crate::ledger::LedgerEntry;
use walletlens_chain_data::ChainFamily;

/// Recompute hook executed inside the store's merge transaction.
///
/// The store owns persistence, not business logic: whoever calls the merge
/// supplies the function that turns the merged ledger into a summary. If the
/// hook fails, the whole merge rolls back and nothing is persisted.
pub type RecomputeFn = Box<dyn FnOnce(&[LedgerEntry]) -> Result<PositionSummary> + Send>;

/// Trait defining the contract for wallet record persistence.
///
/// Merge semantics: the stored ledger becomes the union of the existing
/// entries and `new_entries`, deduplicated by transaction hash with the
/// existing entry winning (an on-chain event is immutable), re-sorted by
/// timestamp then hash. Merging the same entries twice is a no-op.
#[async_trait]
pub trait WalletRepositoryTrait: Send + Sync {
    /// Retrieves a wallet record by address.
    fn get_by_address(&self, address: &str) -> Result<WalletRecord>;

    /// Lists all stored wallet records.
    fn list(&self) -> Result<Vec<WalletRecord>>;

    /// Merges `new_entries` into the wallet's ledger, creating the record if
    /// the address was never seen. A later call with a different chain family
    /// than the stored one fails.
    async fn upsert_merge(
        &self,
        address: &str,
        chain_family: ChainFamily,
        new_entries: Vec<LedgerEntry>,
    ) -> Result<WalletRecord>;

    /// Same merge, then runs `recompute` over the full merged ledger and
    /// persists the returned summary within the same transaction. Any error
    /// aborts the whole unit; no partial wallet mutation survives.
    async fn upsert_merge_with_summary(
        &self,
        address: &str,
        chain_family: ChainFamily,
        new_entries: Vec<LedgerEntry>,
        recompute: RecomputeFn,
    ) -> Result<WalletRecord>;
}

/// Trait defining the contract for the wallet analysis pipeline.
#[async_trait]
pub trait WalletAnalysisServiceTrait: Send + Sync {
    /// Runs the full pipeline for one address: fetch transfers, normalize,
    /// merge into the store, recompute cost basis over the merged ledger,
    /// persist and return the summary.
    async fn analyze(&self, address: &str, chain_family: ChainFamily)
        -> Result<PositionSummary>;

    /// Returns the stored record for an address, if it was ever analyzed.
    fn get_wallet(&self, address: &str) -> Result<WalletRecord>;

    /// Lists all stored wallet records.
    fn list_wallets(&self) -> Result<Vec<WalletRecord>>;
}
