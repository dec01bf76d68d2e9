//! Wallet record domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::costbasis::PositionSummary;
use crate::ledger::LedgerEntry;
use walletlens_chain_data::ChainFamily;

/// Persisted analysis state for one wallet address.
///
/// Created on the first analysis request for an address and mutated on every
/// later one via merge-then-recompute. The record is the sole carrier of
/// history between requests; the core never deletes it (retention is an
/// operational concern). The chain family is fixed at creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletRecord {
    pub address: String,
    pub chain_family: ChainFamily,
    /// Ordered by timestamp then hash, deduplicated by hash.
    pub ledger: Vec<LedgerEntry>,
    /// Summary from the most recent successful recompute, if any.
    pub last_summary: Option<PositionSummary>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
