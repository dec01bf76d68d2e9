//! Canonical ledger domain models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Direction of a transfer relative to the analyzed wallet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransferDirection {
    Inbound,
    Outbound,
}

impl TransferDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransferDirection::Inbound => "INBOUND",
            TransferDirection::Outbound => "OUTBOUND",
        }
    }
}

impl fmt::Display for TransferDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransferDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "INBOUND" => Ok(TransferDirection::Inbound),
            "OUTBOUND" => Ok(TransferDirection::Outbound),
            other => Err(format!("Unknown transfer direction: {}", other)),
        }
    }
}

/// One canonical transfer in a wallet's ledger.
///
/// The transaction hash is the sole deduplication key: the same hash must
/// never produce two entries or count its value twice. A stored entry is
/// immutable, since it mirrors an immutable on-chain event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntry {
    pub tx_hash: String,
    pub timestamp: DateTime<Utc>,
    pub direction: TransferDirection,
    /// Transferred value in native token units. Never negative.
    pub amount: Decimal,
    /// Address on the other side of the transfer.
    pub counterparty: String,
}

impl LedgerEntry {
    /// Canonical ledger ordering: timestamp ascending, hash as the
    /// deterministic tie-breaker.
    pub fn ledger_ordering(a: &LedgerEntry, b: &LedgerEntry) -> Ordering {
        a.timestamp
            .cmp(&b.timestamp)
            .then_with(|| a.tx_hash.cmp(&b.tx_hash))
    }
}
