//! API data transfer models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use walletlens_core::constants::DISPLAY_DECIMAL_PRECISION;
use walletlens_core::costbasis::PositionSummary;
use walletlens_core::ledger::LedgerEntry;
use walletlens_core::wallets::WalletRecord;

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PositionSummaryDto {
    pub current_balance: Decimal,
    pub total_invested: Decimal,
    pub realized_pnl: Decimal,
    pub unrealized_pnl: Decimal,
}

impl From<PositionSummary> for PositionSummaryDto {
    fn from(s: PositionSummary) -> Self {
        Self {
            current_balance: s.current_balance.round_dp(DISPLAY_DECIMAL_PRECISION),
            total_invested: s.total_invested.round_dp(DISPLAY_DECIMAL_PRECISION),
            realized_pnl: s.realized_pnl.round_dp(DISPLAY_DECIMAL_PRECISION),
            unrealized_pnl: s.unrealized_pnl.round_dp(DISPLAY_DECIMAL_PRECISION),
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntryDto {
    pub tx_hash: String,
    pub timestamp: DateTime<Utc>,
    pub direction: String,
    pub amount: Decimal,
    pub counterparty: String,
}

impl From<LedgerEntry> for LedgerEntryDto {
    fn from(e: LedgerEntry) -> Self {
        Self {
            tx_hash: e.tx_hash,
            timestamp: e.timestamp,
            direction: e.direction.as_str().to_string(),
            amount: e.amount,
            counterparty: e.counterparty,
        }
    }
}

/// Response of a full analysis run: the freshly computed summary plus the
/// merged ledger it was computed over.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct WalletAnalysis {
    pub address: String,
    pub chain_family: String,
    pub summary: PositionSummaryDto,
    pub ledger: Vec<LedgerEntryDto>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct WalletRecordDto {
    pub address: String,
    pub chain_family: String,
    pub ledger: Vec<LedgerEntryDto>,
    pub last_summary: Option<PositionSummaryDto>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<WalletRecord> for WalletRecordDto {
    fn from(r: WalletRecord) -> Self {
        Self {
            address: r.address,
            chain_family: r.chain_family.as_str().to_string(),
            ledger: r.ledger.into_iter().map(LedgerEntryDto::from).collect(),
            last_summary: r.last_summary.map(PositionSummaryDto::from),
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}
