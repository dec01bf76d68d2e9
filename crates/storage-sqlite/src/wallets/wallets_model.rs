//! Database models for wallets and ledger entries.

use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

use walletlens_core::costbasis::PositionSummary;
use walletlens_core::errors::{DatabaseError, Error, Result};
use walletlens_core::ledger::{LedgerEntry, TransferDirection};
use walletlens_core::ChainFamily;

/// Database model for wallet records. Decimal summary values are stored as
/// TEXT to keep their full precision; all four are set together by a
/// successful recompute and stay NULL until the first one.
#[derive(Queryable, Identifiable, Insertable, AsChangeset, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schema::wallets)]
#[diesel(primary_key(address))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct WalletDB {
    pub address: String,
    pub chain_family: String,
    pub current_balance: Option<String>,
    pub total_invested: Option<String>,
    pub realized_pnl: Option<String>,
    pub unrealized_pnl: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl WalletDB {
    pub fn new(address: &str, chain_family: ChainFamily) -> Self {
        let now = Utc::now().naive_utc();
        Self {
            address: address.to_string(),
            chain_family: chain_family.as_str().to_string(),
            current_balance: None,
            total_invested: None,
            realized_pnl: None,
            unrealized_pnl: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn parsed_chain_family(&self) -> Result<ChainFamily> {
        ChainFamily::from_str(&self.chain_family)
            .map_err(|e| Error::Database(DatabaseError::Internal(e)))
    }

    pub fn set_summary(&mut self, summary: &PositionSummary) {
        self.current_balance = Some(summary.current_balance.to_string());
        self.total_invested = Some(summary.total_invested.to_string());
        self.realized_pnl = Some(summary.realized_pnl.to_string());
        self.unrealized_pnl = Some(summary.unrealized_pnl.to_string());
    }

    /// Hydrates the stored summary; all four columns are written together,
    /// so a partially populated row is data corruption.
    pub fn parsed_summary(&self) -> Result<Option<PositionSummary>> {
        match (
            &self.current_balance,
            &self.total_invested,
            &self.realized_pnl,
            &self.unrealized_pnl,
        ) {
            (None, None, None, None) => Ok(None),
            (Some(balance), Some(invested), Some(realized), Some(unrealized)) => {
                Ok(Some(PositionSummary {
                    current_balance: parse_stored_decimal(balance)?,
                    total_invested: parse_stored_decimal(invested)?,
                    realized_pnl: parse_stored_decimal(realized)?,
                    unrealized_pnl: parse_stored_decimal(unrealized)?,
                }))
            }
            _ => Err(Error::Database(DatabaseError::Internal(format!(
                "Wallet {} has a partially populated summary",
                self.address
            )))),
        }
    }
}

/// Database model for ledger entries, keyed by (wallet, transaction hash).
#[derive(Queryable, Identifiable, Insertable, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schema::ledger_entries)]
#[diesel(primary_key(wallet_address, tx_hash))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct LedgerEntryDB {
    pub wallet_address: String,
    pub tx_hash: String,
    pub timestamp: NaiveDateTime,
    pub direction: String,
    pub amount: String,
    pub counterparty: String,
    pub created_at: NaiveDateTime,
}

impl LedgerEntryDB {
    pub fn from_domain(wallet_address: &str, entry: &LedgerEntry) -> Self {
        Self {
            wallet_address: wallet_address.to_string(),
            tx_hash: entry.tx_hash.clone(),
            timestamp: entry.timestamp.naive_utc(),
            direction: entry.direction.as_str().to_string(),
            amount: entry.amount.to_string(),
            counterparty: entry.counterparty.clone(),
            created_at: Utc::now().naive_utc(),
        }
    }
}

impl TryFrom<LedgerEntryDB> for LedgerEntry {
    type Error = Error;

    fn try_from(db: LedgerEntryDB) -> Result<LedgerEntry> {
        Ok(LedgerEntry {
            tx_hash: db.tx_hash,
            timestamp: db.timestamp.and_utc(),
            direction: TransferDirection::from_str(&db.direction)
                .map_err(|e| Error::Database(DatabaseError::Internal(e)))?,
            amount: parse_stored_decimal(&db.amount)?,
            counterparty: db.counterparty,
        })
    }
}

fn parse_stored_decimal(value: &str) -> Result<Decimal> {
    Decimal::from_str(value).map_err(|e| {
        Error::Database(DatabaseError::Internal(format!(
            "Stored decimal '{}' failed to parse: {}",
            value, e
        )))
    })
}
