use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use log::debug;
use std::sync::Arc;

use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::{ledger_entries, wallets};

use super::wallets_model::{LedgerEntryDB, WalletDB};
use walletlens_core::errors::{Error, Result};
use walletlens_core::ledger::LedgerEntry;
use walletlens_core::wallets::{RecomputeFn, WalletRecord, WalletRepositoryTrait};
use walletlens_core::ChainFamily;

/// Repository for wallet records and their ledgers.
///
/// Reads go through the pool; every mutation goes through the single-writer
/// actor, so one merge runs at a time and each runs inside an immediate
/// transaction. That transaction is the committed-or-not unit the analysis
/// pipeline relies on: merge, recompute and summary persist stand or fall
/// together.
pub struct WalletRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl WalletRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }

    async fn merge(
        &self,
        address: &str,
        chain_family: ChainFamily,
        new_entries: Vec<LedgerEntry>,
        recompute: Option<RecomputeFn>,
    ) -> Result<WalletRecord> {
        let address = address.to_string();
        self.writer
            .exec(move |conn| merge_job(conn, &address, chain_family, new_entries, recompute))
            .await
    }
}

#[async_trait]
impl WalletRepositoryTrait for WalletRepository {
    fn get_by_address(&self, address: &str) -> Result<WalletRecord> {
        let mut conn = get_connection(&self.pool)?;

        let wallet = wallets::table
            .find(address)
            .select(WalletDB::as_select())
            .first::<WalletDB>(&mut conn)
            .into_core()?;
        let ledger = load_ledger(&mut conn, address)?;

        hydrate(wallet, ledger)
    }

    fn list(&self) -> Result<Vec<WalletRecord>> {
        let mut conn = get_connection(&self.pool)?;

        let rows = wallets::table
            .select(WalletDB::as_select())
            .order(wallets::address.asc())
            .load::<WalletDB>(&mut conn)
            .into_core()?;

        rows.into_iter()
            .map(|wallet| {
                let ledger = load_ledger(&mut conn, &wallet.address)?;
                hydrate(wallet, ledger)
            })
            .collect()
    }

    async fn upsert_merge(
        &self,
        address: &str,
        chain_family: ChainFamily,
        new_entries: Vec<LedgerEntry>,
    ) -> Result<WalletRecord> {
        self.merge(address, chain_family, new_entries, None).await
    }

    async fn upsert_merge_with_summary(
        &self,
        address: &str,
        chain_family: ChainFamily,
        new_entries: Vec<LedgerEntry>,
        recompute: RecomputeFn,
    ) -> Result<WalletRecord> {
        self.merge(address, chain_family, new_entries, Some(recompute))
            .await
    }
}

/// The merge unit, executed on the writer's connection inside an immediate
/// transaction. Any error here rolls back everything, including the wallet
/// row created for a first-seen address.
fn merge_job(
    conn: &mut SqliteConnection,
    address: &str,
    chain_family: ChainFamily,
    new_entries: Vec<LedgerEntry>,
    recompute: Option<RecomputeFn>,
) -> Result<WalletRecord> {
    let existing = wallets::table
        .find(address)
        .select(WalletDB::as_select())
        .first::<WalletDB>(conn)
        .optional()
        .into_core()?;

    let mut wallet = match existing {
        Some(wallet) => {
            let stored = wallet.parsed_chain_family()?;
            if stored != chain_family {
                return Err(Error::ChainFamilyMismatch {
                    address: address.to_string(),
                    stored,
                    requested: chain_family,
                });
            }
            wallet
        }
        None => {
            let wallet = WalletDB::new(address, chain_family);
            diesel::insert_into(wallets::table)
                .values(&wallet)
                .execute(conn)
                .into_core()?;
            wallet
        }
    };

    // Dedup by (wallet, hash): an already-stored entry mirrors an immutable
    // on-chain event, so the stored version wins and re-ingestion is a no-op.
    if !new_entries.is_empty() {
        let rows: Vec<LedgerEntryDB> = new_entries
            .iter()
            .map(|entry| LedgerEntryDB::from_domain(address, entry))
            .collect();
        let inserted = diesel::insert_or_ignore_into(ledger_entries::table)
            .values(&rows)
            .execute(conn)
            .into_core()?;
        debug!(
            "Merged {} new of {} submitted entries for wallet {}",
            inserted,
            rows.len(),
            address
        );
    }

    let ledger = load_ledger(conn, address)?;

    if let Some(recompute) = recompute {
        let summary = recompute(&ledger)?;
        wallet.set_summary(&summary);
    }

    wallet.updated_at = Utc::now().naive_utc();
    diesel::update(wallets::table.find(address))
        .set(&wallet)
        .execute(conn)
        .into_core()?;

    hydrate(wallet, ledger)
}

fn load_ledger(conn: &mut SqliteConnection, address: &str) -> Result<Vec<LedgerEntry>> {
    let rows = ledger_entries::table
        .filter(ledger_entries::wallet_address.eq(address))
        .select(LedgerEntryDB::as_select())
        .order((
            ledger_entries::timestamp.asc(),
            ledger_entries::tx_hash.asc(),
        ))
        .load::<LedgerEntryDB>(conn)
        .into_core()?;

    rows.into_iter().map(LedgerEntry::try_from).collect()
}

fn hydrate(wallet: WalletDB, ledger: Vec<LedgerEntry>) -> Result<WalletRecord> {
    let chain_family = wallet.parsed_chain_family()?;
    let last_summary = wallet.parsed_summary()?;
    Ok(WalletRecord {
        address: wallet.address,
        chain_family,
        ledger,
        last_summary,
        created_at: wallet.created_at.and_utc(),
        updated_at: wallet.updated_at.and_utc(),
    })
}
