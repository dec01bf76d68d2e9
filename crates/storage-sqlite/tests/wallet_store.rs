use chrono::{DateTime, TimeZone, Utc};
use rust_decimal_macros::dec;
use std::sync::Arc;
use tempfile::TempDir;

use walletlens_core::costbasis::CostBasisEngine;
use walletlens_core::errors::{DatabaseError, Error};
use walletlens_core::ledger::{LedgerEntry, TransferDirection};
use walletlens_core::wallets::WalletRepositoryTrait;
use walletlens_core::ChainFamily;
use walletlens_storage_sqlite::db::{self, write_actor};
use walletlens_storage_sqlite::wallets::WalletRepository;

const WALLET: &str = "0x1234567890abcdef1234567890abcdef12345678";

fn ts(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0).unwrap()
}

fn entry(hash: &str, secs: i64, direction: TransferDirection, amount: &str) -> LedgerEntry {
    LedgerEntry {
        tx_hash: hash.to_string(),
        timestamp: ts(secs),
        direction,
        amount: amount.parse().unwrap(),
        counterparty: "0xcafe".to_string(),
    }
}

fn inbound(hash: &str, secs: i64, amount: &str) -> LedgerEntry {
    entry(hash, secs, TransferDirection::Inbound, amount)
}

fn outbound(hash: &str, secs: i64, amount: &str) -> LedgerEntry {
    entry(hash, secs, TransferDirection::Outbound, amount)
}

fn setup() -> (Arc<WalletRepository>, TempDir) {
    let tmp = tempfile::tempdir().unwrap();
    let db_path = tmp.path().join("wallets.db");
    let pool = db::create_pool(db_path.to_str().unwrap()).unwrap();
    db::run_migrations(&pool).unwrap();
    let writer = write_actor::spawn_writer((*pool).clone());
    (Arc::new(WalletRepository::new(pool, writer)), tmp)
}

#[tokio::test]
async fn first_merge_creates_the_record() {
    let (repo, _tmp) = setup();

    let record = repo
        .upsert_merge(WALLET, ChainFamily::Evm, vec![inbound("0xa", 100, "1.5")])
        .await
        .unwrap();

    assert_eq!(record.address, WALLET);
    assert_eq!(record.chain_family, ChainFamily::Evm);
    assert_eq!(record.ledger.len(), 1);
    assert!(record.last_summary.is_none());

    let fetched = repo.get_by_address(WALLET).unwrap();
    assert_eq!(fetched.ledger, record.ledger);
}

#[tokio::test]
async fn unknown_address_reads_as_not_found() {
    let (repo, _tmp) = setup();
    assert!(matches!(
        repo.get_by_address(WALLET),
        Err(Error::Database(DatabaseError::NotFound(_)))
    ));
}

#[tokio::test]
async fn merging_the_same_entries_twice_changes_nothing() {
    let (repo, _tmp) = setup();
    let entries = vec![inbound("0xa", 100, "1"), outbound("0xb", 200, "0.25")];

    let first = repo
        .upsert_merge(WALLET, ChainFamily::Evm, entries.clone())
        .await
        .unwrap();
    let second = repo
        .upsert_merge(WALLET, ChainFamily::Evm, entries)
        .await
        .unwrap();

    assert_eq!(first.ledger, second.ledger);
    assert_eq!(second.ledger.len(), 2);
}

#[tokio::test]
async fn existing_entry_wins_on_hash_collision() {
    let (repo, _tmp) = setup();

    repo.upsert_merge(WALLET, ChainFamily::Evm, vec![inbound("0xa", 100, "1")])
        .await
        .unwrap();
    // Same hash, conflicting fields: the stored on-chain event is immutable.
    let record = repo
        .upsert_merge(WALLET, ChainFamily::Evm, vec![inbound("0xa", 999, "7")])
        .await
        .unwrap();

    assert_eq!(record.ledger.len(), 1);
    assert_eq!(record.ledger[0].timestamp, ts(100));
    assert_eq!(record.ledger[0].amount, dec!(1));
}

#[tokio::test]
async fn reingesting_a_seen_hash_never_moves_the_summary() {
    let (repo, _tmp) = setup();
    let engine = CostBasisEngine::new();

    let first = repo
        .upsert_merge_with_summary(
            WALLET,
            ChainFamily::Evm,
            vec![inbound("0xa", 100, "2")],
            Box::new(move |ledger| engine.compute(ledger)),
        )
        .await
        .unwrap();
    let second = repo
        .upsert_merge_with_summary(
            WALLET,
            ChainFamily::Evm,
            vec![inbound("0xa", 100, "2")],
            Box::new(move |ledger| engine.compute(ledger)),
        )
        .await
        .unwrap();

    let first_summary = first.last_summary.unwrap();
    let second_summary = second.last_summary.unwrap();
    assert_eq!(first_summary.current_balance, dec!(2));
    assert_eq!(first_summary, second_summary);
}

#[tokio::test]
async fn chain_family_is_immutable_after_creation() {
    let (repo, _tmp) = setup();

    repo.upsert_merge(WALLET, ChainFamily::Evm, vec![])
        .await
        .unwrap();
    let result = repo.upsert_merge(WALLET, ChainFamily::Solana, vec![]).await;

    match result {
        Err(Error::ChainFamilyMismatch {
            address,
            stored,
            requested,
        }) => {
            assert_eq!(address, WALLET);
            assert_eq!(stored, ChainFamily::Evm);
            assert_eq!(requested, ChainFamily::Solana);
        }
        other => panic!("expected chain family mismatch, got {:?}", other),
    }
}

#[tokio::test]
async fn summary_is_persisted_with_the_merge() {
    let (repo, _tmp) = setup();
    let engine = CostBasisEngine::new();

    let record = repo
        .upsert_merge_with_summary(
            WALLET,
            ChainFamily::Evm,
            vec![
                inbound("0xa", 100, "10"),
                inbound("0xb", 200, "5"),
                outbound("0xc", 300, "12"),
            ],
            Box::new(move |ledger| engine.compute(ledger)),
        )
        .await
        .unwrap();

    let summary = record.last_summary.unwrap();
    assert_eq!(summary.current_balance, dec!(3));
    assert_eq!(summary.total_invested, dec!(15));
    assert_eq!(summary.realized_pnl, dec!(0));
    assert_eq!(summary.unrealized_pnl, dec!(0));

    // And it survives a cold read.
    let fetched = repo.get_by_address(WALLET).unwrap();
    assert_eq!(fetched.last_summary.unwrap(), summary);
}

#[tokio::test]
async fn failed_recompute_rolls_back_the_whole_merge() {
    let (repo, _tmp) = setup();
    let engine = CostBasisEngine::new();

    repo.upsert_merge_with_summary(
        WALLET,
        ChainFamily::Evm,
        vec![inbound("0xa", 100, "1")],
        Box::new(move |ledger| engine.compute(ledger)),
    )
    .await
    .unwrap();

    // The new outbound overdraws, so the recompute fails and neither the
    // entry nor a summary change may survive.
    let result = repo
        .upsert_merge_with_summary(
            WALLET,
            ChainFamily::Evm,
            vec![outbound("0xb", 200, "5")],
            Box::new(move |ledger| engine.compute(ledger)),
        )
        .await;
    assert!(matches!(result, Err(Error::Calculation(_))));

    let record = repo.get_by_address(WALLET).unwrap();
    assert_eq!(record.ledger.len(), 1);
    assert_eq!(record.last_summary.unwrap().current_balance, dec!(1));
}

#[tokio::test]
async fn failed_first_merge_leaves_no_record_behind() {
    let (repo, _tmp) = setup();
    let engine = CostBasisEngine::new();

    let result = repo
        .upsert_merge_with_summary(
            WALLET,
            ChainFamily::Evm,
            vec![outbound("0xa", 100, "1")],
            Box::new(move |ledger| engine.compute(ledger)),
        )
        .await;
    assert!(matches!(result, Err(Error::Calculation(_))));
    assert!(repo.get_by_address(WALLET).is_err());
}

#[tokio::test]
async fn concurrent_disjoint_merges_both_commit() {
    let (repo, _tmp) = setup();

    let repo_a = repo.clone();
    let task_a = tokio::spawn(async move {
        repo_a
            .upsert_merge(WALLET, ChainFamily::Evm, vec![inbound("0xa", 100, "1")])
            .await
    });
    let repo_b = repo.clone();
    let task_b = tokio::spawn(async move {
        repo_b
            .upsert_merge(WALLET, ChainFamily::Evm, vec![inbound("0xb", 200, "2")])
            .await
    });

    task_a.await.unwrap().unwrap();
    task_b.await.unwrap().unwrap();

    let record = repo.get_by_address(WALLET).unwrap();
    let hashes: Vec<&str> = record.ledger.iter().map(|e| e.tx_hash.as_str()).collect();
    assert_eq!(hashes, vec!["0xa", "0xb"]);
}

#[tokio::test]
async fn ledger_reads_back_in_canonical_order() {
    let (repo, _tmp) = setup();

    repo.upsert_merge(
        WALLET,
        ChainFamily::Evm,
        vec![
            inbound("0xc", 300, "1"),
            inbound("0xb", 100, "1"),
            inbound("0xa", 300, "1"),
        ],
    )
    .await
    .unwrap();

    let record = repo.get_by_address(WALLET).unwrap();
    let hashes: Vec<&str> = record.ledger.iter().map(|e| e.tx_hash.as_str()).collect();
    assert_eq!(hashes, vec!["0xb", "0xa", "0xc"]);
}
