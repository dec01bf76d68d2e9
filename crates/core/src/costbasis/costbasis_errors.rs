use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised during cost basis computation.
///
/// The engine only reports; it never clamps or repairs. Whether an overdraft
/// is fatal or a data-coverage warning is the caller's policy decision.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error(
        "Ledger is not time-sorted: entry {tx_hash} at {offending} follows {previous}"
    )]
    UnsortedLedger {
        tx_hash: String,
        previous: DateTime<Utc>,
        offending: DateTime<Utc>,
    },

    #[error(
        "Disposal {tx_hash} of {requested} exceeds tracked holdings of {available}"
    )]
    Overdraft {
        tx_hash: String,
        requested: Decimal,
        available: Decimal,
    },
}
