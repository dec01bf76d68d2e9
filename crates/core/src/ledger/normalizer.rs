//! Converts provider-native transfer records into the canonical ledger form.

use log::debug;
use rust_decimal::Decimal;
use std::str::FromStr;

use super::ledger_errors::LedgerError;
use super::ledger_model::{LedgerEntry, TransferDirection};
use crate::errors::Result;
use walletlens_chain_data::{ChainFamily, RawTransfer};

/// Normalizes raw provider transfers for `wallet_address` into a canonical,
/// deterministically ordered ledger slice.
///
/// Direction is derived by comparing the transfer's `to`/`from` against the
/// wallet address: case-insensitively for EVM hex addresses, exactly for
/// Solana base58 addresses. Records that cannot be interpreted are rejected,
/// never repaired. Deduplication is not done here; it requires knowledge of
/// previously stored hashes and belongs to the wallet store.
pub fn normalize(
    raw_transfers: &[RawTransfer],
    wallet_address: &str,
    chain_family: ChainFamily,
) -> Result<Vec<LedgerEntry>> {
    let mut entries = Vec::with_capacity(raw_transfers.len());
    for raw in raw_transfers {
        entries.push(normalize_one(raw, wallet_address, chain_family)?);
    }

    entries.sort_by(LedgerEntry::ledger_ordering);
    debug!(
        "Normalized {} transfers for wallet {}",
        entries.len(),
        wallet_address
    );
    Ok(entries)
}

fn normalize_one(
    raw: &RawTransfer,
    wallet_address: &str,
    chain_family: ChainFamily,
) -> Result<LedgerEntry> {
    let tx_hash = match raw.hash.as_deref() {
        Some(h) if !h.trim().is_empty() => h.to_string(),
        _ => return Err(malformed("record is missing its transaction hash")),
    };

    let timestamp = raw
        .timestamp
        .ok_or_else(|| malformed(&format!("transfer {} has no timestamp", tx_hash)))?;

    let value_str = raw
        .value
        .as_deref()
        .ok_or_else(|| malformed(&format!("transfer {} has no value", tx_hash)))?;
    let amount = Decimal::from_str(value_str).map_err(|e| {
        malformed(&format!(
            "transfer {} has non-numeric value '{}': {}",
            tx_hash, value_str, e
        ))
    })?;
    if amount.is_sign_negative() {
        return Err(malformed(&format!(
            "transfer {} has negative value {}",
            tx_hash, amount
        )));
    }

    let is_sender = address_matches(&raw.from, wallet_address, chain_family);
    let is_recipient = address_matches(&raw.to, wallet_address, chain_family);

    let (direction, counterparty) = match (is_sender, is_recipient) {
        (false, true) => (TransferDirection::Inbound, raw.from.clone()),
        (true, false) => (TransferDirection::Outbound, raw.to.clone()),
        (true, true) => {
            // A self-transfer has no single direction in a one-asset ledger;
            // representing it as either side would misstate the totals.
            return Err(malformed(&format!(
                "transfer {} is a self-transfer",
                tx_hash
            )));
        }
        (false, false) => {
            return Err(malformed(&format!(
                "transfer {} does not involve wallet {}",
                tx_hash, wallet_address
            )));
        }
    };

    Ok(LedgerEntry {
        tx_hash,
        timestamp,
        direction,
        amount,
        counterparty,
    })
}

/// EVM hex addresses are checksummed by letter case only; Solana base58
/// addresses are case-significant.
fn address_matches(candidate: &str, wallet_address: &str, chain_family: ChainFamily) -> bool {
    match chain_family {
        ChainFamily::Evm => candidate.eq_ignore_ascii_case(wallet_address),
        ChainFamily::Solana => candidate == wallet_address,
    }
}

fn malformed(message: &str) -> crate::Error {
    LedgerError::MalformedTransfer(message.to_string()).into()
}
