//! Wallet address classification.
//!
//! Determines the chain family from address syntax alone. Callers at the
//! transport boundary classify before entering the domain services, which
//! only ever see the resulting enum.

use lazy_static::lazy_static;
use regex::Regex;

use crate::errors::{Error, Result, ValidationError};
use walletlens_chain_data::ChainFamily;

lazy_static! {
    static ref EVM_ADDRESS: Regex = Regex::new(r"^0x[a-fA-F0-9]{40}$").unwrap();
    static ref SOLANA_ADDRESS: Regex = Regex::new(r"^[1-9A-HJ-NP-Za-km-z]{32,44}$").unwrap();
}

/// Classifies an address string into its chain family.
pub fn classify(address: &str) -> Result<ChainFamily> {
    if EVM_ADDRESS.is_match(address) {
        Ok(ChainFamily::Evm)
    } else if SOLANA_ADDRESS.is_match(address) {
        Ok(ChainFamily::Solana)
    } else {
        Err(Error::Validation(ValidationError::InvalidInput(format!(
            "Invalid wallet address format: {}",
            address
        ))))
    }
}
