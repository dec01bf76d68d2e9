//! WalletLens Core - Domain entities, services, and traits.
//!
//! This crate contains the core business logic for WalletLens.
//! It is database-agnostic and defines traits that are implemented
//! by the `storage-sqlite` crate.

pub mod addresses;
pub mod constants;
pub mod costbasis;
pub mod errors;
pub mod ledger;
pub mod wallets;

// Re-export common types from the ledger and cost basis modules
pub use costbasis::*;
pub use ledger::*;

// Re-export the chain data types the domain model is built on
pub use walletlens_chain_data::{ChainFamily, RawTransfer};

// Re-export error types
pub use errors::Error;
pub use errors::Result;
