//! Wallet record persistence.

mod wallets_model;
mod wallets_repository;

pub use wallets_model::{LedgerEntryDB, WalletDB};
pub use wallets_repository::WalletRepository;
