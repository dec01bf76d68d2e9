//! Wallets module - persisted wallet records and the analysis pipeline.

mod wallets_model;
mod wallets_service;
mod wallets_traits;

// Re-export the public interface
pub use wallets_model::WalletRecord;
pub use wallets_service::WalletAnalysisService;
pub use wallets_traits::{RecomputeFn, WalletAnalysisServiceTrait, WalletRepositoryTrait};

#[cfg(test)]
mod wallets_service_tests;
