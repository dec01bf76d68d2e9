//! WalletLens Chain Data Crate
//!
//! This crate provides chain-agnostic transfer history fetching for the
//! WalletLens application.
//!
//! # Overview
//!
//! Given a wallet address, a provider returns the raw on-chain transfers that
//! touched it. The crate supports:
//! - Multiple chain families: EVM and Solana
//! - Pluggable providers behind the [`ChainDataProvider`] trait
//! - A fixture-backed provider for tests and offline operation
//!
//! # Architecture
//!
//! ```text
//! +------------------+     +------------------+
//! |   Domain Layer   | --> |   ChainFamily    |  (address classification)
//! +------------------+     +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          | ProviderRegistry |  (one provider per family)
//!                          +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          |     Provider     |  (Etherscan, fixtures, ...)
//!                          +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          |   RawTransfer    |  (provider-native record)
//!                          +------------------+
//! ```
//!
//! Raw transfers are deliberately loose: validation and canonicalization
//! belong to the consumer, not to the providers.

pub mod errors;
pub mod models;
pub mod provider;
pub mod registry;

pub use errors::ChainDataError;
pub use models::{ChainFamily, RawTransfer};
pub use provider::demo::DemoChainProvider;
pub use provider::fixture::FixtureChainProvider;
pub use provider::etherscan::EtherscanProvider;
pub use provider::ChainDataProvider;
pub use registry::ProviderRegistry;
