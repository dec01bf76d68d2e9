//! Chain data provider abstractions and implementations.
//!
//! This module contains:
//! - The `ChainDataProvider` trait that all providers implement
//! - Concrete provider implementations (Etherscan-compatible APIs, fixtures)
//!
//! Providers return transfers as the chain reported them. They make no
//! ordering or well-formedness promises; canonicalization is the consumer's
//! concern.

mod traits;

pub mod demo;
pub mod etherscan;
pub mod fixture;

pub use traits::ChainDataProvider;
