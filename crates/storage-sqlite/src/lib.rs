//! SQLite storage implementation for WalletLens.
//!
//! This crate provides all database-related functionality using Diesel ORM
//! with SQLite. It implements the repository traits defined in
//! `walletlens-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - The wallet record repository
//! - Database-specific model types (with Diesel derives)
//!
//! # Architecture
//!
//! This crate is the only place in the application where Diesel dependencies
//! exist. All other crates are database-agnostic and work with traits.
//!
//! ```text
//!       core (domain)
//!            │
//!            ▼
//!   storage-sqlite (this crate)
//!            │
//!            ▼
//!        SQLite DB
//! ```

pub mod db;
pub mod errors;
pub mod schema;

// Repository implementations
pub mod wallets;

// Re-export database utilities
pub use db::{create_pool, get_connection, init, run_migrations, DbConnection, DbPool, WriteHandle};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export from walletlens-core for convenience
pub use walletlens_core::errors::{DatabaseError, Error, Result};
