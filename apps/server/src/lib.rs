//! WalletLens HTTP server library.
//!
//! The binary in `main.rs` is a thin wrapper; everything lives here so
//! integration tests can build the router in-process.

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod main_lib;
pub mod models;

pub use config::Config;
pub use main_lib::{build_state, init_tracing, AppState};
