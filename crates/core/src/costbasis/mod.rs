//! Cost basis module - FIFO lot tracking over a canonical ledger.

mod costbasis_engine;
mod costbasis_errors;
mod costbasis_model;

// Re-export the public interface
pub use costbasis_engine::CostBasisEngine;
pub use costbasis_errors::EngineError;
pub use costbasis_model::{Lot, PositionSummary};
