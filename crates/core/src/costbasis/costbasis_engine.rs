//! FIFO cost basis computation.

use rust_decimal::Decimal;
use std::collections::VecDeque;

use super::costbasis_errors::EngineError;
use super::costbasis_model::{Lot, PositionSummary};
use crate::errors::Result;
use crate::ledger::{LedgerEntry, TransferDirection};

/// Computes a wallet's position summary from its canonical ledger.
///
/// The engine is a pure function of its input: no clock, no randomness, no
/// state between calls. The ledger must already be time-sorted; a timestamp
/// decrease is an error, detected before any lot is touched.
#[derive(Debug, Clone, Copy, Default)]
pub struct CostBasisEngine;

impl CostBasisEngine {
    pub fn new() -> Self {
        CostBasisEngine
    }

    pub fn compute(&self, ledger: &[LedgerEntry]) -> Result<PositionSummary> {
        self.check_sorted(ledger)?;

        let mut open_lots: VecDeque<Lot> = VecDeque::new();
        let mut total_invested = Decimal::ZERO;
        let mut realized_pnl = Decimal::ZERO;

        for entry in ledger {
            match entry.direction {
                TransferDirection::Inbound => {
                    open_lots.push_back(Lot {
                        tx_hash: entry.tx_hash.clone(),
                        acquired_at: entry.timestamp,
                        amount: entry.amount,
                        // Inbound value doubles as cost basis until a price
                        // oracle exists.
                        cost_basis: entry.amount,
                    });
                    total_invested += entry.amount;
                }
                TransferDirection::Outbound => {
                    realized_pnl += Self::consume_lots(&mut open_lots, entry)?;
                }
            }
        }

        Ok(PositionSummary {
            current_balance: open_lots.iter().map(|lot| lot.amount).sum(),
            total_invested,
            realized_pnl,
            unrealized_pnl: Decimal::ZERO,
        })
    }

    /// Verifies non-decreasing timestamps across the whole ledger before any
    /// mutation happens, so a failed compute leaves nothing half-applied.
    fn check_sorted(&self, ledger: &[LedgerEntry]) -> Result<()> {
        for pair in ledger.windows(2) {
            if pair[1].timestamp < pair[0].timestamp {
                return Err(EngineError::UnsortedLedger {
                    tx_hash: pair[1].tx_hash.clone(),
                    previous: pair[0].timestamp,
                    offending: pair[1].timestamp,
                }
                .into());
            }
        }
        Ok(())
    }

    /// Relieves open lots front-first for one disposal and returns the
    /// realized PnL delta: disposal value minus the proportional cost basis
    /// consumed from each matched lot.
    fn consume_lots(open_lots: &mut VecDeque<Lot>, entry: &LedgerEntry) -> Result<Decimal> {
        let mut remaining = entry.amount;
        let mut realized = Decimal::ZERO;

        while remaining > Decimal::ZERO {
            let Some(lot) = open_lots.front_mut() else {
                return Err(EngineError::Overdraft {
                    tx_hash: entry.tx_hash.clone(),
                    requested: entry.amount,
                    available: entry.amount - remaining,
                }
                .into());
            };

            // Zero-value acquisitions open empty lots; discard them instead
            // of dividing by their amount below.
            if lot.amount.is_zero() {
                open_lots.pop_front();
                continue;
            }

            let consumed = remaining.min(lot.amount);
            let consumed_cost = lot.cost_basis * consumed / lot.amount;
            realized += consumed - consumed_cost;

            lot.amount -= consumed;
            lot.cost_basis -= consumed_cost;
            remaining -= consumed;

            if lot.amount.is_zero() {
                open_lots.pop_front();
            }
        }

        Ok(realized)
    }
}
