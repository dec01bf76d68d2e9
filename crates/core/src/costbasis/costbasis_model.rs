//! Cost basis domain models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An open inbound position.
///
/// Created by an inbound transfer and consumed front-first by outbound
/// transfers. Without a price oracle in scope, the inbound value serves as
/// both quantity and cost basis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lot {
    /// Hash of the inbound transfer that opened the lot.
    pub tx_hash: String,
    pub acquired_at: DateTime<Utc>,
    /// Remaining quantity in native token units.
    pub amount: Decimal,
    /// Remaining cost basis attributed to the lot.
    pub cost_basis: Decimal,
}

/// The computed state of a wallet's native-token position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionSummary {
    /// Sum of remaining lot amounts.
    pub current_balance: Decimal,
    /// Sum of all inbound values ever ingested.
    pub total_invested: Decimal,
    /// Accumulated disposal value minus the cost basis consumed from
    /// matched lots.
    pub realized_pnl: Decimal,
    /// Placeholder: stays zero until a market price source exists. Must never
    /// be derived from stale or mismatched data.
    pub unrealized_pnl: Decimal,
}

impl Default for PositionSummary {
    fn default() -> Self {
        PositionSummary {
            current_balance: Decimal::ZERO,
            total_invested: Decimal::ZERO,
            realized_pnl: Decimal::ZERO,
            unrealized_pnl: Decimal::ZERO,
        }
    }
}
