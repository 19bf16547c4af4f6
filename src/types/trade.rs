//! Persisted trade records

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::TradeMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TradeStatus {
    Success,
    Failed,
}

/// Immutable log line for one executed (or attempted) round trip.
/// Appended to the trade history; running totals are always derived by
/// folding over these records, never tracked independently.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeRecord {
    pub timestamp: DateTime<Utc>,
    pub mode: TradeMode,
    pub asset_in: String,
    pub asset_out: String,
    pub sell_venue: String,
    pub buy_venue: String,
    pub amount: Decimal,
    pub initial_balance: Decimal,
    pub final_balance: Decimal,
    /// Middle-asset amount actually received by leg 1.
    pub middle_amount: Decimal,
    /// asset_in amount actually received by leg 2.
    pub final_amount: Decimal,
    pub profit: Decimal,
    pub profit_pct: Decimal,
    /// Two-leg gas estimate in native units, recorded whether or not it
    /// gated the decision.
    pub estimated_gas: Decimal,
    pub net_profit: Decimal,
    /// Leg 1 transaction hash. Present on partial failures so a stranded
    /// middle-asset position can be traced.
    pub sell_tx_hash: Option<String>,
    /// Leg 2 transaction hash.
    pub buy_tx_hash: Option<String>,
    pub status: TradeStatus,
    pub error: Option<String>,
}

impl TradeRecord {
    pub fn is_success(&self) -> bool {
        self.status == TradeStatus::Success
    }
}
