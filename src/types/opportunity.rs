//! Round-trip trade opportunities

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TradeMode {
    Arbitrage,
    VolumeBoosting,
}

impl std::fmt::Display for TradeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TradeMode::Arbitrage => write!(f, "arbitrage"),
            TradeMode::VolumeBoosting => write!(f, "volume_boosting"),
        }
    }
}

/// One detected two-leg round trip: sell `trade_amount` of `asset_in` for
/// the middle asset (`asset_out`) on `sell_venue`, buy `asset_in` back on
/// `buy_venue`. Produced and consumed within a single poll cycle; only the
/// resulting TradeRecord is ever persisted.
#[derive(Debug, Clone, Serialize)]
pub struct Opportunity {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub mode: TradeMode,
    pub asset_in: String,
    /// The middle asset obtained by leg 1 and consumed by leg 2.
    pub asset_out: String,
    pub sell_venue: String,
    pub buy_venue: String,
    /// In asset_in units.
    pub trade_amount: Decimal,
    /// Middle-asset amount quoted for leg 1.
    pub middle_amount: Decimal,
    /// asset_in amount quoted for the full round trip.
    pub recovered_amount: Decimal,
    pub expected_profit: Decimal,
    pub expected_profit_pct: Decimal,
}

impl Opportunity {
    pub fn route(&self) -> String {
        format!("{}->{}", self.sell_venue, self.buy_venue)
    }
}
