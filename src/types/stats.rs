//! Session statistics derived from the trade history

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{TradeRecord, TradeStatus};

/// Running counters over the trade history. A pure reduction over
/// TradeRecord entries, recomputable at any time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunStats {
    pub total_trades: u64,
    pub successful_trades: u64,
    pub failed_trades: u64,
    pub total_profit: Decimal,
    pub total_gas_cost: Decimal,
    pub average_profit: Decimal,
    pub start_time: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

impl RunStats {
    pub fn from_records(records: &[TradeRecord], start_time: DateTime<Utc>) -> Self {
        let mut stats = RunStats {
            total_trades: 0,
            successful_trades: 0,
            failed_trades: 0,
            total_profit: Decimal::ZERO,
            total_gas_cost: Decimal::ZERO,
            average_profit: Decimal::ZERO,
            start_time,
            last_updated: Utc::now(),
        };

        for record in records {
            stats.total_trades += 1;
            match record.status {
                TradeStatus::Success => {
                    stats.successful_trades += 1;
                    stats.total_profit += record.profit;
                    stats.total_gas_cost += record.estimated_gas;
                }
                TradeStatus::Failed => stats.failed_trades += 1,
            }
        }

        if stats.successful_trades > 0 {
            stats.average_profit = stats.total_profit / Decimal::from(stats.successful_trades);
        }

        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TradeMode;
    use rust_decimal_macros::dec;

    fn record(status: TradeStatus, profit: Decimal, gas: Decimal) -> TradeRecord {
        TradeRecord {
            timestamp: Utc::now(),
            mode: TradeMode::Arbitrage,
            asset_in: "MON".to_string(),
            asset_out: "USDC".to_string(),
            sell_venue: "bean".to_string(),
            buy_venue: "monda".to_string(),
            amount: dec!(1),
            initial_balance: dec!(100),
            final_balance: dec!(100) + profit,
            middle_amount: dec!(2),
            final_amount: dec!(1) + profit,
            profit,
            profit_pct: profit * dec!(100),
            estimated_gas: gas,
            net_profit: profit - gas,
            sell_tx_hash: Some("0xaa".to_string()),
            buy_tx_hash: Some("0xbb".to_string()),
            status,
            error: None,
        }
    }

    #[test]
    fn folds_success_and_failure_counts() {
        let records = vec![
            record(TradeStatus::Success, dec!(0.4), dec!(0.01)),
            record(TradeStatus::Failed, dec!(0), dec!(0.01)),
            record(TradeStatus::Success, dec!(0.2), dec!(0.01)),
        ];

        let stats = RunStats::from_records(&records, Utc::now());
        assert_eq!(stats.total_trades, 3);
        assert_eq!(stats.successful_trades, 2);
        assert_eq!(stats.failed_trades, 1);
        assert_eq!(stats.total_profit, dec!(0.6));
        assert_eq!(stats.average_profit, dec!(0.3));
        assert_eq!(stats.total_gas_cost, dec!(0.02));
    }

    #[test]
    fn empty_history_has_zero_average() {
        let stats = RunStats::from_records(&[], Utc::now());
        assert_eq!(stats.total_trades, 0);
        assert_eq!(stats.average_profit, Decimal::ZERO);
    }
}
