//! On-disk trade history and derived summary
//!
//! The history is one JSON array rewritten wholesale on every record;
//! the summary is recomputed from the full history at the same time.
//! Totals are never tracked independently of the records.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::types::{RunStats, TradeRecord};

const HISTORY_FILE: &str = "trade_history.json";
const SUMMARY_FILE: &str = "trade_summary.json";

pub struct TradeLedger {
    dir: PathBuf,
    history: Vec<TradeRecord>,
    start_time: DateTime<Utc>,
}

impl TradeLedger {
    /// Open the ledger at `dir`, reloading any history a previous run
    /// left behind. A malformed history file is not fatal; it is logged
    /// and the ledger starts empty.
    pub fn load(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create ledger directory {}", dir.display()))?;

        let path = dir.join(HISTORY_FILE);
        let history = if path.exists() {
            match fs::read_to_string(&path)
                .context("Failed to read trade history")
                .and_then(|raw| {
                    serde_json::from_str::<Vec<TradeRecord>>(&raw)
                        .context("Failed to parse trade history")
                }) {
                Ok(records) => {
                    info!("📂 Reloaded {} trade records from {}", records.len(), path.display());
                    records
                }
                Err(e) => {
                    warn!("⚠️ Could not reload trade history: {}", e);
                    Vec::new()
                }
            }
        } else {
            Vec::new()
        };

        Ok(Self {
            dir,
            history,
            start_time: Utc::now(),
        })
    }

    pub fn history(&self) -> &[TradeRecord] {
        &self.history
    }

    pub fn stats(&self) -> RunStats {
        RunStats::from_records(&self.history, self.start_time)
    }

    /// Append a record and rewrite both files.
    pub fn record(&mut self, record: TradeRecord) -> Result<()> {
        self.history.push(record);
        self.save()
    }

    pub fn save(&self) -> Result<()> {
        let history_path = self.dir.join(HISTORY_FILE);
        let raw = serde_json::to_string_pretty(&self.history)
            .context("Failed to serialize trade history")?;
        fs::write(&history_path, raw)
            .with_context(|| format!("Failed to write {}", history_path.display()))?;

        let summary_path = self.dir.join(SUMMARY_FILE);
        let summary = serde_json::to_string_pretty(&self.stats())
            .context("Failed to serialize trade summary")?;
        fs::write(&summary_path, summary)
            .with_context(|| format!("Failed to write {}", summary_path.display()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{TradeMode, TradeStatus};
    use rust_decimal_macros::dec;

    fn temp_dir(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("ledger-test-{}-{}", tag, uuid::Uuid::new_v4()))
    }

    fn record(profit: rust_decimal::Decimal) -> TradeRecord {
        TradeRecord {
            timestamp: Utc::now(),
            mode: TradeMode::Arbitrage,
            asset_in: "MON".to_string(),
            asset_out: "USDC".to_string(),
            sell_venue: "monda".to_string(),
            buy_venue: "bean".to_string(),
            amount: dec!(1),
            initial_balance: dec!(100),
            final_balance: dec!(100) + profit,
            middle_amount: dec!(2.1),
            final_amount: dec!(1) + profit,
            profit,
            profit_pct: profit * dec!(100),
            estimated_gas: dec!(0.01),
            net_profit: profit - dec!(0.01),
            sell_tx_hash: Some("0xaa".to_string()),
            buy_tx_hash: Some("0xbb".to_string()),
            status: TradeStatus::Success,
            error: None,
        }
    }

    #[test]
    fn records_survive_a_reload() {
        let dir = temp_dir("reload");
        {
            let mut ledger = TradeLedger::load(&dir).unwrap();
            ledger.record(record(dec!(0.09))).unwrap();
            ledger.record(record(dec!(0.05))).unwrap();
        }

        let ledger = TradeLedger::load(&dir).unwrap();
        assert_eq!(ledger.history().len(), 2);
        assert_eq!(ledger.stats().total_profit, dec!(0.14));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn malformed_history_starts_empty() {
        let dir = temp_dir("malformed");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(HISTORY_FILE), "not json").unwrap();

        let ledger = TradeLedger::load(&dir).unwrap();
        assert!(ledger.history().is_empty());

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn summary_tracks_the_history() {
        let dir = temp_dir("summary");
        let mut ledger = TradeLedger::load(&dir).unwrap();
        ledger.record(record(dec!(0.09))).unwrap();

        let raw = fs::read_to_string(dir.join(SUMMARY_FILE)).unwrap();
        let stats: RunStats = serde_json::from_str(&raw).unwrap();
        assert_eq!(stats.total_trades, 1);
        assert_eq!(stats.successful_trades, 1);

        fs::remove_dir_all(&dir).unwrap();
    }
}
