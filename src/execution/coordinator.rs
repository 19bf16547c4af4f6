//! Round-trip execution driver
//!
//! `execute` never propagates errors: every outcome, including partial
//! failures, becomes a TradeRecord with as much context as was known at
//! the point of failure. A round trip that got leg 1 mined but lost
//! leg 2 leaves a stranded middle-asset position; the record keeps the
//! leg 1 hash so the operator can trace it. No automatic unwind is
//! attempted.

use chrono::Utc;
use rust_decimal::prelude::*;
use rust_decimal_macros::dec;
use std::time::{Duration, Instant};
use tracing::{info, warn};

use crate::{
    config::CONFIG,
    errors::BotError,
    execution::{
        gas::GasParams,
        swap::{SwapExecutor, SwapOutcome},
    },
    types::{Opportunity, TradeMode, TradeRecord, TradeStatus},
    utils::math::{decimal_to_wei, wei_to_decimal},
};

pub struct ExecutionCoordinator {
    swap: SwapExecutor,
    last_trade: Option<Instant>,
    total_settlement_volume: Decimal,
}

/// Time left before the inter-trade interval has elapsed.
pub fn cooldown_remaining(last_trade: Option<Instant>, interval: Duration) -> Duration {
    match last_trade {
        Some(last) => interval.saturating_sub(last.elapsed()),
        None => Duration::ZERO,
    }
}

fn trade_interval(mode: TradeMode) -> Duration {
    let secs = match mode {
        TradeMode::Arbitrage => CONFIG.arbitrage.trade_interval_secs,
        TradeMode::VolumeBoosting => CONFIG.volume_boosting.trade_interval_secs,
    };
    Duration::from_secs(secs)
}

/// Failed-trade record carrying whatever partial state the round trip
/// reached. `middle_amount` is zero when leg 1 never completed.
pub fn failed_record(
    opportunity: &Opportunity,
    initial_balance: Decimal,
    middle_amount: Decimal,
    estimated_gas: Decimal,
    sell_tx_hash: Option<String>,
    buy_tx_hash: Option<String>,
    error: &BotError,
) -> TradeRecord {
    TradeRecord {
        timestamp: Utc::now(),
        mode: opportunity.mode,
        asset_in: opportunity.asset_in.clone(),
        asset_out: opportunity.asset_out.clone(),
        sell_venue: opportunity.sell_venue.clone(),
        buy_venue: opportunity.buy_venue.clone(),
        amount: opportunity.trade_amount,
        initial_balance,
        final_balance: initial_balance,
        middle_amount,
        final_amount: Decimal::ZERO,
        profit: Decimal::ZERO,
        profit_pct: Decimal::ZERO,
        estimated_gas,
        net_profit: -estimated_gas,
        sell_tx_hash,
        buy_tx_hash,
        status: TradeStatus::Failed,
        error: Some(error.to_string()),
    }
}

impl ExecutionCoordinator {
    pub fn new(swap: SwapExecutor) -> Self {
        Self {
            swap,
            last_trade: None,
            total_settlement_volume: Decimal::ZERO,
        }
    }

    /// Terminal condition for volume boosting: once the accumulated
    /// settlement-asset volume reaches the configured ceiling, boosting
    /// stops for the remainder of the process lifetime.
    pub fn check_volume_ceiling(&self) -> Result<(), BotError> {
        let limit = CONFIG.volume_boosting.volume_limit;
        if limit > Decimal::ZERO && self.total_settlement_volume >= limit {
            return Err(BotError::VolumeCeilingReached {
                traded: self.total_settlement_volume,
                limit,
            });
        }
        Ok(())
    }

    /// Run a full round trip. The cooldown gate is the only blocking
    /// wait: leg 1 does not begin until the per-mode inter-trade
    /// interval has elapsed since the previous execution, successful or
    /// not.
    pub async fn execute(&mut self, opportunity: &Opportunity, estimated_gas: Decimal) -> TradeRecord {
        let wait = cooldown_remaining(self.last_trade, trade_interval(opportunity.mode));
        if !wait.is_zero() {
            info!("⏳ Cooldown: waiting {:.1}s before next trade", wait.as_secs_f64());
            tokio::time::sleep(wait).await;
        }

        let record = self.run_round_trip(opportunity, estimated_gas).await;
        self.last_trade = Some(Instant::now());

        if record.is_success()
            && opportunity.mode == TradeMode::VolumeBoosting
            && opportunity.asset_out == CONFIG.settlement_asset
        {
            self.total_settlement_volume += record.middle_amount;
            info!(
                "📈 Settlement volume: {:.2} / {:.2}",
                self.total_settlement_volume, CONFIG.volume_boosting.volume_limit
            );
        }

        record
    }

    async fn run_round_trip(&self, opportunity: &Opportunity, estimated_gas: Decimal) -> TradeRecord {
        let gas = GasParams::for_mode(opportunity.mode);

        let decimals_in = self.swap.quotes().decimals(&opportunity.asset_in).await;
        let initial_balance = match self.swap.asset_balance(&opportunity.asset_in).await {
            Ok(wei) => wei_to_decimal(wei, decimals_in),
            Err(e) => {
                warn!("Balance read failed before leg 1: {}", e);
                return failed_record(opportunity, Decimal::ZERO, Decimal::ZERO, estimated_gas, None, None, &e);
            }
        };

        let sell_venue = match crate::config::venue(&opportunity.sell_venue) {
            Some(venue) => venue,
            None => {
                let e = BotError::Config(format!("unknown venue {}", opportunity.sell_venue));
                return failed_record(opportunity, initial_balance, Decimal::ZERO, estimated_gas, None, None, &e);
            }
        };
        let buy_venue = match crate::config::venue(&opportunity.buy_venue) {
            Some(venue) => venue,
            None => {
                let e = BotError::Config(format!("unknown venue {}", opportunity.buy_venue));
                return failed_record(opportunity, initial_balance, Decimal::ZERO, estimated_gas, None, None, &e);
            }
        };

        let amount_in = decimal_to_wei(opportunity.trade_amount, decimals_in);
        info!(
            "🔄 Leg 1: selling {:.6} {} on {}",
            opportunity.trade_amount, opportunity.asset_in, sell_venue.name
        );
        let leg1: SwapOutcome = match self
            .swap
            .swap(sell_venue, &opportunity.asset_in, &opportunity.asset_out, amount_in, &gas)
            .await
        {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("Leg 1 failed: {}", e);
                let sell_hash = e.tx_hash().map(str::to_string);
                return failed_record(opportunity, initial_balance, Decimal::ZERO, estimated_gas, sell_hash, None, &e);
            }
        };

        // Leg 2 consumes the amount actually received, never the quote.
        info!(
            "🔄 Leg 2: buying back with {:.6} {} on {}",
            leg1.amount_out, opportunity.asset_out, buy_venue.name
        );
        let leg2 = match self
            .swap
            .swap(buy_venue, &opportunity.asset_out, &opportunity.asset_in, leg1.amount_out_wei, &gas)
            .await
        {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("Leg 2 failed, position left in {}: {}", opportunity.asset_out, e);
                let buy_hash = e.tx_hash().map(str::to_string);
                return failed_record(
                    opportunity,
                    initial_balance,
                    leg1.amount_out,
                    estimated_gas,
                    Some(leg1.tx_hash),
                    buy_hash,
                    &e,
                );
            }
        };

        let final_balance = match self.swap.asset_balance(&opportunity.asset_in).await {
            Ok(wei) => wei_to_decimal(wei, decimals_in),
            Err(e) => {
                warn!("Balance read failed after leg 2: {}", e);
                // both legs confirmed; settle on the realized leg 2 output
                initial_balance - opportunity.trade_amount + leg2.amount_out
            }
        };

        let profit = final_balance - initial_balance;
        let profit_pct = if opportunity.trade_amount > Decimal::ZERO {
            profit / opportunity.trade_amount * dec!(100)
        } else {
            Decimal::ZERO
        };

        TradeRecord {
            timestamp: Utc::now(),
            mode: opportunity.mode,
            asset_in: opportunity.asset_in.clone(),
            asset_out: opportunity.asset_out.clone(),
            sell_venue: opportunity.sell_venue.clone(),
            buy_venue: opportunity.buy_venue.clone(),
            amount: opportunity.trade_amount,
            initial_balance,
            final_balance,
            middle_amount: leg1.amount_out,
            final_amount: leg2.amount_out,
            profit,
            profit_pct,
            estimated_gas,
            net_profit: profit - estimated_gas,
            sell_tx_hash: Some(leg1.tx_hash),
            buy_tx_hash: Some(leg2.tx_hash),
            status: TradeStatus::Success,
            error: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TradeMode;

    fn opportunity() -> Opportunity {
        Opportunity {
            id: "test".to_string(),
            timestamp: Utc::now(),
            mode: TradeMode::Arbitrage,
            asset_in: "MON".to_string(),
            asset_out: "USDC".to_string(),
            sell_venue: "monda".to_string(),
            buy_venue: "bean".to_string(),
            trade_amount: dec!(1),
            middle_amount: dec!(2.1),
            recovered_amount: dec!(1.09),
            expected_profit: dec!(0.09),
            expected_profit_pct: dec!(9),
        }
    }

    #[test]
    fn no_previous_trade_means_no_cooldown() {
        assert_eq!(cooldown_remaining(None, Duration::from_secs(5)), Duration::ZERO);
    }

    #[test]
    fn fresh_trade_requires_full_wait() {
        let remaining = cooldown_remaining(Some(Instant::now()), Duration::from_secs(5));
        assert!(remaining > Duration::from_secs(4));
        assert!(remaining <= Duration::from_secs(5));
    }

    #[test]
    fn leg2_failure_keeps_leg1_hash_and_middle_amount() {
        let error = BotError::SwapReverted {
            venue: "bean".to_string(),
            tx_hash: "0xdead".to_string(),
        };
        let record = failed_record(
            &opportunity(),
            dec!(100),
            dec!(2.1),
            dec!(0.01),
            Some("0xleg1".to_string()),
            Some("0xdead".to_string()),
            &error,
        );

        assert_eq!(record.status, TradeStatus::Failed);
        assert_eq!(record.sell_tx_hash.as_deref(), Some("0xleg1"));
        assert_eq!(record.buy_tx_hash.as_deref(), Some("0xdead"));
        assert_eq!(record.middle_amount, dec!(2.1));
        assert_eq!(record.net_profit, dec!(-0.01));
        assert!(record.error.is_some());
    }

    #[test]
    fn submission_failure_has_no_hashes() {
        let error = BotError::SwapSubmission {
            venue: "monda".to_string(),
            detail: "broadcast failed".to_string(),
        };
        let record =
            failed_record(&opportunity(), dec!(100), Decimal::ZERO, dec!(0.01), None, None, &error);

        assert!(record.sell_tx_hash.is_none());
        assert!(record.buy_tx_hash.is_none());
        assert_eq!(record.middle_amount, Decimal::ZERO);
    }
}
