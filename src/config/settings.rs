//! Bot configuration settings and environment variable handling

use rust_decimal::prelude::*;
use rust_decimal_macros::dec;
use std::env;
use std::str::FromStr;

// Configuration constants
pub const MIN_TRADE_AMOUNT: Decimal = dec!(0.001);
pub const MAX_TRADE_AMOUNT: Decimal = dec!(1000);
pub const MAX_SLIPPAGE_PCT: Decimal = dec!(50);
pub const EXECUTION_TIMEOUT_SECS: u64 = 60;
pub const QUOTE_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct ArbitrageSettings {
    pub min_profit_threshold: Decimal,
    pub max_trade_amount: Decimal,
    pub trade_interval_secs: u64,
    pub gas_limit: u64,
    pub gas_price_multiplier: Decimal,
}

#[derive(Debug, Clone)]
pub struct VolumeBoostingSettings {
    pub enabled: bool,
    pub target_venue: String,
    pub loss_tolerance_pct: Decimal,
    pub min_trade_amount: Decimal,
    pub max_trade_amount: Decimal,
    pub trade_interval_secs: u64,
    pub gas_limit: u64,
    pub gas_price_multiplier: Decimal,
    pub include_gas_in_calculation: bool,
    pub volume_limit: Decimal,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub rpc_url: String,
    pub chain_id: u64,
    pub private_key: Option<String>,
    pub slippage_tolerance_pct: Decimal,
    pub settlement_asset: String,
    /// Poll-loop cadence, shared by both modes.
    pub price_check_interval_secs: u64,
    pub arbitrage: ArbitrageSettings,
    pub volume_boosting: VolumeBoostingSettings,
}

impl Config {
    pub fn load() -> Self {
        Self {
            rpc_url: env::var("RPC_URL")
                .unwrap_or_else(|_| "https://testnet-rpc.monad.xyz".to_string()),
            chain_id: env::var("CHAIN_ID")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10143),
            private_key: env::var("PRIVATE_KEY").ok(),
            slippage_tolerance_pct: env::var("SLIPPAGE_TOLERANCE_PCT")
                .ok()
                .and_then(|s| Decimal::from_str(&s).ok())
                .unwrap_or(dec!(1.0))
                .max(Decimal::ZERO)
                .min(MAX_SLIPPAGE_PCT),
            settlement_asset: env::var("SETTLEMENT_ASSET")
                .unwrap_or_else(|_| "USDC".to_string()),
            price_check_interval_secs: env::var("PRICE_CHECK_INTERVAL_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(5),
            arbitrage: ArbitrageSettings {
                min_profit_threshold: env::var("MIN_PROFIT_THRESHOLD")
                    .ok()
                    .and_then(|s| Decimal::from_str(&s).ok())
                    .unwrap_or(dec!(0.05))
                    .max(Decimal::ZERO),
                max_trade_amount: env::var("ARB_MAX_TRADE_AMOUNT")
                    .ok()
                    .and_then(|s| Decimal::from_str(&s).ok())
                    .unwrap_or(dec!(1))
                    .max(MIN_TRADE_AMOUNT)
                    .min(MAX_TRADE_AMOUNT),
                trade_interval_secs: env::var("ARB_TRADE_INTERVAL_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(5),
                gas_limit: env::var("ARB_GAS_LIMIT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(170_000),
                gas_price_multiplier: env::var("ARB_GAS_PRICE_MULTIPLIER")
                    .ok()
                    .and_then(|s| Decimal::from_str(&s).ok())
                    .unwrap_or(dec!(1.1)),
            },
            volume_boosting: VolumeBoostingSettings {
                enabled: env::var("VOLUME_BOOSTING_ENABLED")
                    .unwrap_or_else(|_| "false".to_string())
                    .parse()
                    .unwrap_or(false),
                target_venue: env::var("VOLUME_TARGET_VENUE")
                    .unwrap_or_else(|_| "monda".to_string()),
                loss_tolerance_pct: env::var("LOSS_TOLERANCE_PCT")
                    .ok()
                    .and_then(|s| Decimal::from_str(&s).ok())
                    .unwrap_or(dec!(1.0))
                    .max(Decimal::ZERO),
                min_trade_amount: env::var("VOLUME_MIN_TRADE_AMOUNT")
                    .ok()
                    .and_then(|s| Decimal::from_str(&s).ok())
                    .unwrap_or(dec!(7.0))
                    .max(MIN_TRADE_AMOUNT),
                max_trade_amount: env::var("VOLUME_MAX_TRADE_AMOUNT")
                    .ok()
                    .and_then(|s| Decimal::from_str(&s).ok())
                    .unwrap_or(dec!(10.0))
                    .max(MIN_TRADE_AMOUNT)
                    .min(MAX_TRADE_AMOUNT),
                trade_interval_secs: env::var("VOLUME_TRADE_INTERVAL_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(5),
                gas_limit: env::var("VOLUME_GAS_LIMIT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(200_000),
                gas_price_multiplier: env::var("VOLUME_GAS_PRICE_MULTIPLIER")
                    .ok()
                    .and_then(|s| Decimal::from_str(&s).ok())
                    .unwrap_or(dec!(1.15)),
                include_gas_in_calculation: env::var("VOLUME_INCLUDE_GAS")
                    .unwrap_or_else(|_| "true".to_string())
                    .parse()
                    .unwrap_or(true),
                volume_limit: env::var("VOLUME_LIMIT")
                    .ok()
                    .and_then(|s| Decimal::from_str(&s).ok())
                    .unwrap_or(dec!(55000)),
            },
        }
    }

    /// Trade amounts for a volume-boosting draw, ordered (min, max).
    /// Swapped bounds are normalized instead of rejected.
    pub fn volume_amount_bounds(&self) -> (Decimal, Decimal) {
        let lo = self.volume_boosting.min_trade_amount;
        let hi = self.volume_boosting.max_trade_amount;
        if lo <= hi { (lo, hi) } else { (hi, lo) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn poll_interval_is_read_at_the_top_level() {
        let config = Config::load();
        let expected = env::var("PRICE_CHECK_INTERVAL_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(5);
        assert_eq!(config.price_check_interval_secs, expected);
    }

    #[test]
    fn swapped_volume_bounds_are_normalized() {
        let mut config = Config::load();
        config.volume_boosting.min_trade_amount = dec!(10);
        config.volume_boosting.max_trade_amount = dec!(7);
        assert_eq!(config.volume_amount_bounds(), (dec!(7), dec!(10)));
    }
}
