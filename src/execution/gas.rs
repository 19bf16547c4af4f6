//! Gas estimation for round trips

use rust_decimal::prelude::*;

use crate::{config::CONFIG, types::TradeMode, utils::math::pow10};

/// Per-mode gas settings; the two modes deliberately pay different
/// premiums over the node's reported price.
#[derive(Debug, Clone, Copy)]
pub struct GasParams {
    pub gas_limit: u64,
    pub gas_price_multiplier: Decimal,
}

impl GasParams {
    pub fn for_mode(mode: TradeMode) -> Self {
        match mode {
            TradeMode::Arbitrage => Self {
                gas_limit: CONFIG.arbitrage.gas_limit,
                gas_price_multiplier: CONFIG.arbitrage.gas_price_multiplier,
            },
            TradeMode::VolumeBoosting => Self {
                gas_limit: CONFIG.volume_boosting.gas_limit,
                gas_price_multiplier: CONFIG.volume_boosting.gas_price_multiplier,
            },
        }
    }
}

/// Apply the configured multiplier to a raw gas price in wei. Falls
/// back to the unscaled price if the arithmetic leaves u128 range.
pub fn scale_gas_price(gas_price: u128, multiplier: Decimal) -> u128 {
    Decimal::from_u128(gas_price)
        .map(|p| p * multiplier)
        .and_then(|scaled| scaled.to_u128())
        .unwrap_or(gas_price)
}

/// Worst-case cost of both legs in native units:
/// gas_limit x scaled gas price x 2.
pub fn estimate_round_trip_cost(gas_price: u128, params: &GasParams) -> Decimal {
    let scaled = scale_gas_price(gas_price, params.gas_price_multiplier);
    let total_wei = (params.gas_limit as u128)
        .saturating_mul(scaled)
        .saturating_mul(2);
    Decimal::from_u128(total_wei).unwrap_or(Decimal::ZERO) / pow10(18)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn round_trip_cost_covers_both_legs() {
        let params = GasParams {
            gas_limit: 170_000,
            gas_price_multiplier: dec!(1),
        };
        // 50 gwei
        let cost = estimate_round_trip_cost(50_000_000_000, &params);
        assert_eq!(cost, dec!(0.017));
    }

    #[test]
    fn multiplier_scales_the_price() {
        assert_eq!(scale_gas_price(100, dec!(1.1)), 110);
        assert_eq!(scale_gas_price(100, dec!(1)), 100);
    }
}
