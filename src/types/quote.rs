//! Quotes and the per-cycle price map

use alloy::primitives::U256;
use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::utils::math::{pow10, u256_to_decimal};

/// Prices per venue name for one (asset_in, asset_out) direction.
pub type VenuePrices = HashMap<String, Decimal>;

/// Mapping from (asset_in, asset_out) symbol pairs to per-venue prices.
/// Built fresh each poll cycle and never mutated afterwards. A pair with
/// zero valid quotes is absent from the map, never present-but-empty.
pub type PriceMap = HashMap<(String, String), VenuePrices>;

/// A single valid venue quote for a fixed input amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quote {
    pub price: Decimal,
    pub amount_in: U256,
    pub amount_out: U256,
}

impl Quote {
    /// Build a quote from raw wei amounts, scaling the price by the decimal
    /// difference of the two assets. Returns `None` for anything that is not
    /// a usable price: zero input, zero output, or a non-positive ratio.
    /// A zero output is "no liquidity", never a zero-profit quote.
    pub fn compute(
        amount_in: U256,
        amount_out: U256,
        decimals_in: u32,
        decimals_out: u32,
    ) -> Option<Quote> {
        if amount_in.is_zero() || amount_out.is_zero() {
            return None;
        }

        let amount_in_dec = u256_to_decimal(amount_in)?;
        let amount_out_dec = u256_to_decimal(amount_out)?;

        let scale = pow10(decimals_in as i32 - decimals_out as i32);
        let price = amount_out_dec / amount_in_dec * scale;

        if price <= Decimal::ZERO {
            return None;
        }

        Some(Quote {
            price,
            amount_in,
            amount_out,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn price_scales_for_decimal_difference() {
        // 1 MON (18 decimals) -> 2 USDC (6 decimals): price should be 2.0
        let quote = Quote::compute(
            U256::from(1_000_000_000_000_000_000u128),
            U256::from(2_000_000u128),
            18,
            6,
        )
        .unwrap();
        assert_eq!(quote.price, dec!(2));
    }

    #[test]
    fn zero_output_is_invalid() {
        let quote = Quote::compute(U256::from(1_000_000u128), U256::ZERO, 18, 18);
        assert!(quote.is_none());
    }

    #[test]
    fn zero_input_is_invalid() {
        let quote = Quote::compute(U256::ZERO, U256::from(1_000_000u128), 18, 18);
        assert!(quote.is_none());
    }

    #[test]
    fn same_decimals_no_scaling() {
        let quote = Quote::compute(U256::from(4u64), U256::from(2u64), 18, 18).unwrap();
        assert_eq!(quote.price, dec!(0.5));
    }
}
