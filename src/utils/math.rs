//! Decimal/wei conversion helpers

use alloy::primitives::U256;
use rust_decimal::prelude::*;
use rust_decimal_macros::dec;

pub fn pow10(n: i32) -> Decimal {
    match n {
        0 => dec!(1),
        6 => dec!(1_000_000),
        12 => dec!(1_000_000_000_000),
        18 => dec!(1_000_000_000_000_000_000),
        _ => {
            let mut result = dec!(1);
            if n > 0 {
                for _ in 0..n {
                    result *= dec!(10);
                }
            } else {
                for _ in 0..(-n) {
                    result /= dec!(10);
                }
            }
            result
        }
    }
}

/// Lossless for anything that fits u128; balances and trade amounts on
/// this chain always do.
pub fn u256_to_decimal(value: U256) -> Option<Decimal> {
    Decimal::from_u128(u128::try_from(value).ok()?)
}

/// Convert a raw wei amount into human units for an asset with the given
/// decimal precision.
pub fn wei_to_decimal(wei: U256, decimals: u32) -> Decimal {
    u256_to_decimal(wei)
        .map(|v| v / pow10(decimals as i32))
        .unwrap_or(Decimal::ZERO)
}

/// Convert a human-unit amount into wei. Truncates any precision below
/// one wei.
pub fn decimal_to_wei(amount: Decimal, decimals: u32) -> U256 {
    let scaled = amount * pow10(decimals as i32);
    match scaled.trunc().to_u128() {
        Some(v) => U256::from(v),
        None => U256::ZERO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pow10_negative_exponent() {
        assert_eq!(pow10(-6), dec!(0.000001));
    }

    #[test]
    fn wei_round_trips_through_decimal() {
        let wei = U256::from(1_500_000_000_000_000_000u128);
        let dec = wei_to_decimal(wei, 18);
        assert_eq!(dec, dec!(1.5));
        assert_eq!(decimal_to_wei(dec, 18), wei);
    }

    #[test]
    fn decimal_to_wei_truncates_sub_wei_precision() {
        // 6-decimal asset: anything below 1e-6 disappears
        assert_eq!(decimal_to_wei(dec!(1.2345678), 6), U256::from(1_234_567u64));
    }

    #[test]
    fn negative_amounts_clamp_to_zero() {
        assert_eq!(decimal_to_wei(dec!(-1), 18), U256::ZERO);
    }
}
