//! Loss-tolerant volume boosting against a fixed target venue

use chrono::Utc;
use rand::Rng;
use rust_decimal::prelude::*;
use rust_decimal_macros::dec;
use uuid::Uuid;

use crate::{
    config::{self, CONFIG},
    strategy::select_sell_venue,
    types::{Opportunity, PriceMap, TradeMode},
};

/// Fresh uniform draw from [min, max], rounded to two decimals. The
/// randomized size is deliberate variation of the on-chain footprint.
pub fn draw_trade_amount(min: Decimal, max: Decimal) -> Decimal {
    if min >= max {
        return min.round_dp(2);
    }
    let lo = min.to_f64().unwrap_or(0.0);
    let hi = max.to_f64().unwrap_or(lo);
    let drawn = rand::rng().random_range(lo..=hi);
    Decimal::from_f64(drawn).unwrap_or(min).round_dp(2)
}

/// Evaluate one pair against an already-built price map. Sells on the
/// best forward venue but always buys back on `target_venue`; when the
/// target has no reverse price, or the target itself has the best
/// forward price, the pair is skipped rather than routed elsewhere.
/// Admission is inclusive at the loss tolerance boundary.
#[allow(clippy::too_many_arguments)]
pub fn evaluate_pair(
    asset_in: &str,
    asset_out: &str,
    price_map: &PriceMap,
    trade_amount: Decimal,
    target_venue: &str,
    loss_tolerance_pct: Decimal,
    gas_cost: Option<Decimal>,
    venue_order: &[&str],
) -> Option<Opportunity> {
    if trade_amount <= Decimal::ZERO {
        return None;
    }

    let forward = price_map.get(&(asset_in.to_string(), asset_out.to_string()))?;
    let (sell_venue, sell_price) = select_sell_venue(venue_order, forward)?;
    // never a same-venue round trip
    if sell_venue == target_venue {
        return None;
    }

    let reverse = price_map.get(&(asset_out.to_string(), asset_in.to_string()))?;
    let buy_price = reverse.get(target_venue)?;

    let middle_amount = trade_amount * sell_price;
    let recovered = middle_amount * buy_price;
    let mut profit = recovered - trade_amount;
    if let Some(gas) = gas_cost {
        profit -= gas;
    }
    let profit_pct = profit / trade_amount * dec!(100);

    if profit_pct < -loss_tolerance_pct {
        return None;
    }

    Some(Opportunity {
        id: Uuid::new_v4().to_string(),
        timestamp: Utc::now(),
        mode: TradeMode::VolumeBoosting,
        asset_in: asset_in.to_string(),
        asset_out: asset_out.to_string(),
        sell_venue: sell_venue.to_string(),
        buy_venue: target_venue.to_string(),
        trade_amount,
        middle_amount,
        recovered_amount: recovered,
        expected_profit: profit,
        expected_profit_pct: profit_pct,
    })
}

pub struct VolumeBoostingEvaluator;

impl VolumeBoostingEvaluator {
    /// Evaluate every configured pair, smallest loss first. Performs no
    /// I/O; the caller supplies the price map and the per-trade gas
    /// cost (folded into the tolerance check only when configured).
    pub fn evaluate(price_map: &PriceMap, gas_cost: Decimal) -> Vec<Opportunity> {
        let settings = &CONFIG.volume_boosting;
        let (min, max) = CONFIG.volume_amount_bounds();
        let venue_order: Vec<&str> = config::VENUES.iter().map(|v| v.name).collect();
        let folded_gas = settings.include_gas_in_calculation.then_some(gas_cost);

        let mut opportunities: Vec<Opportunity> = config::TOKEN_PAIRS
            .iter()
            .filter_map(|(asset_in, asset_out)| {
                evaluate_pair(
                    asset_in,
                    asset_out,
                    price_map,
                    draw_trade_amount(min, max),
                    &settings.target_venue,
                    settings.loss_tolerance_pct,
                    folded_gas,
                    &venue_order,
                )
            })
            .collect();

        opportunities.sort_by(|a, b| b.expected_profit_pct.cmp(&a.expected_profit_pct));
        opportunities
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::VenuePrices;
    use proptest::prelude::*;

    const ORDER: &[&str] = &["hakifi", "bean", "monda", "octo", "madness"];

    fn price_map(forward: &[(&str, Decimal)], reverse: &[(&str, Decimal)]) -> PriceMap {
        let mut map = PriceMap::new();
        map.insert(
            ("MON".to_string(), "USDC".to_string()),
            forward.iter().map(|(v, p)| (v.to_string(), *p)).collect::<VenuePrices>(),
        );
        map.insert(
            ("USDC".to_string(), "MON".to_string()),
            reverse.iter().map(|(v, p)| (v.to_string(), *p)).collect::<VenuePrices>(),
        );
        map
    }

    #[test]
    fn loss_within_tolerance_is_admitted() {
        // round trip recovers 0.995: a 0.5% loss against 1.0% tolerance
        let map = price_map(&[("bean", dec!(2.0))], &[("monda", dec!(0.4975))]);
        let opp = evaluate_pair("MON", "USDC", &map, dec!(8), "monda", dec!(1.0), None, ORDER);

        let opp = opp.unwrap();
        assert_eq!(opp.buy_venue, "monda");
        assert_eq!(opp.sell_venue, "bean");
        assert_eq!(opp.expected_profit_pct, dec!(-0.5));
    }

    #[test]
    fn loss_beyond_tolerance_is_discarded() {
        // 1.5% loss against 1.0% tolerance
        let map = price_map(&[("bean", dec!(2.0))], &[("monda", dec!(0.4925))]);
        let opp = evaluate_pair("MON", "USDC", &map, dec!(8), "monda", dec!(1.0), None, ORDER);
        assert!(opp.is_none());
    }

    #[test]
    fn loss_exactly_at_tolerance_is_admitted() {
        let map = price_map(&[("bean", dec!(2.0))], &[("monda", dec!(0.495))]);
        let opp = evaluate_pair("MON", "USDC", &map, dec!(8), "monda", dec!(1.0), None, ORDER);
        assert_eq!(opp.unwrap().expected_profit_pct, dec!(-1.0));
    }

    #[test]
    fn missing_target_venue_is_never_substituted() {
        // bean has a better reverse price but the target is monda
        let map = price_map(&[("bean", dec!(2.0))], &[("bean", dec!(0.51))]);
        let opp = evaluate_pair("MON", "USDC", &map, dec!(8), "monda", dec!(1.0), None, ORDER);
        assert!(opp.is_none());
    }

    #[test]
    fn gas_folding_can_push_past_tolerance() {
        // break-even swap, but gas makes it a 1.25% loss on a 8 MON trade
        let map = price_map(&[("bean", dec!(2.0))], &[("monda", dec!(0.5))]);
        let without_gas =
            evaluate_pair("MON", "USDC", &map, dec!(8), "monda", dec!(1.0), None, ORDER);
        assert!(without_gas.is_some());

        let with_gas =
            evaluate_pair("MON", "USDC", &map, dec!(8), "monda", dec!(1.0), Some(dec!(0.1)), ORDER);
        assert!(with_gas.is_none());
    }

    #[test]
    fn target_with_best_forward_price_is_skipped() {
        // monda wins the forward leg, but monda is also the buy-back target
        let map = price_map(&[("monda", dec!(2.0)), ("bean", dec!(1.9))], &[("monda", dec!(0.5))]);
        let opp = evaluate_pair("MON", "USDC", &map, dec!(8), "monda", dec!(1.0), None, ORDER);
        assert!(opp.is_none());
    }

    #[test]
    fn absent_pair_is_skipped() {
        let opp =
            evaluate_pair("MON", "USDC", &PriceMap::new(), dec!(8), "monda", dec!(1.0), None, ORDER);
        assert!(opp.is_none());
    }

    #[test]
    fn drawn_amounts_stay_in_bounds_at_two_decimals() {
        for _ in 0..100 {
            let amount = draw_trade_amount(dec!(7.0), dec!(10.0));
            assert!(amount >= dec!(7.0) && amount <= dec!(10.0));
            assert_eq!(amount, amount.round_dp(2));
        }
    }

    #[test]
    fn evaluation_is_deterministic_over_a_frozen_map() {
        let map = price_map(&[("bean", dec!(2.0))], &[("monda", dec!(0.4975))]);
        let first =
            evaluate_pair("MON", "USDC", &map, dec!(8), "monda", dec!(1.0), None, ORDER).unwrap();
        let second =
            evaluate_pair("MON", "USDC", &map, dec!(8), "monda", dec!(1.0), None, ORDER).unwrap();

        assert_eq!(first.sell_venue, second.sell_venue);
        assert_eq!(first.expected_profit, second.expected_profit);
        assert_eq!(first.expected_profit_pct, second.expected_profit_pct);
    }

    #[test]
    fn degenerate_bounds_return_the_single_value() {
        assert_eq!(draw_trade_amount(dec!(5), dec!(5)), dec!(5));
    }

    proptest! {
        #[test]
        fn admission_boundary_is_inclusive(
            reverse_bps in 4800u64..5200,
            tolerance_centi in 0u64..300,
        ) {
            let reverse_price = Decimal::from(reverse_bps) / dec!(10000);
            let tolerance = Decimal::from(tolerance_centi) / dec!(100);
            let map = price_map(&[("bean", dec!(2.0))], &[("monda", reverse_price)]);

            let opp = evaluate_pair("MON", "USDC", &map, dec!(8), "monda", tolerance, None, ORDER);
            let profit_pct = (reverse_price * dec!(2.0) - dec!(1)) * dec!(100);

            prop_assert_eq!(opp.is_some(), profit_pct >= -tolerance);
            if let Some(opp) = opp {
                prop_assert!(opp.trade_amount > Decimal::ZERO);
                prop_assert_eq!(opp.buy_venue.as_str(), "monda");
            }
        }
    }
}
