//! Opportunity evaluation policies
//!
//! Two mutually exclusive policies share the venue-selection core:
//! arbitrage hunts strictly profitable round trips, volume boosting
//! accepts bounded losses to accumulate volume on a fixed target venue.

pub mod arbitrage;
pub mod volume_boosting;

pub use arbitrage::ArbitrageEvaluator;
pub use volume_boosting::VolumeBoostingEvaluator;

use rust_decimal::Decimal;

use crate::types::VenuePrices;

/// Venue with the strictly highest price, ties resolved to the earliest
/// entry in `venue_order`. Deterministic regardless of map iteration.
pub fn select_sell_venue<'a>(
    venue_order: &[&'a str],
    prices: &VenuePrices,
) -> Option<(&'a str, Decimal)> {
    let mut best: Option<(&str, Decimal)> = None;
    for name in venue_order {
        if let Some(price) = prices.get(*name) {
            match best {
                Some((_, current)) if *price <= current => {}
                _ => best = Some((*name, *price)),
            }
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const ORDER: &[&str] = &["hakifi", "bean", "monda", "octo", "madness"];

    #[test]
    fn highest_price_wins() {
        let prices: VenuePrices = [
            ("hakifi".to_string(), dec!(2.0)),
            ("monda".to_string(), dec!(2.1)),
            ("bean".to_string(), dec!(1.9)),
        ]
        .into();
        assert_eq!(select_sell_venue(ORDER, &prices), Some(("monda", dec!(2.1))));
    }

    #[test]
    fn ties_resolve_to_earliest_configured_venue() {
        let prices: VenuePrices = [
            ("monda".to_string(), dec!(2.0)),
            ("bean".to_string(), dec!(2.0)),
        ]
        .into();
        assert_eq!(select_sell_venue(ORDER, &prices), Some(("bean", dec!(2.0))));
    }

    #[test]
    fn empty_prices_select_nothing() {
        assert_eq!(select_sell_venue(ORDER, &VenuePrices::new()), None);
    }

    #[test]
    fn unknown_venues_are_ignored() {
        let prices: VenuePrices = [("ghost".to_string(), dec!(99))].into();
        assert_eq!(select_sell_venue(ORDER, &prices), None);
    }
}
